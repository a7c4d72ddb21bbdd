//! Leveled assertions. Cheap checks are always on, the expensive ones only run in tests or with the
//! `debug-checks` feature enabled.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const PLACEMENT_ASSERT_LEVEL_DEFINITION: u8 = PLACEMENT_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const PLACEMENT_ASSERT_LEVEL_DEFINITION: u8 = PLACEMENT_ASSERT_EXTREME;

pub const PLACEMENT_ASSERT_SIMPLE: u8 = 1;
pub const PLACEMENT_ASSERT_MODERATE: u8 = 2;
pub const PLACEMENT_ASSERT_ADVANCED: u8 = 3;
pub const PLACEMENT_ASSERT_EXTREME: u8 = 4;

#[macro_export]
#[doc(hidden)]
macro_rules! print_placement_assert_warning_message {
    () => {
        if $crate::asserts::PLACEMENT_ASSERT_LEVEL_DEFINITION
            >= $crate::asserts::PLACEMENT_ASSERT_MODERATE
        {
            log::warn!(
                "Potential performance degradation: the placement assert level is set to {}, meaning many debug asserts are active which may result in performance degradation.",
                $crate::asserts::PLACEMENT_ASSERT_LEVEL_DEFINITION
            );
        };
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! placement_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::PLACEMENT_ASSERT_LEVEL_DEFINITION >= $crate::asserts::PLACEMENT_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! placement_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::PLACEMENT_ASSERT_LEVEL_DEFINITION >= $crate::asserts::PLACEMENT_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! placement_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::PLACEMENT_ASSERT_LEVEL_DEFINITION >= $crate::asserts::PLACEMENT_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! placement_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::PLACEMENT_ASSERT_LEVEL_DEFINITION >= $crate::asserts::PLACEMENT_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! placement_assert_extreme {
    ($($arg:tt)*) => {
        if $crate::asserts::PLACEMENT_ASSERT_LEVEL_DEFINITION >= $crate::asserts::PLACEMENT_ASSERT_EXTREME {
            assert!($($arg)*);
        }
    };
}
