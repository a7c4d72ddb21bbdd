//! Contains the propagators of the placement model.
//!
//! See the [`crate::engine::cp::propagation`] for info on propagators.

mod boolean_count;
pub(crate) mod capacity;
pub(crate) mod cardinality;
pub(crate) mod colocation;
pub(crate) mod conflict;
pub(crate) mod implication;
pub(crate) mod linking;
pub(crate) mod require_provide;
pub(crate) mod slot_ordering;
pub(crate) mod slot_usage;

pub(crate) use capacity::CapacityPropagator;
pub(crate) use cardinality::CardinalityPropagator;
pub(crate) use colocation::ColocationPropagator;
pub(crate) use conflict::ConflictPropagator;
pub(crate) use implication::ImplicationPropagator;
pub(crate) use linking::LinkingPropagator;
pub(crate) use require_provide::RequireProvidePropagator;
pub(crate) use slot_ordering::SlotOrderingPropagator;
pub(crate) use slot_usage::SlotUsagePropagator;
