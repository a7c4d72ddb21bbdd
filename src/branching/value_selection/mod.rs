//! Provides the [`ValueSelector`] trait which is required
//! for value selectors to implement; the main method in this trait relies on
//! [`ValueSelector::select_value`].
//!
//! Any [`ValueSelector`] should only select values which are in the domain of the provided
//! variable.

mod in_domain_min;
mod preference_order;

pub use in_domain_min::InDomainMin;
pub use preference_order::PreferenceOrder;

use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// A trait containing the interface for [`ValueSelector`]s, specifying the appropriate hooks into
/// the solver and the methods required for selecting a value for a given variable.
pub trait ValueSelector {
    /// Determines which value in the domain of `decision_variable` to assign first.
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: DomainId) -> i32;
}
