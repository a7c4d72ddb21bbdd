//! Provides the [`VariableSelector`] trait which is required
//! for variable selectors to implement; the main method in this trait relies on
//! [`VariableSelector::select_variable`].
//!
//! Any [`VariableSelector`] should only select variables which have a domain of size 2 or larger.

mod first_fail;
mod input_order;

pub use first_fail::FirstFail;
pub use first_fail::TieBreaking;
pub use input_order::InputOrder;

use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// A trait containing the interface for [`VariableSelector`]s, specifying the appropriate hooks
/// into the solver and the methods required for selecting variables.
pub trait VariableSelector {
    /// Determines which variable to select next if there are any left to branch on.
    /// Should only return [`None`] when all variables which have been passed to the
    /// [`VariableSelector`] have been assigned. Otherwise it should return the variable to
    /// branch on next.
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId>;
}
