use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// [`ValueSelector`] which chooses to assign the provided variable to its lowest-bound.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMin;

impl ValueSelector for InDomainMin {
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: DomainId) -> i32 {
        context.lower_bound(decision_variable)
    }
}
