use std::fmt::Display;
use std::fmt::Formatter;

#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// A branching decision `variable = value`. Its refutation is `variable != value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Decision {
    pub variable: DomainId,
    pub value: i32,
}

impl Display for Decision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} == {}]", self.variable, self.value)
    }
}

/// A trait for definining a branching strategy (oftentimes utilising a [`VariableSelector`] and a
/// [`ValueSelector`]).
///
/// In general, implementations of this trait define how the search of the solver proceeds (i.e. it
/// controls how the solver determines which part of the search space to explore). It is required
/// that the returned decision concerns an unfixed variable and a value in its domain.
pub trait Brancher {
    /// Returns the next decision (or [`None`] if all variables under consideration are
    /// assigned).
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Decision>;

    /// Called when the search finds a new incumbent.
    fn on_solution(&mut self) {}
}
