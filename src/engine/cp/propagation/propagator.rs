use super::PropagationContext;
use super::PropagationContextMut;
use super::PropagatorInitialisationContext;
#[cfg(doc)]
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
#[cfg(doc)]
use crate::engine::PlacementSolver;

/// The outcome of asking a propagator whether its constraint holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Satisfaction {
    /// The constraint holds for every completion of the current domains.
    Satisfied,
    /// The constraint cannot hold for any completion of the current domains.
    Violated,
    Undetermined,
}

/// All constraints of the placement model are enforced by types implementing the [`Propagator`]
/// trait.
///
/// Propagators are shared between the workers of a parallel search, which is why they are
/// immutable once initialised and must be [`Send`] and [`Sync`].
pub trait Propagator: Send + Sync {
    /// Return the name of the propagator, this is a convenience method that is used for printing.
    fn name(&self) -> &str;

    /// The queue priority of the propagator. Propagators with a lower priority value are run
    /// first. Cheap propagators should use 0 and more expensive ones 1.
    fn priority(&self) -> u32 {
        0
    }

    /// Initialises the propagator without performing propagation. This method is called only once
    /// by the [`PlacementSolver`] when the propagator is added.
    ///
    /// The method is used to register the variables the propagator wants to be woken up for by
    /// calling [`PropagatorInitialisationContext::register`], and to detect root-level
    /// inconsistencies.
    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> PropagationStatusCP;

    /// Extends the current partial assignment with the domain changes implied by the constraint.
    /// In case a contradiction is detected it returns an [`Inconsistency`], either because a
    /// narrowing emptied a domain or because the constraint cannot be satisfied anymore.
    ///
    /// Propagators are not required to reach a fixed point. They are called again by the solver
    /// until no further propagations happen.
    fn propagate(&self, context: PropagationContextMut) -> PropagationStatusCP;

    /// Evaluates the constraint on the current domains without changing them.
    fn check(&self, context: PropagationContext) -> Satisfaction;
}
