use crate::engine::cp::EmptyDomain;

/// The result of invoking a propagator. The propagation can either succeed or identify a
/// contradiction in the current partial assignment.
pub type PropagationStatusCP = Result<(), Inconsistency>;

/// The reason a propagation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inconsistency {
    /// A narrowing would have removed the last value from a domain.
    EmptyDomain,
    /// The propagator determined that its constraint cannot be satisfied in the current state.
    Violated,
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}
