use thiserror::Error;

#[cfg(doc)]
use crate::engine::PlacementSolver;

/// Errors related to posting constraints to the [`PlacementSolver`].
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    /// Error which indicates that adding a propagator led to infeasibility at the root.
    #[error("Adding the constraint failed because it is infeasible at the root")]
    InfeasiblePropagator,
}
