//! The solving machinery: the constraint programming core, the variable layout of the model, the
//! termination conditions, and the sequential and parallel branch-and-bound search.

pub mod cp;
mod parallel;
mod placement_solver;
mod search;
pub mod termination;
pub(crate) mod test_helper;
pub mod variables;

pub use parallel::ParallelPlacementSolver;
pub use placement_solver::PlacementSolver;
pub use placement_solver::SolverOptions;
