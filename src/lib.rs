//! Cost-minimal placement of application components onto a pool of virtual machines.
//!
//! A [`ProblemInstance`](instance::ProblemInstance) describes the components of an application,
//! the placement rules between them, a catalogue of VM offers and the number of slots which may be
//! rented. The [`PlacementSolver`] builds a constraint model of the instance and searches it with
//! branch-and-bound for the cheapest placement; the [`ParallelPlacementSolver`] does the same with
//! a pool of worker threads.
//!
//! ```
//! # use vm_placement::engine::termination::TimeBudget;
//! # use vm_placement::instance::topology::general_purpose_offers;
//! # use vm_placement::instance::topology::secure_web_container;
//! # use vm_placement::PlacementSolver;
//! # use vm_placement::SolverOptions;
//! # use std::time::Duration;
//! let instance = secure_web_container(5, general_purpose_offers());
//! let mut solver = PlacementSolver::new(instance.clone(), SolverOptions::default())?;
//!
//! let mut brancher = solver.default_brancher();
//! let mut termination = TimeBudget::starting_now(Duration::from_secs(60));
//!
//! if let Some(solution) = solver.optimise(&mut brancher, &mut termination).solution() {
//!     assert_eq!(Ok(()), solution.verify(&instance));
//! }
//! # Ok::<(), vm_placement::instance::InstanceError>(())
//! ```

pub mod asserts;
pub mod basic_types;
pub mod branching;
pub mod engine;
pub mod instance;
pub mod model;
pub(crate) mod propagators;
pub mod results;
pub mod runner;
pub mod statistics;

#[cfg(test)]
mod tests;

pub use basic_types::ConstraintOperationError;
pub use engine::ParallelPlacementSolver;
pub use engine::PlacementSolver;
pub use engine::SolverOptions;
