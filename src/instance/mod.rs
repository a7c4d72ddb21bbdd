//! The problem instance handed to the solver: the components to place, the pool of slots, the VM
//! offer catalogue, and the placement rules of the application.
//!
//! An instance is plain data. It is validated once (see [`ProblemInstance::validate`]) before any
//! variables are created, and is never mutated by the solver.

mod problem_instance;
mod rules;
pub mod topology;
mod validation;

pub use problem_instance::Component;
pub use problem_instance::ComponentId;
pub use problem_instance::OfferId;
pub use problem_instance::ProblemInstance;
pub use problem_instance::VmOffer;
pub use rules::Comparison;
pub use rules::PlacementRule;
pub use validation::InstanceError;
