//! The constraint programming core: the variable store, domain events and the propagation
//! machinery built on top of them.

mod assignments;
mod domain_events;
pub mod propagation;
mod propagation_engine;
mod propagator_queue;
mod watch_list_cp;

pub use assignments::Assignments;
pub use assignments::Checkpoint;
pub use assignments::EmptyDomain;
pub use domain_events::DomainEvents;
pub use domain_events::IntDomainEvent;
pub use propagation_engine::PropagationEngine;
pub use propagation_engine::PropagatorStore;
pub(crate) use propagator_queue::PropagatorQueue;
pub(crate) use watch_list_cp::WatchListCP;
