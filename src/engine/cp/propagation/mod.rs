//! Contains the main building blocks for propagators.
//!
//! A [`Propagator`] is initialised once at the root through a [`PropagatorInitialisationContext`]
//! where it registers the variables it wants to be woken up for. Afterwards it is called with a
//! [`PropagationContextMut`] whenever one of those variables changes, and with a read-only
//! [`PropagationContext`] when the solver wants to know whether its constraint holds.

mod propagation_context;
mod propagator;
mod propagator_id;
mod propagator_initialisation_context;

pub use propagation_context::HasAssignments;
pub use propagation_context::PropagationContext;
pub use propagation_context::PropagationContextMut;
pub use propagation_context::ReadDomains;
pub use propagator::Propagator;
pub use propagator::Satisfaction;
pub use propagator_id::PropagatorId;
pub use propagator_initialisation_context::PropagatorInitialisationContext;
