//! Handles to the variables of the solver and the layout that maps the placement problem onto
//! them.

mod domain_id;
mod layout;

pub use domain_id::DomainId;
pub use layout::VariableLayout;
