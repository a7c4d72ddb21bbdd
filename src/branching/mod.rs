//! Contains structures and traits to define the decision making procedure of the search.
//!
//! A [`Brancher`] returns a [`Decision`] `x = v`; the search takes the decision and, on
//! backtracking, posts its refutation `x != v`. The [`PlacementBrancher`] is the default strategy
//! for the placement model. It combines [`VariableSelector`]s and [`ValueSelector`]s which can
//! also be used to build other strategies.

mod brancher;
mod placement_brancher;
mod selection_context;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::Brancher;
pub use brancher::Decision;
pub use placement_brancher::PlacementBrancher;
pub use selection_context::SelectionContext;
pub use value_selection::ValueSelector;
pub use variable_selection::VariableSelector;
