//! The outcome of a solve and the placement it describes.

pub(crate) mod extraction;
mod placement_solution;

pub use extraction::ConsistencyViolation;
pub use placement_solution::PlacementSolution;
pub use placement_solution::SlotDetails;

/// The result of an optimisation call.
#[derive(Clone, Debug)]
pub enum OptimisationResult {
    /// The search space was exhausted; no placement is cheaper than this one.
    Optimal(PlacementSolution),
    /// The search was stopped before it could prove that no cheaper placement exists.
    Satisfiable(PlacementSolution),
    /// No placement satisfies the constraints.
    Unsatisfiable,
    /// The search was stopped before any placement was found.
    Unknown,
}

impl OptimisationResult {
    /// The placement carried by the result, if any.
    pub fn solution(&self) -> Option<&PlacementSolution> {
        match self {
            OptimisationResult::Optimal(solution) | OptimisationResult::Satisfiable(solution) => {
                Some(solution)
            }
            OptimisationResult::Unsatisfiable | OptimisationResult::Unknown => None,
        }
    }
}
