mod constraint_operation_error;
mod hash_structures;
mod moving_averages;
mod propagation_status_cp;
mod solution;
mod trail;

pub use constraint_operation_error::ConstraintOperationError;
pub(crate) use hash_structures::*;
pub(crate) use moving_averages::CumulativeMovingAverage;
pub use propagation_status_cp::Inconsistency;
pub use propagation_status_cp::PropagationStatusCP;
pub use solution::Solution;
pub(crate) use trail::Trail;
