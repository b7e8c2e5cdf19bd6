mod model_error;
mod propagation_status;
mod solution;
mod solve_result;
mod trail;

pub use model_error::ModelError;
pub(crate) use propagation_status::PropagationStatus;
pub use propagation_status::PropagationResult;
pub use solution::Solution;
pub use solve_result::SolveResult;
pub use solve_result::SolveStatus;
pub(crate) use trail::Trail;
