//! Small demonstration models: the puzzles and textbook optimisation problems the solver is
//! usually showcased with.
pub(crate) mod assignment;
pub(crate) mod knapsack;
pub(crate) mod queens;
pub(crate) mod send_more_money;
pub(crate) mod set_cover;

use gourd_solver::Model;
use gourd_solver::VariableId;

/// A model together with the variables whose values are printed for each solution.
#[derive(Debug)]
pub(crate) struct Instance {
    pub(crate) model: Model,
    pub(crate) outputs: Vec<VariableId>,
}
