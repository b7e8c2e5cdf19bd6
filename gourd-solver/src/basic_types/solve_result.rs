use super::Solution;
use crate::engine::SolverStatistics;

/// How a call to [`Solver::solve`](crate::Solver::solve) ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// The search space was exhausted and at least one solution was found. When optimising, the
    /// best collected solution is proven optimal.
    Optimal,
    /// Solutions were found, but the search was stopped by the collector or a callback before the
    /// search space was exhausted.
    Feasible,
    /// The search space was exhausted without finding a solution.
    Infeasible,
    /// A node, time or solution limit stopped the search. Any solutions found before the limit are
    /// still reported.
    LimitReached,
}

/// The outcome of a solve: its status, the collected solutions and the search statistics.
#[derive(Clone, Debug)]
pub struct SolveResult {
    pub status: SolveStatus,
    pub solutions: Vec<Solution>,
    pub statistics: SolverStatistics,
}

impl SolveResult {
    /// The last collected solution. For optimisation problems this is the best one found.
    pub fn best_solution(&self) -> Option<&Solution> {
        self.solutions.last()
    }

    pub fn objective_value(&self) -> Option<i64> {
        self.best_solution().and_then(Solution::objective_value)
    }

    pub fn has_solution(&self) -> bool {
        !self.solutions.is_empty()
    }
}
