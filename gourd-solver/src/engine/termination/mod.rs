//! A [`TerminationCondition`] is polled by the search once per node and after every solution. It
//! indicates when the search should give up, even though the search space has not been exhausted;
//! the solve then ends with [`SolveStatus::LimitReached`](crate::SolveStatus::LimitReached).

pub(crate) mod combinator;
pub(crate) mod indefinite;
pub(crate) mod node_budget;
pub(crate) mod solution_budget;
pub(crate) mod time_budget;

pub use combinator::Combinator;
pub use indefinite::Indefinite;
pub use node_budget::NodeBudget;
pub use solution_budget::SolutionBudget;
pub use time_budget::TimeBudget;

/// The central trait that defines a termination condition.
pub trait TerminationCondition {
    /// Returns `true` when the search should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    /// Called every time the search commits to a decision.
    fn node_has_been_explored(&mut self) {}

    /// Called every time the search reports a solution.
    fn solution_has_been_found(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }

    fn node_has_been_explored(&mut self) {
        if let Some(t) = self {
            t.node_has_been_explored()
        }
    }

    fn solution_has_been_found(&mut self) {
        if let Some(t) = self {
            t.solution_has_been_found()
        }
    }
}
