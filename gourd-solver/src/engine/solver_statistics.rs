use crate::create_statistics_struct;
use crate::statistics::log_statistic_postfix;
use crate::statistics::should_log_statistics;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

create_statistics_struct!(
    /// Counters of a single solve, returned in every [`SolveResult`](crate::SolveResult).
    SolverStatistics {
        /// The number of decisions the search committed to
        num_nodes: u64,
        /// The number of nodes at which propagation or the objective bound failed
        num_failures: u64,
        /// The number of times a constraint was propagated
        num_propagations: u64,
        /// The number of leaves accepted as solutions
        num_solutions: u64,
        /// The number of times the search undid a decision
        num_backtracks: u64,
        /// The largest number of decisions on the path from the root
        peak_depth: u64,
        /// Wall-clock time of the solve in milliseconds
        time_spent_in_solver_ms: u64,
    }
);

impl SolverStatistics {
    /// Writes all statistics, followed by the closing line, if statistic logging is configured.
    pub fn log_all(&self) {
        if should_log_statistics() {
            self.log(StatisticLogger::default());
            log_statistic_postfix();
        }
    }
}
