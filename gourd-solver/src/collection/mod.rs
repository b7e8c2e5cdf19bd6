//! Where the search reports the leaves it accepts.
mod solution_callback;
mod solution_collector;

pub use solution_callback::SolutionCallback;
pub use solution_collector::CollectionMode;
pub use solution_collector::SolutionCollector;
