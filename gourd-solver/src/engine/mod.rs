mod domain;
mod domain_store;
mod propagation_context;
mod propagator_queue;
pub(crate) mod search;
mod solver_statistics;
pub mod termination;
pub(crate) mod variables;

pub use domain::Domain;
pub use domain::Interval;
pub use domain_store::DomainStore;
pub use domain_store::EmptyDomain;
pub(crate) use propagation_context::PropagationContext;
pub use propagator_queue::PropagatorQueue;
pub use solver_statistics::SolverStatistics;
pub(crate) use termination::TerminationCondition;
pub use variables::VariableId;
