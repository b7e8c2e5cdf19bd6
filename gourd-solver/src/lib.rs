//! # Gourd
//! Gourd is a small finite-domain constraint programming solver with branch-and-bound
//! optimisation.
//!
//! A problem is stated as a [`Model`]: integer variables with finite domains, constraints over
//! them and optionally a linear objective. The supported constraints are
//! * linear (in)equalities `sum(a_i * x_i) rel b` with `rel` one of `<=`, `==`, `>=`, `!=`
//!   ([`Model::add_linear`]),
//! * [`Model::add_all_different`],
//! * element constraints `array[index] == target` over constants or variables
//!   ([`Model::add_element`]),
//! * reified linear constraints `b <-> sum(a_i * x_i) rel b` ([`Model::add_reified`]).
//!
//! A [`Solver`] explores the model depth-first. Each node is propagated to a fixpoint; linear
//! constraints are bounds consistent, all-different removes the values of fixed variables from
//! the others. Solutions are collected according to a [`CollectionMode`].
//!
//! # Example
//! ```rust
//! # use gourd_solver::CollectionMode;
//! # use gourd_solver::LinearExpression;
//! # use gourd_solver::Model;
//! # use gourd_solver::Relation;
//! # use gourd_solver::Solver;
//! # use gourd_solver::SolverOptions;
//! # use gourd_solver::SolveStatus;
//! let mut model = Model::default();
//! let items = (0..3)
//!     .map(|i| model.new_bool_var(format!("take_{i}")))
//!     .collect::<Vec<_>>();
//!
//! // Weights 4, 3 and 2 with capacity 6; values 5, 4 and 3.
//! model.add_linear(
//!     LinearExpression::weighted_sum(&[4, 3, 2], &items)?,
//!     Relation::LessThanOrEqual,
//!     6,
//! )?;
//! model.maximize(LinearExpression::weighted_sum(&[5, 4, 3], &items)?)?;
//!
//! let solver = Solver::new(SolverOptions {
//!     collection_mode: CollectionMode::Best,
//!     ..Default::default()
//! });
//! let result = solver.solve(&model);
//!
//! assert_eq!(SolveStatus::Optimal, result.status);
//! assert_eq!(Some(8), result.objective_value());
//! # Ok::<(), gourd_solver::ModelError>(())
//! ```
pub mod asserts;
mod basic_types;
pub mod branching;
pub mod collection;
pub mod constraints;
pub mod containers;
mod engine;
pub(crate) mod math;
mod model;
pub(crate) mod propagators;
mod solver;
pub mod statistics;

pub use basic_types::ModelError;
pub use basic_types::PropagationResult;
pub use basic_types::Solution;
pub use basic_types::SolveResult;
pub use basic_types::SolveStatus;
pub use branching::ValueOrdering;
pub use branching::VariableOrdering;
pub use collection::CollectionMode;
pub use collection::SolutionCallback;
pub use constraints::Constraint;
pub use constraints::ElementArray;
pub use constraints::LinearExpression;
pub use constraints::Relation;
pub use engine::termination;
pub use engine::Domain;
pub use engine::DomainStore;
pub use engine::EmptyDomain;
pub use engine::Interval;
pub use engine::PropagatorQueue;
pub use engine::SolverStatistics;
pub use engine::VariableId;
pub use model::Model;
pub use model::Objective;
pub use model::OptimisationDirection;
pub use solver::SearchLimits;
pub use solver::Solver;
pub use solver::SolverOptions;
