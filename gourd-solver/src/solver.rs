use std::time::Duration;

use log::debug;

use crate::basic_types::Solution;
use crate::basic_types::SolveResult;
use crate::branching::ValueOrdering;
use crate::branching::VariableOrdering;
use crate::collection::CollectionMode;
use crate::collection::SolutionCallback;
use crate::engine::search::DepthFirstSearch;
use crate::engine::termination::Combinator;
use crate::engine::termination::Indefinite;
use crate::engine::termination::NodeBudget;
use crate::engine::termination::SolutionBudget;
use crate::engine::termination::TimeBudget;
use crate::engine::TerminationCondition;
use crate::Model;

/// Deterministic caps on the search. Reaching any of them ends the solve with
/// [`SolveStatus::LimitReached`](crate::SolveStatus::LimitReached).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// The maximum number of decisions.
    pub node_limit: Option<u64>,
    /// The maximum wall-clock time, measured from the start of the solve.
    pub time_limit: Option<Duration>,
    /// The maximum number of solutions.
    pub solution_limit: Option<u64>,
}

impl SearchLimits {
    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = Some(node_limit);
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    pub fn with_solution_limit(mut self, solution_limit: u64) -> Self {
        self.solution_limit = Some(solution_limit);
        self
    }

    /// The termination condition enforcing these limits; the time budget starts now.
    pub fn termination(&self) -> impl TerminationCondition {
        Combinator::new(
            self.node_limit.map(NodeBudget::new),
            Combinator::new(
                self.time_limit.map(TimeBudget::starting_now),
                self.solution_limit.map(SolutionBudget::new),
            ),
        )
    }
}

/// How the [`Solver`] searches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverOptions {
    pub variable_ordering: VariableOrdering,
    pub value_ordering: ValueOrdering,
    pub collection_mode: CollectionMode,
    pub limits: SearchLimits,
    /// Seed of the random generator used by [`ValueOrdering::RandomValue`].
    pub random_seed: u64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            variable_ordering: VariableOrdering::FirstUnbound,
            value_ordering: ValueOrdering::MinValue,
            collection_mode: CollectionMode::First,
            limits: SearchLimits::default(),
            random_seed: 42,
        }
    }
}

/// Solves [`Model`]s by depth-first branch-and-bound with constraint propagation.
///
/// The solver holds only its options; every call to [`Solver::solve`] starts from the initial
/// domains of the model, so solving twice gives the same result.
///
/// # Example
/// ```rust
/// # use gourd_solver::CollectionMode;
/// # use gourd_solver::Model;
/// # use gourd_solver::Solver;
/// # use gourd_solver::SolverOptions;
/// # use gourd_solver::SolveStatus;
/// let mut model = Model::default();
/// let x = model.new_int_var(0, 2, "x")?;
/// let y = model.new_int_var(0, 2, "y")?;
/// model.add_all_different([x, y])?;
///
/// let solver = Solver::new(SolverOptions {
///     collection_mode: CollectionMode::All,
///     ..Default::default()
/// });
/// let result = solver.solve(&model);
///
/// assert_eq!(SolveStatus::Optimal, result.status);
/// assert_eq!(6, result.solutions.len());
/// # Ok::<(), gourd_solver::ModelError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Solver {
    options: SolverOptions,
}

impl Solver {
    pub fn new(options: SolverOptions) -> Self {
        Solver { options }
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    pub fn solve(&self, model: &Model) -> SolveResult {
        self.solve_with_callback(model, None::<fn(&Solution) -> bool>)
    }

    /// Solves `model`, calling `callback` on every accepted solution before it is collected.
    /// The search stops when the callback returns `false`.
    pub fn solve_with_callback(
        &self,
        model: &Model,
        callback: impl SolutionCallback,
    ) -> SolveResult {
        self.solve_with_termination(model, Indefinite, callback)
    }

    /// Like [`Solver::solve_with_callback`], with an additional termination condition on top of
    /// the configured [`SearchLimits`].
    pub fn solve_with_termination(
        &self,
        model: &Model,
        termination: impl TerminationCondition,
        callback: impl SolutionCallback,
    ) -> SolveResult {
        debug!(
            "Solving a model with {} variables and {} constraints ({:?}, {:?}, {:?})",
            model.num_variables(),
            model.constraints().len(),
            self.options.variable_ordering,
            self.options.value_ordering,
            self.options.collection_mode,
        );

        let termination = Combinator::new(self.options.limits.termination(), termination);
        DepthFirstSearch::new(model, &self.options, termination, callback).solve()
    }
}
