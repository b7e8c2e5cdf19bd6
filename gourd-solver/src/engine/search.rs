use std::time::Instant;

use log::debug;
use log::trace;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::asserts::GOURD_ASSERT_LEVEL_DEFINITION;
use crate::asserts::GOURD_ASSERT_MODERATE;
use crate::basic_types::Solution;
use crate::basic_types::SolveResult;
use crate::basic_types::SolveStatus;
use crate::branching::ValueOrdering;
use crate::branching::VariableOrdering;
use crate::collection::SolutionCallback;
use crate::collection::SolutionCollector;
use crate::constraints::Constraint;
use crate::constraints::LinearPropagator;
use crate::constraints::Relation;
use crate::engine::variables::VariableId;
use crate::engine::Domain;
use crate::engine::DomainStore;
use crate::engine::PropagationContext;
use crate::engine::PropagatorQueue;
use crate::engine::SolverStatistics;
use crate::engine::termination::TerminationCondition;
use crate::gourd_assert_eq_simple;
use crate::gourd_assert_moderate;
use crate::model::Objective;
use crate::propagators::Propagator;
use crate::Model;
use crate::SolverOptions;

/// A left branch `variable = value` whose right sibling `variable != value` is still open.
#[derive(Clone, Copy, Debug)]
struct Decision {
    variable: VariableId,
    value: i32,
}

/// Why the main loop of the search stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SearchOutcome {
    /// Every branch was explored or pruned.
    Exhausted,
    /// The collector or the callback asked to stop.
    Stopped,
    /// A termination condition triggered.
    LimitReached,
}

/// Depth-first branch-and-bound over the domains of a [`Model`].
///
/// Each node is propagated to a fixpoint before the search branches on it. Decisions are kept on
/// an explicit stack, and every decision opens a decision level in the [`DomainStore`], so undoing
/// a decision costs time proportional to the domain changes made below it. When the model has an
/// objective, every solution tightens a bounding constraint which requires later solutions to be
/// strictly better; nodes which cannot satisfy it fail during propagation.
pub(crate) struct DepthFirstSearch<'a, Termination, Callback> {
    constraints: &'a [Constraint],
    objective: Option<&'a Objective>,
    domains: DomainStore,
    queue: PropagatorQueue,
    decisions: Vec<Decision>,
    /// The domains before each open decision; only kept when moderate assertions are enabled.
    snapshots: Vec<Vec<Domain>>,
    /// `minimised objective <= best - 1`, present once a solution has been found.
    objective_bound: Option<LinearPropagator>,
    variable_ordering: VariableOrdering,
    value_ordering: ValueOrdering,
    rng: SmallRng,
    collector: SolutionCollector,
    callback: Callback,
    termination: Termination,
    statistics: SolverStatistics,
}

impl<Termination, Callback> std::fmt::Debug for DepthFirstSearch<'_, Termination, Callback> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepthFirstSearch")
            .field("depth", &self.decisions.len())
            .field("statistics", &self.statistics)
            .finish_non_exhaustive()
    }
}

impl<'a, Termination, Callback> DepthFirstSearch<'a, Termination, Callback>
where
    Termination: TerminationCondition,
    Callback: SolutionCallback,
{
    pub(crate) fn new(
        model: &'a Model,
        options: &SolverOptions,
        termination: Termination,
        callback: Callback,
    ) -> Self {
        let constraints = model.constraints();
        DepthFirstSearch {
            constraints,
            objective: model.objective(),
            domains: model.domain_store(),
            queue: PropagatorQueue::new(model.num_variables(), constraints),
            decisions: Vec::new(),
            snapshots: Vec::new(),
            objective_bound: None,
            variable_ordering: options.variable_ordering,
            value_ordering: options.value_ordering,
            rng: SmallRng::seed_from_u64(options.random_seed),
            collector: SolutionCollector::new(options.collection_mode, model.objective().is_some()),
            callback,
            termination,
            statistics: SolverStatistics::default(),
        }
    }

    pub(crate) fn solve(mut self) -> SolveResult {
        let start = Instant::now();

        let outcome = if self.propagate() {
            self.explore()
        } else {
            debug!("Root propagation failed");
            self.statistics.num_failures += 1;
            SearchOutcome::Exhausted
        };

        self.statistics.num_propagations = self.queue.num_propagations();
        self.statistics.time_spent_in_solver_ms = start.elapsed().as_millis() as u64;

        let solutions = self.collector.into_solutions();
        let status = match outcome {
            SearchOutcome::Exhausted if self.statistics.num_solutions > 0 => SolveStatus::Optimal,
            SearchOutcome::Exhausted => SolveStatus::Infeasible,
            SearchOutcome::Stopped => SolveStatus::Feasible,
            SearchOutcome::LimitReached => SolveStatus::LimitReached,
        };

        debug!(
            "Search finished with status {status:?} after {} nodes and {} failures",
            self.statistics.num_nodes, self.statistics.num_failures
        );

        SolveResult {
            status,
            solutions,
            statistics: self.statistics,
        }
    }

    /// Runs the search from a node which has been propagated without failure.
    fn explore(&mut self) -> SearchOutcome {
        loop {
            let Some(variable) = self.variable_ordering.select_variable(&self.domains) else {
                // A leaf can be reached without a new decision, at the root or on a right branch.
                if self.termination.should_stop() {
                    return SearchOutcome::LimitReached;
                }
                if let Some(outcome) = self.on_leaf() {
                    return outcome;
                }
                if !self.backtrack() {
                    return SearchOutcome::Exhausted;
                }
                continue;
            };

            if self.termination.should_stop() {
                return SearchOutcome::LimitReached;
            }

            let value = self
                .value_ordering
                .select_value(self.domains.domain(variable), &mut self.rng);
            self.decide(Decision { variable, value });

            if !self.propagate() {
                self.statistics.num_failures += 1;
                if !self.backtrack() {
                    return SearchOutcome::Exhausted;
                }
            }
        }
    }

    fn decide(&mut self, decision: Decision) {
        trace!(
            "Deciding {} = {} at depth {}",
            decision.variable,
            decision.value,
            self.decisions.len()
        );

        self.termination.node_has_been_explored();
        self.statistics.num_nodes += 1;

        if GOURD_ASSERT_LEVEL_DEFINITION >= GOURD_ASSERT_MODERATE {
            self.snapshots.push(self.current_domains());
        }

        self.domains.increase_decision_level();
        self.decisions.push(decision);
        self.statistics.peak_depth = self.statistics.peak_depth.max(self.decisions.len() as u64);

        let assigned = self.domains.assign(decision.variable, decision.value);
        gourd_assert_eq_simple!(
            Ok(true),
            assigned,
            "decisions are made on unfixed variables with values from their domain"
        );
    }

    /// Undoes decisions until the right branch of one of them propagates without failure. Returns
    /// `false` when no open right branch is left.
    fn backtrack(&mut self) -> bool {
        while let Some(decision) = self.decisions.pop() {
            self.domains.synchronise(self.decisions.len());
            self.statistics.num_backtracks += 1;

            if let Some(snapshot) = self.snapshots.pop() {
                gourd_assert_moderate!(
                    snapshot == self.current_domains(),
                    "backtracking restores the domains from before the decision"
                );
            }

            trace!(
                "Backtracking to depth {}, removing {} from {}",
                self.decisions.len(),
                decision.value,
                decision.variable
            );

            if self
                .domains
                .remove_value(decision.variable, decision.value)
                .is_ok()
                && self.propagate()
            {
                return true;
            }
            self.statistics.num_failures += 1;
        }

        false
    }

    fn current_domains(&self) -> Vec<Domain> {
        self.domains
            .variables()
            .map(|variable| self.domains.domain(variable).clone())
            .collect()
    }

    /// Propagates the constraints and the objective bound to a common fixpoint.
    fn propagate(&mut self) -> bool {
        loop {
            if !self.queue.run(self.constraints, &mut self.domains) {
                return false;
            }

            let Some(bound) = &self.objective_bound else {
                return true;
            };
            if bound
                .propagate(&mut PropagationContext::new(&mut self.domains))
                .is_err()
            {
                let _ = self.domains.drain_touched();
                return false;
            }

            if !self.domains.has_touched() {
                return true;
            }
        }
    }

    /// Reports the assignment at a leaf. Returns the outcome if the search has to stop.
    fn on_leaf(&mut self) -> Option<SearchOutcome> {
        let Some(values) = self.domains.fixed_values() else {
            unreachable!("a leaf has every variable fixed");
        };

        let objective_value = self.objective.map(|objective| {
            let minimised = objective.minimised_value(&values);
            self.tighten_objective_bound(objective, minimised);
            objective.from_minimised(minimised)
        });
        let solution = Solution::new(values, objective_value);

        gourd_assert_moderate!(
            self.constraints
                .iter()
                .all(|constraint| constraint.is_satisfied(&solution)),
            "every constraint holds at a leaf"
        );

        self.statistics.num_solutions += 1;
        self.termination.solution_has_been_found();

        let callback_continues = self.callback.on_solution(&solution);
        let collector_continues = self.collector.on_leaf(solution);

        if !(callback_continues && collector_continues) {
            return Some(SearchOutcome::Stopped);
        }
        if self.termination.should_stop() {
            return Some(SearchOutcome::LimitReached);
        }
        None
    }

    /// Requires every later solution to improve on `minimised`.
    fn tighten_objective_bound(&mut self, objective: &Objective, minimised: i64) {
        debug!(
            "New incumbent with objective value {}",
            objective.from_minimised(minimised)
        );

        self.objective_bound = Some(LinearPropagator::new(
            objective.minimised_terms().to_vec(),
            Relation::LessThanOrEqual,
            minimised - 1 - objective.minimised_constant(),
        ));
    }
}
