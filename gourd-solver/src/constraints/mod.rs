//! The closed set of constraints supported by the solver.
//!
//! Every constraint is a variant of [`Constraint`]; dispatching to its propagator is an
//! exhaustive match, so adding a kind of constraint means handling it everywhere at once.
mod linear_expression;
mod relation;

pub use linear_expression::LinearExpression;
pub use relation::Relation;

pub use crate::propagators::AllDifferentPropagator;
pub use crate::propagators::ElementArray;
pub use crate::propagators::ElementPropagator;
pub use crate::propagators::LinearPropagator;
pub use crate::propagators::ReifiedPropagator;

use crate::basic_types::PropagationResult;
use crate::basic_types::PropagationStatus;
use crate::basic_types::Solution;
use crate::engine::variables::VariableId;
use crate::engine::DomainStore;
use crate::engine::PropagationContext;
use crate::propagators::Priority;
use crate::propagators::Propagator;

/// A constraint posted to a [`Model`](crate::Model).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
    /// `sum(a_i * x_i) rel b`.
    Linear(LinearPropagator),
    /// All variables take pairwise distinct values.
    AllDifferent(AllDifferentPropagator),
    /// `array[index] == target`.
    Element(ElementPropagator),
    /// `literal <-> linear constraint`.
    Reified(ReifiedPropagator),
}

impl Constraint {
    fn propagator(&self) -> &dyn Propagator {
        match self {
            Constraint::Linear(propagator) => propagator,
            Constraint::AllDifferent(propagator) => propagator,
            Constraint::Element(propagator) => propagator,
            Constraint::Reified(propagator) => propagator,
        }
    }

    pub fn name(&self) -> &str {
        self.propagator().name()
    }

    pub(crate) fn priority(&self) -> Priority {
        self.propagator().priority()
    }

    /// The variables the constraint is posted on. A variable occurring more than once in the
    /// constraint is reported more than once.
    pub fn scope(&self) -> Vec<VariableId> {
        self.propagator().scope()
    }

    /// Runs the propagator once on `domains`.
    ///
    /// On [`PropagationResult::Failed`] the domains may be partially narrowed; the caller is
    /// expected to backtrack to a decision level from before the call.
    pub fn propagate(&self, domains: &mut DomainStore) -> PropagationResult {
        let _ = domains.drain_touched();

        let status = self.propagate_in(&mut PropagationContext::new(domains));
        if status.is_err() {
            return PropagationResult::Failed;
        }

        let touched = domains.drain_touched();
        if touched.is_empty() {
            PropagationResult::Unchanged
        } else {
            PropagationResult::Narrowed(touched)
        }
    }

    pub(crate) fn propagate_in(
        &self,
        context: &mut PropagationContext<'_>,
    ) -> PropagationStatus {
        self.propagator().propagate(context)
    }

    /// Whether the constraint holds on a complete assignment.
    pub fn is_satisfied(&self, solution: &Solution) -> bool {
        self.propagator().is_satisfied(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagators::test_helpers::store_with_bounds;

    #[test]
    fn propagation_reports_the_narrowed_variables() {
        let x = VariableId::new(0);
        let y = VariableId::new(1);
        let mut store = store_with_bounds(&[(0, 0), (0, 2)]);
        let constraint = Constraint::AllDifferent(AllDifferentPropagator::new(vec![x, y]));

        assert_eq!(
            PropagationResult::Narrowed(vec![y]),
            constraint.propagate(&mut store)
        );
        assert_eq!(PropagationResult::Unchanged, constraint.propagate(&mut store));
    }

    #[test]
    fn propagation_reports_failure() {
        let x = VariableId::new(0);
        let mut store = store_with_bounds(&[(0, 3)]);
        let constraint =
            Constraint::Linear(LinearPropagator::new(vec![(1, x)], Relation::GreaterThanOrEqual, 4));

        assert!(constraint.propagate(&mut store).is_failed());
    }
}
