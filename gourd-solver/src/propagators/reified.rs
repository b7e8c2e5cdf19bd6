use super::LinearPropagator;
use super::Priority;
use super::Propagator;
use crate::basic_types::PropagationStatus;
use crate::basic_types::Solution;
use crate::engine::variables::VariableId;
use crate::engine::PropagationContext;

/// Propagator for `literal <-> constraint`, where `literal` is a 0/1 variable and the reified
/// constraint is linear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReifiedPropagator {
    literal: VariableId,
    constraint: LinearPropagator,
    negation: LinearPropagator,
}

impl ReifiedPropagator {
    pub(crate) fn new(literal: VariableId, constraint: LinearPropagator) -> Self {
        let negation = constraint.negated();
        ReifiedPropagator {
            literal,
            constraint,
            negation,
        }
    }

    pub fn literal(&self) -> VariableId {
        self.literal
    }

    pub fn constraint(&self) -> &LinearPropagator {
        &self.constraint
    }
}

impl Propagator for ReifiedPropagator {
    fn name(&self) -> &str {
        "Reified"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn scope(&self) -> Vec<VariableId> {
        let mut scope = vec![self.literal];
        scope.extend(self.constraint.scope());
        scope
    }

    fn propagate(&self, context: &mut PropagationContext<'_>) -> PropagationStatus {
        context.set_lower_bound(self.literal, 0)?;
        context.set_upper_bound(self.literal, 1)?;

        match context.fixed_value(self.literal) {
            Some(1) => self.constraint.propagate(context),
            Some(_) => self.negation.propagate(context),
            None if self.constraint.is_entailed(context) => context.assign(self.literal, 1),
            None if self.negation.is_entailed(context) => context.assign(self.literal, 0),
            None => Ok(()),
        }
    }

    fn is_satisfied(&self, solution: &Solution) -> bool {
        match solution.value(self.literal) {
            1 => self.constraint.is_satisfied(solution),
            0 => !self.constraint.is_satisfied(solution),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::Relation;
    use crate::propagators::test_helpers::store_with_bounds;

    fn var(index: u32) -> VariableId {
        VariableId::new(index)
    }

    /// literal <-> x + y <= 4
    fn propagator() -> ReifiedPropagator {
        ReifiedPropagator::new(
            var(0),
            LinearPropagator::new(vec![(1, var(1)), (1, var(2))], Relation::LessThanOrEqual, 4),
        )
    }

    #[test]
    fn true_literal_enforces_the_constraint() {
        let mut store = store_with_bounds(&[(1, 1), (3, 9), (0, 9)]);

        propagator()
            .propagate(&mut PropagationContext::new(&mut store))
            .expect("no empty domain");

        assert_eq!(4, store.upper_bound(var(1)));
        assert_eq!(1, store.upper_bound(var(2)));
    }

    #[test]
    fn false_literal_enforces_the_negation() {
        let mut store = store_with_bounds(&[(0, 0), (0, 2), (0, 9)]);

        propagator()
            .propagate(&mut PropagationContext::new(&mut store))
            .expect("no empty domain");

        assert_eq!(3, store.lower_bound(var(2)));
    }

    #[test]
    fn entailment_fixes_the_literal() {
        let mut entailed = store_with_bounds(&[(0, 1), (0, 2), (0, 2)]);
        propagator()
            .propagate(&mut PropagationContext::new(&mut entailed))
            .expect("no empty domain");
        assert_eq!(Some(1), entailed.fixed_value(var(0)));

        let mut disentailed = store_with_bounds(&[(0, 1), (3, 5), (2, 5)]);
        propagator()
            .propagate(&mut PropagationContext::new(&mut disentailed))
            .expect("no empty domain");
        assert_eq!(Some(0), disentailed.fixed_value(var(0)));
    }

    #[test]
    fn literal_is_restricted_to_booleans() {
        let mut store = store_with_bounds(&[(-3, 7), (0, 9), (0, 9)]);

        propagator()
            .propagate(&mut PropagationContext::new(&mut store))
            .expect("no empty domain");

        assert_eq!(0, store.lower_bound(var(0)));
        assert_eq!(1, store.upper_bound(var(0)));
    }
}
