use super::Priority;
use super::Propagator;
use crate::basic_types::PropagationStatus;
use crate::basic_types::Solution;
use crate::containers::HashSet;
use crate::engine::variables::VariableId;
use crate::engine::EmptyDomain;
use crate::engine::PropagationContext;

/// Value-elimination propagator for `all_different(x_1, ..., x_n)`.
///
/// The value of every fixed variable is removed from all other variables, cascading when a
/// removal fixes another variable. On top of that the propagator fails when the variables are
/// spread over fewer values than there are variables. No Hall-set reasoning is done.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllDifferentPropagator {
    variables: Box<[VariableId]>,
}

impl AllDifferentPropagator {
    pub(crate) fn new(variables: Vec<VariableId>) -> Self {
        AllDifferentPropagator {
            variables: variables.into_boxed_slice(),
        }
    }

    pub fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    fn check_value_span(&self, context: &PropagationContext<'_>) -> PropagationStatus {
        let (lower, upper) = self
            .variables
            .iter()
            .fold((i64::MAX, i64::MIN), |(lower, upper), &variable| {
                (
                    lower.min(context.lower_bound(variable) as i64),
                    upper.max(context.upper_bound(variable) as i64),
                )
            });

        if upper - lower + 1 < self.variables.len() as i64 {
            return Err(EmptyDomain);
        }
        Ok(())
    }
}

impl Propagator for AllDifferentPropagator {
    fn name(&self) -> &str {
        "AllDifferent"
    }

    fn priority(&self) -> Priority {
        Priority::Medium
    }

    fn scope(&self) -> Vec<VariableId> {
        self.variables.to_vec()
    }

    fn propagate(&self, context: &mut PropagationContext<'_>) -> PropagationStatus {
        if self.variables.is_empty() {
            return Ok(());
        }
        self.check_value_span(context)?;

        let mut worklist = self
            .variables
            .iter()
            .enumerate()
            .filter(|&(_, &variable)| context.is_fixed(variable))
            .map(|(position, _)| position)
            .collect::<Vec<_>>();

        while let Some(position) = worklist.pop() {
            let variable = self.variables[position];
            let Some(value) = context.fixed_value(variable) else {
                continue;
            };

            for (other_position, &other) in self.variables.iter().enumerate() {
                if other_position == position || !context.contains(other, value) {
                    continue;
                }

                // A repeated variable fixed to `value` fails here, as it should.
                context.remove(other, value)?;

                if context.is_fixed(other) {
                    worklist.push(other_position);
                }
            }
        }

        Ok(())
    }

    fn is_satisfied(&self, solution: &Solution) -> bool {
        let mut seen = HashSet::default();
        self.variables
            .iter()
            .all(|&variable| seen.insert(solution.value(variable)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagators::test_helpers::store_with_bounds;

    fn var(index: u32) -> VariableId {
        VariableId::new(index)
    }

    #[test]
    fn fixed_values_are_removed_from_the_others() {
        let mut store = store_with_bounds(&[(1, 1), (1, 3), (1, 3)]);
        let propagator = AllDifferentPropagator::new(vec![var(0), var(1), var(2)]);

        propagator
            .propagate(&mut PropagationContext::new(&mut store))
            .expect("no empty domain");

        assert_eq!(2, store.lower_bound(var(1)));
        assert_eq!(2, store.lower_bound(var(2)));
    }

    #[test]
    fn removals_cascade_through_newly_fixed_variables() {
        let mut store = store_with_bounds(&[(1, 1), (1, 2), (1, 3)]);
        let propagator = AllDifferentPropagator::new(vec![var(0), var(1), var(2)]);

        propagator
            .propagate(&mut PropagationContext::new(&mut store))
            .expect("no empty domain");

        assert_eq!(Some(2), store.fixed_value(var(1)));
        assert_eq!(Some(3), store.fixed_value(var(2)));
    }

    #[test]
    fn two_variables_fixed_to_the_same_value_fail() {
        let mut store = store_with_bounds(&[(4, 4), (0, 9), (4, 4)]);
        let propagator = AllDifferentPropagator::new(vec![var(0), var(1), var(2)]);

        let result = propagator.propagate(&mut PropagationContext::new(&mut store));

        assert_eq!(Err(EmptyDomain), result);
    }

    #[test]
    fn too_few_values_for_the_variables_fail() {
        let mut store = store_with_bounds(&[(0, 1), (0, 1), (0, 1)]);
        let propagator = AllDifferentPropagator::new(vec![var(0), var(1), var(2)]);

        let result = propagator.propagate(&mut PropagationContext::new(&mut store));

        assert_eq!(Err(EmptyDomain), result);
    }

    #[test]
    fn satisfaction_requires_pairwise_distinct_values() {
        let mut values = crate::containers::KeyedVec::default();
        for value in [3, 1, 3] {
            let _ = values.push(value);
        }
        let solution = Solution::new(values, None);

        assert!(AllDifferentPropagator::new(vec![var(0), var(1)]).is_satisfied(&solution));
        assert!(!AllDifferentPropagator::new(vec![var(0), var(2)]).is_satisfied(&solution));
    }
}
