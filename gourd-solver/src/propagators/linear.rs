use super::Priority;
use super::Propagator;
use crate::basic_types::PropagationStatus;
use crate::basic_types::Solution;
use crate::constraints::Relation;
use crate::engine::variables::VariableId;
use crate::engine::EmptyDomain;
use crate::engine::PropagationContext;
use crate::math::num_ext::NumExt;

/// Bounds-consistent propagator for `sum(a_i * x_i) rel b`.
///
/// Terms are stored merged (every variable occurs once, no zero coefficients) with the constant of
/// the original expression folded into `b`. The model checks on construction that every partial
/// sum of the bounds of the terms fits comfortably in an `i64`, so no arithmetic here overflows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearPropagator {
    terms: Box<[(i64, VariableId)]>,
    relation: Relation,
    rhs: i64,
}

impl LinearPropagator {
    pub(crate) fn new(terms: Vec<(i64, VariableId)>, relation: Relation, rhs: i64) -> Self {
        LinearPropagator {
            terms: terms.into_boxed_slice(),
            relation,
            rhs,
        }
    }

    pub fn terms(&self) -> &[(i64, VariableId)] {
        &self.terms
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn rhs(&self) -> i64 {
        self.rhs
    }

    /// The constraint which holds exactly when this one is violated.
    pub fn negated(&self) -> LinearPropagator {
        let (relation, rhs) = self.relation.negated(self.rhs);
        LinearPropagator {
            terms: self.terms.clone(),
            relation,
            rhs,
        }
    }

    /// The smallest and largest value the left-hand side can take under the current bounds.
    pub(crate) fn lhs_bounds(&self, context: &PropagationContext<'_>) -> (i64, i64) {
        self.terms
            .iter()
            .fold((0, 0), |(lower, upper), &(coefficient, variable)| {
                let (term_lower, term_upper) = term_bounds(context, coefficient, variable);
                (lower + term_lower, upper + term_upper)
            })
    }

    /// Whether every assignment within the current domains satisfies the constraint.
    pub(crate) fn is_entailed(&self, context: &PropagationContext<'_>) -> bool {
        let (lower, upper) = self.lhs_bounds(context);
        match self.relation {
            Relation::LessThanOrEqual => upper <= self.rhs,
            Relation::GreaterThanOrEqual => lower >= self.rhs,
            Relation::Equal => lower == self.rhs && upper == self.rhs,
            Relation::NotEqual => upper < self.rhs || lower > self.rhs,
        }
    }

    /// Propagates `sum(sign * a_i * x_i) <= sign * b`; a sign of `-1` gives the `>=` direction.
    fn propagate_upper_bound(
        &self,
        context: &mut PropagationContext<'_>,
        sign: i64,
    ) -> PropagationStatus {
        let rhs = sign * self.rhs;
        let lower_bounds = self
            .terms
            .iter()
            .map(|&(coefficient, variable)| term_bounds(context, sign * coefficient, variable).0)
            .collect::<Vec<_>>();
        let lhs_lower_bound: i64 = lower_bounds.iter().sum();

        if lhs_lower_bound > rhs {
            return Err(EmptyDomain);
        }

        for (&(coefficient, variable), term_lower_bound) in self.terms.iter().zip(lower_bounds) {
            let coefficient = sign * coefficient;
            // coefficient * variable <= slack must hold for the other terms at their minimum
            let slack = rhs - (lhs_lower_bound - term_lower_bound);

            if coefficient > 0 {
                context.set_upper_bound_wide(variable, slack.floor_div(coefficient))?;
            } else {
                context.set_lower_bound_wide(variable, slack.ceil_div(coefficient))?;
            }
        }

        Ok(())
    }

    fn propagate_not_equal(&self, context: &mut PropagationContext<'_>) -> PropagationStatus {
        let mut fixed_sum = 0;
        let mut unfixed = None;

        for &(coefficient, variable) in self.terms.iter() {
            match context.fixed_value(variable) {
                Some(value) => fixed_sum += coefficient * value as i64,
                None if unfixed.is_none() => unfixed = Some((coefficient, variable)),
                None => return Ok(()),
            }
        }

        match unfixed {
            None if fixed_sum == self.rhs => Err(EmptyDomain),
            None => Ok(()),
            Some((coefficient, variable)) => {
                let remainder = self.rhs - fixed_sum;
                if remainder % coefficient != 0 {
                    return Ok(());
                }
                match i32::try_from(remainder / coefficient) {
                    Ok(forbidden) => context.remove(variable, forbidden),
                    Err(_) => Ok(()),
                }
            }
        }
    }
}

fn term_bounds(context: &PropagationContext<'_>, coefficient: i64, variable: VariableId) -> (i64, i64) {
    let lower = coefficient * context.lower_bound(variable) as i64;
    let upper = coefficient * context.upper_bound(variable) as i64;
    if coefficient >= 0 {
        (lower, upper)
    } else {
        (upper, lower)
    }
}

impl Propagator for LinearPropagator {
    fn name(&self) -> &str {
        "Linear"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn scope(&self) -> Vec<VariableId> {
        self.terms.iter().map(|&(_, variable)| variable).collect()
    }

    fn propagate(&self, context: &mut PropagationContext<'_>) -> PropagationStatus {
        match self.relation {
            Relation::LessThanOrEqual => self.propagate_upper_bound(context, 1),
            Relation::GreaterThanOrEqual => self.propagate_upper_bound(context, -1),
            Relation::Equal => {
                self.propagate_upper_bound(context, 1)?;
                self.propagate_upper_bound(context, -1)
            }
            Relation::NotEqual => self.propagate_not_equal(context),
        }
    }

    fn is_satisfied(&self, solution: &Solution) -> bool {
        let lhs = self
            .terms
            .iter()
            .map(|&(coefficient, variable)| coefficient * solution.value(variable) as i64)
            .sum();
        self.relation.holds(lhs, self.rhs)
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
    fn less_than_or_equal_tightens_upper_bounds() {
        // 2x + 3y <= 12, x in [0, 10], y in [1, 10]
        let mut store = store_with_bounds(&[(0, 10), (1, 10)]);
        let propagator =
            LinearPropagator::new(vec![(2, var(0)), (3, var(1))], Relation::LessThanOrEqual, 12);

        propagator
            .propagate(&mut PropagationContext::new(&mut store))
            .expect("no empty domain");

        assert_eq!(4, store.upper_bound(var(0)));
        assert_eq!(4, store.upper_bound(var(1)));
        assert_eq!(0, store.lower_bound(var(0)));
    }

    #[test]
    fn negative_coefficients_tighten_lower_bounds() {
        // x - y >= 3, x in [0, 5], y in [0, 5]
        let mut store = store_with_bounds(&[(0, 5), (0, 5)]);
        let propagator = LinearPropagator::new(
            vec![(1, var(0)), (-1, var(1))],
            Relation::GreaterThanOrEqual,
            3,
        );

        propagator
            .propagate(&mut PropagationContext::new(&mut store))
            .expect("no empty domain");

        assert_eq!(3, store.lower_bound(var(0)));
        assert_eq!(2, store.upper_bound(var(1)));
    }

    #[test]
    fn rounding_respects_the_sign_of_the_slack() {
        // 3x <= -4 means x <= -2
        let mut store = store_with_bounds(&[(-10, 10)]);
        let propagator = LinearPropagator::new(vec![(3, var(0))], Relation::LessThanOrEqual, -4);

        propagator
            .propagate(&mut PropagationContext::new(&mut store))
            .expect("no empty domain");

        assert_eq!(-2, store.upper_bound(var(0)));
    }

    #[test]
    fn equality_with_unreachable_rhs_fails() {
        let mut store = store_with_bounds(&[(0, 2), (0, 2)]);
        let propagator =
            LinearPropagator::new(vec![(1, var(0)), (1, var(1))], Relation::Equal, 5);

        let result = propagator.propagate(&mut PropagationContext::new(&mut store));

        assert_eq!(Err(EmptyDomain), result);
    }

    #[test]
    fn equality_narrows_both_directions() {
        // x + y == 10, x in [0, 4], y in [0, 9]
        let mut store = store_with_bounds(&[(0, 4), (0, 9)]);
        let propagator =
            LinearPropagator::new(vec![(1, var(0)), (1, var(1))], Relation::Equal, 10);

        propagator
            .propagate(&mut PropagationContext::new(&mut store))
            .expect("no empty domain");

        assert_eq!(1, store.lower_bound(var(0)));
        assert_eq!(6, store.lower_bound(var(1)));
    }

    #[test]
    fn not_equal_waits_until_one_variable_is_left() {
        let mut store = store_with_bounds(&[(0, 3), (0, 3)]);
        let propagator =
            LinearPropagator::new(vec![(1, var(0)), (-1, var(1))], Relation::NotEqual, 0);

        propagator
            .propagate(&mut PropagationContext::new(&mut store))
            .expect("no empty domain");
        assert_eq!(4, store.domain(var(1)).size());

        let _ = store.assign(var(0), 2);
        propagator
            .propagate(&mut PropagationContext::new(&mut store))
            .expect("no empty domain");
        assert_eq!("{0..1, 3}", store.domain(var(1)).to_string());
    }

    #[test]
    fn not_equal_ignores_values_which_are_not_integral() {
        // 2x != 3 never removes anything
        let mut store = store_with_bounds(&[(0, 3)]);
        let propagator = LinearPropagator::new(vec![(2, var(0))], Relation::NotEqual, 3);

        propagator
            .propagate(&mut PropagationContext::new(&mut store))
            .expect("no empty domain");

        assert_eq!(4, store.domain(var(0)).size());
    }

    #[test]
    fn entailment_is_decided_on_bounds() {
        let mut store = store_with_bounds(&[(0, 2), (0, 2)]);
        let propagator =
            LinearPropagator::new(vec![(1, var(0)), (1, var(1))], Relation::LessThanOrEqual, 4);
        let context = PropagationContext::new(&mut store);

        assert!(propagator.is_entailed(&context));
        assert!(!propagator.negated().is_entailed(&context));
    }
}
