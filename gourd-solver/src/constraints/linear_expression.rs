use crate::basic_types::ModelError;
use crate::basic_types::Solution;
use crate::containers::HashSet;
use crate::engine::variables::VariableId;

/// A weighted sum of variables plus a constant: `sum(coefficient * variable) + constant`.
///
/// Used both as the left-hand side of linear constraints and as the objective of a model.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinearExpression {
    terms: Vec<(i32, VariableId)>,
    constant: i64,
}

impl LinearExpression {
    pub fn new(terms: impl IntoIterator<Item = (i32, VariableId)>) -> Self {
        LinearExpression {
            terms: terms.into_iter().collect(),
            constant: 0,
        }
    }

    /// The unweighted sum of `variables`.
    pub fn sum(variables: impl IntoIterator<Item = VariableId>) -> Self {
        LinearExpression::new(variables.into_iter().map(|variable| (1, variable)))
    }

    /// `sum(coefficients[i] * variables[i])`; both slices must have the same length.
    pub fn weighted_sum(coefficients: &[i32], variables: &[VariableId]) -> Result<Self, ModelError> {
        if coefficients.len() != variables.len() {
            return Err(ModelError::LengthMismatch {
                expected: coefficients.len(),
                actual: variables.len(),
            });
        }

        Ok(LinearExpression::new(
            coefficients.iter().copied().zip(variables.iter().copied()),
        ))
    }

    pub fn with_constant(mut self, constant: i64) -> Self {
        self.constant = constant;
        self
    }

    pub fn add_term(&mut self, coefficient: i32, variable: VariableId) {
        self.terms.push((coefficient, variable));
    }

    pub fn terms(&self) -> &[(i32, VariableId)] {
        &self.terms
    }

    pub fn constant(&self) -> i64 {
        self.constant
    }

    pub fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.terms.iter().map(|&(_, variable)| variable)
    }

    /// The value of the expression under `solution`.
    pub fn evaluate(&self, solution: &Solution) -> i64 {
        self.terms
            .iter()
            .map(|&(coefficient, variable)| coefficient as i64 * solution.value(variable) as i64)
            .sum::<i64>()
            + self.constant
    }

    /// The terms with the coefficients of repeated variables summed and zero coefficients
    /// dropped, in order of first occurrence.
    pub(crate) fn merged_terms(&self) -> Vec<(i64, VariableId)> {
        let mut merged: Vec<(i64, VariableId)> = Vec::with_capacity(self.terms.len());
        let mut seen = HashSet::default();

        for &(coefficient, variable) in &self.terms {
            if seen.insert(variable) {
                merged.push((coefficient as i64, variable));
            } else if let Some(term) = merged.iter_mut().find(|(_, other)| *other == variable) {
                term.0 += coefficient as i64;
            }
        }

        merged.retain(|&(coefficient, _)| coefficient != 0);
        merged
    }
}

impl From<VariableId> for LinearExpression {
    fn from(variable: VariableId) -> Self {
        LinearExpression::new([(1, variable)])
    }
}

impl From<Vec<(i32, VariableId)>> for LinearExpression {
    fn from(terms: Vec<(i32, VariableId)>) -> Self {
        LinearExpression::new(terms)
    }
}

impl<const N: usize> From<[(i32, VariableId); N]> for LinearExpression {
    fn from(terms: [(i32, VariableId); N]) -> Self {
        LinearExpression::new(terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_variables_are_merged_and_cancelled_terms_dropped() {
        let x = VariableId::new(0);
        let y = VariableId::new(1);
        let z = VariableId::new(2);

        let expression = LinearExpression::new([(2, y), (3, x), (-2, y), (4, z), (1, x)]);

        assert_eq!(vec![(4, x), (4, z)], expression.merged_terms());
    }

    #[test]
    fn weighted_sums_need_one_coefficient_per_variable() {
        let x = VariableId::new(0);

        assert_eq!(
            Err(ModelError::LengthMismatch {
                expected: 2,
                actual: 1
            }),
            LinearExpression::weighted_sum(&[1, 2], &[x])
        );
        assert_eq!(
            vec![(3, x)],
            LinearExpression::weighted_sum(&[3], &[x]).unwrap().terms()
        );
    }

    #[test]
    fn evaluation_includes_the_constant() {
        let x = VariableId::new(0);
        let y = VariableId::new(1);
        let mut values = crate::containers::KeyedVec::default();
        let _ = values.push(3);
        let _ = values.push(-2);
        let solution = Solution::new(values, None);

        let expression = LinearExpression::new([(2, x), (5, y)]).with_constant(7);

        assert_eq!(3, expression.evaluate(&solution));
    }
}
