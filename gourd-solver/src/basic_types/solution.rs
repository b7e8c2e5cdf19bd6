use std::fmt::Display;
use std::fmt::Formatter;

use crate::containers::KeyedVec;
use crate::engine::variables::VariableId;

/// An immutable snapshot of a complete assignment, together with its objective value when the
/// model is being optimised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    values: KeyedVec<VariableId, i32>,
    objective_value: Option<i64>,
}

impl Solution {
    pub(crate) fn new(values: KeyedVec<VariableId, i32>, objective_value: Option<i64>) -> Self {
        Solution {
            values,
            objective_value,
        }
    }

    /// The value assigned to `variable`.
    ///
    /// # Panics
    /// If `variable` was not created by the model this solution belongs to; see
    /// [`Solution::get`] for the non-panicking variant.
    pub fn value(&self, variable: VariableId) -> i32 {
        self.values[variable]
    }

    pub fn get(&self, variable: VariableId) -> Option<i32> {
        self.values.get(variable).copied()
    }

    pub fn objective_value(&self) -> Option<i64> {
        self.objective_value
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    /// Iterates over `(variable, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, i32)> + '_ {
        self.values.keys().zip(self.values.iter().copied())
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (variable, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{variable}={value}")?;
        }
        if let Some(objective) = self.objective_value {
            write!(f, " (objective {objective})")?;
        }
        Ok(())
    }
}
