use std::fmt::Display;
use std::fmt::Formatter;

/// The comparison between a linear expression and its bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    LessThanOrEqual,
    Equal,
    GreaterThanOrEqual,
    NotEqual,
}

impl Relation {
    /// Returns the relation and bound which hold exactly when `lhs self bound` does not.
    ///
    /// Integer semantics are used, so `lhs <= b` is negated into `lhs >= b + 1`.
    pub fn negated(self, bound: i64) -> (Relation, i64) {
        match self {
            Relation::LessThanOrEqual => (Relation::GreaterThanOrEqual, bound + 1),
            Relation::GreaterThanOrEqual => (Relation::LessThanOrEqual, bound - 1),
            Relation::Equal => (Relation::NotEqual, bound),
            Relation::NotEqual => (Relation::Equal, bound),
        }
    }

    /// Whether `lhs self rhs` holds.
    pub fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Relation::LessThanOrEqual => lhs <= rhs,
            Relation::Equal => lhs == rhs,
            Relation::GreaterThanOrEqual => lhs >= rhs,
            Relation::NotEqual => lhs != rhs,
        }
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Relation::LessThanOrEqual => "<=",
            Relation::Equal => "==",
            Relation::GreaterThanOrEqual => ">=",
            Relation::NotEqual => "!=",
        };
        write!(f, "{symbol}")
    }
}
