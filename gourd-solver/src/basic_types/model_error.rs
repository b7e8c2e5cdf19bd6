use thiserror::Error;

use crate::engine::variables::VariableId;
#[cfg(doc)]
use crate::Model;

/// Errors raised while building a [`Model`].
///
/// A call which returns an error leaves the model exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A variable was created with a lower bound exceeding its upper bound.
    #[error("variable '{name}' has lower bound {lower_bound} which exceeds its upper bound {upper_bound}")]
    InvalidBounds {
        name: String,
        lower_bound: i32,
        upper_bound: i32,
    },
    /// A variable was created from an empty set of values.
    #[error("variable '{name}' was created from an empty set of values")]
    EmptyValueSet { name: String },
    /// A constraint or objective refers to a variable which does not belong to the model.
    #[error("variable {0} does not belong to this model")]
    UnknownVariable(VariableId),
    /// An element constraint was posted over an empty array.
    #[error("the array of an element constraint cannot be empty")]
    EmptyElementArray,
    /// Two inputs which should have the same length do not.
    #[error("expected {expected} elements but received {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// The constraint cannot be represented by the engine.
    #[error("unsupported constraint: {0}")]
    UnsupportedConstraint(String),
    /// The bounds of a linear expression do not fit in 64-bit arithmetic.
    #[error("arithmetic overflow in {0}")]
    Overflow(String),
    /// An objective was set on a model which already has one.
    #[error("the model already has an objective")]
    ObjectiveAlreadySet,
}
