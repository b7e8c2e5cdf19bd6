//! Heuristics deciding which variable the search branches on and which value it tries first.
//!
//! The search uses binary branching: with variable `x` and value `v` chosen, the left child
//! commits to `x = v` and the right child to `x != v`.
pub mod tie_breaking;
mod value_ordering;
mod variable_ordering;

pub use value_ordering::ValueOrdering;
pub use variable_ordering::VariableOrdering;
