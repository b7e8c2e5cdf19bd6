mod in_order_tie_breaker;

pub use in_order_tie_breaker::InOrderTieBreaker;

/// Whether a [`TieBreaker`] keeps the smallest or the largest value it considers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Maximum,
    Minimum,
}

/// Picks one variable out of a stream of `(variable, value)` candidates.
pub trait TieBreaker<Var, Value> {
    /// Offers a candidate.
    fn consider(&mut self, variable: Var, value: Value);

    /// Returns the chosen candidate, if any was considered, and forgets all candidates.
    fn select(&mut self) -> Option<Var>;

    fn get_direction(&self) -> Direction;
}
