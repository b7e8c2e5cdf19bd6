use crate::basic_types::Solution;

/// Called on every solution the search accepts; returning `false` stops the search.
pub trait SolutionCallback {
    fn on_solution(&mut self, solution: &Solution) -> bool;
}

impl<T: FnMut(&Solution) -> bool> SolutionCallback for T {
    fn on_solution(&mut self, solution: &Solution) -> bool {
        (self)(solution)
    }
}

impl<T: SolutionCallback> SolutionCallback for Option<T> {
    fn on_solution(&mut self, solution: &Solution) -> bool {
        match self {
            Some(callback) => callback.on_solution(solution),
            None => true,
        }
    }
}
