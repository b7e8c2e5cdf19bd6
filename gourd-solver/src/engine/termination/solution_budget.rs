use super::TerminationCondition;

/// Stops the search once `budget` solutions have been reported.
#[derive(Debug, Copy, Clone)]
pub struct SolutionBudget {
    budget: u64,
    num_solutions: u64,
}

impl SolutionBudget {
    pub fn new(budget: u64) -> Self {
        Self {
            budget,
            num_solutions: 0,
        }
    }
}

impl TerminationCondition for SolutionBudget {
    fn should_stop(&mut self) -> bool {
        self.num_solutions >= self.budget
    }

    fn solution_has_been_found(&mut self) {
        self.num_solutions += 1;
    }
}
