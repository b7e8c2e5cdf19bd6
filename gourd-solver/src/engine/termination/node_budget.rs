use super::TerminationCondition;

/// Stops the search once it has committed to `budget` decisions.
#[derive(Debug, Copy, Clone)]
pub struct NodeBudget {
    budget: u64,
    num_nodes: u64,
}

impl NodeBudget {
    pub fn new(budget: u64) -> Self {
        Self {
            budget,
            num_nodes: 0,
        }
    }
}

impl TerminationCondition for NodeBudget {
    fn should_stop(&mut self) -> bool {
        self.num_nodes >= self.budget
    }

    fn node_has_been_explored(&mut self) {
        self.num_nodes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_after_the_budget_is_spent() {
        let mut budget = NodeBudget::new(2);

        budget.node_has_been_explored();
        assert!(!budget.should_stop());
        budget.node_has_been_explored();
        assert!(budget.should_stop());
    }

    #[test]
    fn zero_budget_stops_immediately() {
        assert!(NodeBudget::new(0).should_stop());
    }
}
