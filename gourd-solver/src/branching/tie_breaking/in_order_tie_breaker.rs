use super::Direction;
use super::TieBreaker;

/// A tie-breaker which keeps the first variable it receives with the best value according to the
/// provided [`Direction`]; later variables with an equal value do not replace it.
#[derive(Debug)]
pub struct InOrderTieBreaker<Var, Value> {
    selected: Option<(Var, Value)>,
    direction: Direction,
}

impl<Var, Value> InOrderTieBreaker<Var, Value> {
    pub fn new(direction: Direction) -> Self {
        Self {
            selected: None,
            direction,
        }
    }
}

impl<Var: Copy, Value: PartialOrd> TieBreaker<Var, Value> for InOrderTieBreaker<Var, Value> {
    fn consider(&mut self, variable: Var, value: Value) {
        let improves = match &self.selected {
            None => true,
            Some((_, selected_value)) => match self.direction {
                Direction::Maximum => value > *selected_value,
                Direction::Minimum => value < *selected_value,
            },
        };

        if improves {
            self.selected = Some((variable, value));
        }
    }

    fn select(&mut self) -> Option<Var> {
        self.selected.take().map(|(variable, _)| variable)
    }

    fn get_direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::VariableId;

    #[test]
    fn first_of_equal_values_is_selected() {
        let mut breaker = InOrderTieBreaker::new(Direction::Minimum);

        breaker.consider(VariableId::new(0), 10);
        breaker.consider(VariableId::new(1), 10);
        breaker.consider(VariableId::new(2), 10);

        assert_eq!(Some(VariableId::new(0)), breaker.select());
    }

    #[test]
    fn lowest_value_is_selected() {
        let mut breaker = InOrderTieBreaker::new(Direction::Minimum);

        breaker.consider(VariableId::new(0), 10);
        breaker.consider(VariableId::new(1), 5);
        breaker.consider(VariableId::new(2), 10);

        assert_eq!(Some(VariableId::new(1)), breaker.select());
    }

    #[test]
    fn selecting_resets_the_breaker() {
        let mut breaker = InOrderTieBreaker::new(Direction::Maximum);

        breaker.consider(VariableId::new(3), 1);
        assert_eq!(Some(VariableId::new(3)), breaker.select());
        assert_eq!(None, breaker.select());
    }
}
