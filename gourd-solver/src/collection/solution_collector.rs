use log::warn;

use crate::basic_types::Solution;
use crate::gourd_assert_moderate;

/// Which of the accepted leaves are kept, and whether the search continues after one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CollectionMode {
    /// Keep the first solution and stop.
    #[default]
    First,
    /// Keep every solution. When optimising, the objective bound still prunes, so these are the
    /// successively improving solutions.
    All,
    /// Keep only the best solution, searching until it is proven optimal. Without an objective
    /// this is the same as [`CollectionMode::First`].
    Best,
}

/// Stores the solutions reported by the search according to a [`CollectionMode`].
#[derive(Clone, Debug)]
pub struct SolutionCollector {
    mode: CollectionMode,
    is_optimising: bool,
    solutions: Vec<Solution>,
}

impl SolutionCollector {
    pub fn new(mode: CollectionMode, is_optimising: bool) -> Self {
        if mode == CollectionMode::Best && !is_optimising {
            warn!("Collecting the best solution of a model without objective, stopping at the first solution");
        }

        SolutionCollector {
            mode,
            is_optimising,
            solutions: Vec::new(),
        }
    }

    pub fn mode(&self) -> CollectionMode {
        self.mode
    }

    /// Records an accepted leaf and returns whether the search should continue.
    pub fn on_leaf(&mut self, solution: Solution) -> bool {
        match self.mode {
            CollectionMode::First => {
                self.solutions.push(solution);
                false
            }
            CollectionMode::All => {
                self.solutions.push(solution);
                true
            }
            CollectionMode::Best if self.is_optimising => {
                gourd_assert_moderate!(
                    solution.objective_value().is_some(),
                    "solutions of an optimisation problem carry their objective value"
                );
                self.solutions.clear();
                self.solutions.push(solution);
                true
            }
            CollectionMode::Best => {
                self.solutions.push(solution);
                false
            }
        }
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }
}
