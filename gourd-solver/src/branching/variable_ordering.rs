use log::warn;

use super::tie_breaking::Direction;
use super::tie_breaking::InOrderTieBreaker;
use super::tie_breaking::TieBreaker;
use crate::engine::DomainStore;
use crate::engine::VariableId;

/// Which unfixed variable to branch on. Ties are broken by declaration order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum VariableOrdering {
    /// The first unfixed variable in declaration order.
    #[default]
    FirstUnbound,
    /// The unfixed variable with the fewest values left.
    MinDomainSize,
    /// The unfixed variable with the fewest values left; among those, the one with the smallest
    /// lower bound.
    MinDomainSizeThenMinValue,
}

impl VariableOrdering {
    /// Returns the variable to branch on, or `None` when every variable is fixed.
    pub fn select_variable(&self, domains: &DomainStore) -> Option<VariableId> {
        if domains.num_variables() == 0 {
            warn!("The variable ordering was not provided with any variables");
            return None;
        }

        let mut unfixed = domains
            .variables()
            .filter(|&variable| !domains.is_fixed(variable));

        match self {
            VariableOrdering::FirstUnbound => unfixed.next(),
            VariableOrdering::MinDomainSize => {
                let mut tie_breaker = InOrderTieBreaker::new(Direction::Minimum);
                unfixed.for_each(|variable| {
                    tie_breaker.consider(variable, domains.domain(variable).size())
                });
                tie_breaker.select()
            }
            VariableOrdering::MinDomainSizeThenMinValue => {
                let mut tie_breaker = InOrderTieBreaker::new(Direction::Minimum);
                unfixed.for_each(|variable| {
                    tie_breaker.consider(
                        variable,
                        (
                            domains.domain(variable).size(),
                            domains.lower_bound(variable),
                        ),
                    )
                });
                tie_breaker.select()
            }
        }
    }
}
