use rand::rngs::SmallRng;
use rand::Rng;

use crate::engine::Domain;

/// Which value of the branching variable the search commits to first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ValueOrdering {
    /// The smallest value in the domain.
    #[default]
    MinValue,
    /// The largest value in the domain.
    MaxValue,
    /// The value closest to the midpoint of the bounds; ties go to the smaller value.
    CenterValue,
    /// A uniformly random value in the domain.
    RandomValue,
}

impl ValueOrdering {
    /// Picks a value of `domain`, which must not be empty.
    pub fn select_value(&self, domain: &Domain, rng: &mut SmallRng) -> i32 {
        match self {
            ValueOrdering::MinValue => domain.min(),
            ValueOrdering::MaxValue => domain.max(),
            ValueOrdering::CenterValue => {
                let midpoint = (domain.min() as i64 + domain.max() as i64).div_euclid(2);
                domain.closest_value(midpoint as i32)
            }
            ValueOrdering::RandomValue => {
                let n = rng.gen_range(0..domain.size());
                domain.nth_value(n).unwrap_or_else(|| domain.min())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn center_value_falls_back_to_the_closest_value_below() {
        let domain = Domain::from_values([0, 1, 8, 9, 10]).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);

        // Midpoint 5 is absent; 1 and 8 are 4 and 3 away.
        assert_eq!(8, ValueOrdering::CenterValue.select_value(&domain, &mut rng));

        let domain = Domain::from_values([0, 2, 4]).unwrap();
        assert_eq!(2, ValueOrdering::CenterValue.select_value(&domain, &mut rng));

        let domain = Domain::from_values([-3, 3]).unwrap();
        assert_eq!(-3, ValueOrdering::CenterValue.select_value(&domain, &mut rng));
    }

    #[test]
    fn random_values_come_from_the_domain() {
        let domain = Domain::from_values([-4, 7, 100]).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);

        for _ in 0..50 {
            let value = ValueOrdering::RandomValue.select_value(&domain, &mut rng);
            assert!(domain.contains(value));
        }
    }

    #[test]
    fn bounds_orderings_pick_the_bounds() {
        let domain = Domain::new(-2, 6).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);

        assert_eq!(-2, ValueOrdering::MinValue.select_value(&domain, &mut rng));
        assert_eq!(6, ValueOrdering::MaxValue.select_value(&domain, &mut rng));
    }
}
