//! The propagation algorithms behind each kind of [`Constraint`](crate::constraints::Constraint).
//!
//! A propagator removes values which cannot take part in any solution of its constraint, given
//! the current domains. None of them is complete; completeness comes from the search, which only
//! accepts a leaf once every variable is fixed and every propagator has run without failing.
mod all_different;
mod element;
mod linear;
mod reified;

pub use all_different::AllDifferentPropagator;
pub use element::ElementArray;
pub use element::ElementPropagator;
pub use linear::LinearPropagator;
pub use reified::ReifiedPropagator;

use crate::basic_types::PropagationStatus;
use crate::basic_types::Solution;
use crate::engine::variables::VariableId;
use crate::engine::PropagationContext;

/// The order in which enqueued propagators are run; cheaper propagators go first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub(crate) enum Priority {
    High = 0,
    Medium = 1,
    #[default]
    Low = 2,
}

impl Priority {
    pub(crate) const NUM_PRIORITIES: usize = 3;
}

pub(crate) trait Propagator {
    /// Name used in logging.
    fn name(&self) -> &str;

    fn priority(&self) -> Priority;

    /// The variables whose domains this propagator reads.
    fn scope(&self) -> Vec<VariableId>;

    /// Removes unsupported values from the domains of the scope. Fails with
    /// [`EmptyDomain`](crate::engine::EmptyDomain) as soon as a domain would become empty.
    fn propagate(&self, context: &mut PropagationContext<'_>) -> PropagationStatus;

    /// Whether the constraint holds on a complete assignment.
    fn is_satisfied(&self, solution: &Solution) -> bool;
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use crate::engine::Domain;
    use crate::engine::DomainStore;

    pub(crate) fn store_with_bounds(bounds: &[(i32, i32)]) -> DomainStore {
        DomainStore::new(
            bounds
                .iter()
                .map(|&(lower, upper)| Domain::new(lower, upper).unwrap()),
        )
    }
}
