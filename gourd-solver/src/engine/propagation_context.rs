use crate::basic_types::PropagationStatus;
use crate::engine::variables::VariableId;
use crate::engine::Domain;
use crate::engine::DomainStore;
use crate::engine::EmptyDomain;

/// The view of the domains handed to a propagator.
///
/// Reads go straight to the [`DomainStore`]; every write is trailed by the store so that it is
/// undone on backtracking, and fails with [`EmptyDomain`](crate::engine::EmptyDomain) instead of
/// emptying a domain.
#[derive(Debug)]
pub(crate) struct PropagationContext<'a> {
    domains: &'a mut DomainStore,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(domains: &'a mut DomainStore) -> Self {
        PropagationContext { domains }
    }

    pub(crate) fn domain(&self, variable: VariableId) -> &Domain {
        self.domains.domain(variable)
    }

    pub(crate) fn lower_bound(&self, variable: VariableId) -> i32 {
        self.domains.lower_bound(variable)
    }

    pub(crate) fn upper_bound(&self, variable: VariableId) -> i32 {
        self.domains.upper_bound(variable)
    }

    pub(crate) fn contains(&self, variable: VariableId, value: i32) -> bool {
        self.domains.contains(variable, value)
    }

    pub(crate) fn is_fixed(&self, variable: VariableId) -> bool {
        self.domains.is_fixed(variable)
    }

    pub(crate) fn fixed_value(&self, variable: VariableId) -> Option<i32> {
        self.domains.fixed_value(variable)
    }

    pub(crate) fn set_lower_bound(&mut self, variable: VariableId, bound: i32) -> PropagationStatus {
        self.domains.set_lower_bound(variable, bound).map(drop)
    }

    pub(crate) fn set_upper_bound(&mut self, variable: VariableId, bound: i32) -> PropagationStatus {
        self.domains.set_upper_bound(variable, bound).map(drop)
    }

    /// Tightens the lower bound to `bound`, which may lie outside the 32-bit range.
    pub(crate) fn set_lower_bound_wide(&mut self, variable: VariableId, bound: i64) -> PropagationStatus {
        if bound <= self.lower_bound(variable) as i64 {
            return Ok(());
        }
        if bound > self.upper_bound(variable) as i64 {
            return Err(EmptyDomain);
        }
        // Between the current bounds, so it fits.
        self.set_lower_bound(variable, bound as i32)
    }

    /// Tightens the upper bound to `bound`, which may lie outside the 32-bit range.
    pub(crate) fn set_upper_bound_wide(&mut self, variable: VariableId, bound: i64) -> PropagationStatus {
        if bound >= self.upper_bound(variable) as i64 {
            return Ok(());
        }
        if bound < self.lower_bound(variable) as i64 {
            return Err(EmptyDomain);
        }
        self.set_upper_bound(variable, bound as i32)
    }

    pub(crate) fn remove(&mut self, variable: VariableId, value: i32) -> PropagationStatus {
        self.domains.remove_value(variable, value).map(drop)
    }

    pub(crate) fn assign(&mut self, variable: VariableId, value: i32) -> PropagationStatus {
        self.domains.assign(variable, value).map(drop)
    }

    pub(crate) fn intersect(&mut self, variable: VariableId, other: &Domain) -> PropagationStatus {
        self.domains.intersect(variable, other).map(drop)
    }

    pub(crate) fn retain(
        &mut self,
        variable: VariableId,
        keep: impl FnMut(&i32) -> bool,
    ) -> PropagationStatus {
        self.domains.retain(variable, keep).map(drop)
    }
}
