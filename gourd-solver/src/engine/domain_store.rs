use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::engine::variables::VariableId;
use crate::engine::Domain;
use crate::gourd_assert_simple;

/// The error returned by a domain operation which would remove the last value of a domain.
///
/// The operation is not applied; the store never holds an empty domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

/// The previous state of a domain, recorded before it was first narrowed.
#[derive(Clone, Debug)]
struct DomainChange {
    variable: VariableId,
    previous: Domain,
}

/// The current domains of all variables, together with the trail which undoes every change when
/// the search backtracks.
///
/// Every mutation first pushes the old domain onto the trail, so synchronising to a decision
/// level restores exactly the domains which were present when that level was entered; the cost
/// of backtracking is proportional to the number of changes, not to the number of variables.
#[derive(Clone, Debug, Default)]
pub struct DomainStore {
    domains: KeyedVec<VariableId, Domain>,
    trail: Trail<DomainChange>,
    /// Variables narrowed since the last call to [`DomainStore::drain_touched`].
    touched: Vec<VariableId>,
    is_touched: KeyedVec<VariableId, bool>,
}

impl DomainStore {
    pub(crate) fn new(domains: impl IntoIterator<Item = Domain>) -> DomainStore {
        let mut store = DomainStore::default();
        for domain in domains {
            gourd_assert_simple!(!domain.is_empty());
            let _ = store.domains.push(domain);
        }
        store.is_touched.resize(store.domains.len(), false);
        store
    }

    pub fn num_variables(&self) -> usize {
        self.domains.len()
    }

    pub fn variables(&self) -> impl Iterator<Item = VariableId> {
        self.domains.keys()
    }

    pub fn domain(&self, variable: VariableId) -> &Domain {
        &self.domains[variable]
    }

    pub fn lower_bound(&self, variable: VariableId) -> i32 {
        self.domains[variable].min()
    }

    pub fn upper_bound(&self, variable: VariableId) -> i32 {
        self.domains[variable].max()
    }

    pub fn contains(&self, variable: VariableId, value: i32) -> bool {
        self.domains[variable].contains(value)
    }

    pub fn is_fixed(&self, variable: VariableId) -> bool {
        self.domains[variable].is_fixed()
    }

    /// The value of `variable` if its domain is a singleton.
    pub fn fixed_value(&self, variable: VariableId) -> Option<i32> {
        let domain = &self.domains[variable];
        domain.is_fixed().then(|| domain.min())
    }

    pub fn all_fixed(&self) -> bool {
        self.domains.iter().all(Domain::is_fixed)
    }

    pub fn decision_level(&self) -> usize {
        self.trail.get_decision_level()
    }

    /// Opens a new decision level; changes made from now on are undone by synchronising to the
    /// current level.
    pub fn increase_decision_level(&mut self) {
        self.trail.increase_decision_level();
    }

    /// Restores every domain to its state at the start of `decision_level + 1`.
    pub fn synchronise(&mut self, decision_level: usize) {
        for change in self.trail.synchronise(decision_level) {
            self.domains[change.variable] = change.previous;
        }
        let _ = self.drain_touched();
    }

    pub(crate) fn has_touched(&self) -> bool {
        !self.touched.is_empty()
    }

    /// Returns the variables narrowed since the previous call, in the order they were first
    /// narrowed.
    pub(crate) fn drain_touched(&mut self) -> Vec<VariableId> {
        let touched = std::mem::take(&mut self.touched);
        for &variable in &touched {
            self.is_touched[variable] = false;
        }
        touched
    }

    fn record(&mut self, variable: VariableId) {
        self.trail.push(DomainChange {
            variable,
            previous: self.domains[variable].clone(),
        });

        if !self.is_touched[variable] {
            self.is_touched[variable] = true;
            self.touched.push(variable);
        }
    }

    /// Removes all values below `bound`.
    pub fn set_lower_bound(&mut self, variable: VariableId, bound: i32) -> Result<bool, EmptyDomain> {
        if bound <= self.lower_bound(variable) {
            return Ok(false);
        }
        if bound > self.upper_bound(variable) {
            return Err(EmptyDomain);
        }

        self.record(variable);
        let _ = self.domains[variable].remove_below(bound);
        Ok(true)
    }

    /// Removes all values above `bound`.
    pub fn set_upper_bound(&mut self, variable: VariableId, bound: i32) -> Result<bool, EmptyDomain> {
        if bound >= self.upper_bound(variable) {
            return Ok(false);
        }
        if bound < self.lower_bound(variable) {
            return Err(EmptyDomain);
        }

        self.record(variable);
        let _ = self.domains[variable].remove_above(bound);
        Ok(true)
    }

    pub fn remove_value(&mut self, variable: VariableId, value: i32) -> Result<bool, EmptyDomain> {
        if !self.contains(variable, value) {
            return Ok(false);
        }
        if self.is_fixed(variable) {
            return Err(EmptyDomain);
        }

        self.record(variable);
        let _ = self.domains[variable].remove_value(value);
        Ok(true)
    }

    /// Reduces the domain of `variable` to `value`.
    pub fn assign(&mut self, variable: VariableId, value: i32) -> Result<bool, EmptyDomain> {
        if !self.contains(variable, value) {
            return Err(EmptyDomain);
        }
        if self.is_fixed(variable) {
            return Ok(false);
        }

        self.record(variable);
        self.domains[variable] = Domain::singleton(value);
        Ok(true)
    }

    /// Keeps only the values of `variable` which are also in `other`.
    pub fn intersect(&mut self, variable: VariableId, other: &Domain) -> Result<bool, EmptyDomain> {
        let mut narrowed = self.domains[variable].clone();
        let changed = narrowed.intersect(other);
        self.replace_if_changed(variable, changed, narrowed)
    }

    /// Keeps only the values of `variable` for which `keep` holds.
    pub fn retain(
        &mut self,
        variable: VariableId,
        keep: impl FnMut(&i32) -> bool,
    ) -> Result<bool, EmptyDomain> {
        let mut narrowed = self.domains[variable].clone();
        let changed = narrowed.retain(keep);
        self.replace_if_changed(variable, changed, narrowed)
    }

    fn replace_if_changed(
        &mut self,
        variable: VariableId,
        changed: bool,
        narrowed: Domain,
    ) -> Result<bool, EmptyDomain> {
        if narrowed.is_empty() {
            return Err(EmptyDomain);
        }
        if !changed {
            return Ok(false);
        }

        self.record(variable);
        self.domains[variable] = narrowed;
        Ok(true)
    }

    /// The assigned values in declaration order, or `None` if a variable is not fixed.
    pub(crate) fn fixed_values(&self) -> Option<KeyedVec<VariableId, i32>> {
        let mut values = KeyedVec::default();
        for domain in self.domains.iter() {
            if !domain.is_fixed() {
                return None;
            }
            let _ = values.push(domain.min());
        }
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(bounds: &[(i32, i32)]) -> DomainStore {
        DomainStore::new(
            bounds
                .iter()
                .map(|&(lower, upper)| Domain::new(lower, upper).unwrap()),
        )
    }

    fn var(index: u32) -> VariableId {
        VariableId::new(index)
    }

    #[test]
    fn failing_operations_leave_the_domain_untouched() {
        let mut store = store(&[(0, 5)]);

        assert_eq!(Err(EmptyDomain), store.set_lower_bound(var(0), 6));
        assert_eq!(Err(EmptyDomain), store.set_upper_bound(var(0), -1));
        assert_eq!(Err(EmptyDomain), store.assign(var(0), 9));
        assert_eq!(&Domain::new(0, 5).unwrap(), store.domain(var(0)));
        assert!(store.drain_touched().is_empty());
    }

    #[test]
    fn removing_the_last_value_fails() {
        let mut store = store(&[(3, 3)]);

        assert_eq!(Err(EmptyDomain), store.remove_value(var(0), 3));
        assert_eq!(Ok(false), store.remove_value(var(0), 4));
        assert_eq!(Some(3), store.fixed_value(var(0)));
    }

    #[test]
    fn synchronising_restores_the_exact_domains() {
        let mut store = store(&[(0, 9), (0, 9)]);
        let before = store.clone();

        store.increase_decision_level();
        assert_eq!(Ok(true), store.remove_value(var(0), 4));
        assert_eq!(Ok(true), store.set_lower_bound(var(0), 2));
        store.increase_decision_level();
        assert_eq!(Ok(true), store.assign(var(1), 7));
        assert_eq!(Ok(true), store.set_upper_bound(var(0), 6));

        store.synchronise(1);
        assert_eq!("{2..3, 5..9}", store.domain(var(0)).to_string());
        assert_eq!(before.domain(var(1)), store.domain(var(1)));

        store.synchronise(0);
        assert_eq!(before.domain(var(0)), store.domain(var(0)));
        assert_eq!(0, store.decision_level());
    }

    #[test]
    fn touched_variables_are_reported_once_in_order() {
        let mut store = store(&[(0, 9), (0, 9), (0, 9)]);

        let _ = store.set_upper_bound(var(2), 5);
        let _ = store.set_lower_bound(var(0), 1);
        let _ = store.set_upper_bound(var(2), 4);

        assert_eq!(vec![var(2), var(0)], store.drain_touched());
        assert!(store.drain_touched().is_empty());
    }

    #[test]
    fn intersecting_with_a_superset_is_a_no_op() {
        let mut store = store(&[(2, 4)]);

        assert_eq!(Ok(false), store.intersect(var(0), &Domain::new(0, 10).unwrap()));
        assert_eq!(
            Ok(true),
            store.intersect(var(0), &Domain::from_values([1, 3, 5]).unwrap())
        );
        assert_eq!(Some(3), store.fixed_value(var(0)));
        assert_eq!(
            Err(EmptyDomain),
            store.intersect(var(0), &Domain::from_values([1, 5]).unwrap())
        );
    }

    #[test]
    fn fixed_values_require_every_variable_to_be_fixed() {
        let mut store = store(&[(1, 1), (0, 2)]);
        assert!(store.fixed_values().is_none());

        let _ = store.assign(var(1), 2);
        let values = store.fixed_values().expect("all variables are fixed");
        assert_eq!(vec![1, 2], values.iter().copied().collect::<Vec<_>>());
    }
}
