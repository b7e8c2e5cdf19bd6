use std::iter::Rev;
use std::ops::Deref;
use std::vec::Drain;

use crate::gourd_assert_simple;

/// An undo log partitioned into decision levels.
///
/// Every entry pushed while at decision level `d` is handed back, most recent first, when the
/// trail is synchronised to a level below `d`.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    current_decision_level: usize,
    /// At index i is the position where the i-th decision level ends (exclusive) on the trail
    trail_delimiter: Vec<usize>,
    trail: Vec<T>,
}

// We explicitly implement the Default and not as a macro, because we want to avoid imposing Default
// on the generic type T.
impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            current_decision_level: 0,
            trail_delimiter: Vec::new(),
            trail: Vec::new(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn increase_decision_level(&mut self) {
        self.current_decision_level += 1;
        self.trail_delimiter.push(self.trail.len());
    }

    pub(crate) fn get_decision_level(&self) -> usize {
        self.current_decision_level
    }

    /// Returns to `new_decision_level`, yielding the removed entries in reverse push order.
    pub(crate) fn synchronise(&mut self, new_decision_level: usize) -> Rev<Drain<'_, T>> {
        gourd_assert_simple!(new_decision_level < self.current_decision_level);

        let new_trail_len = self.trail_delimiter[new_decision_level];

        self.current_decision_level = new_decision_level;
        self.trail_delimiter.truncate(new_decision_level);
        self.trail.drain(new_trail_len..).rev()
    }

    pub(crate) fn push(&mut self, elem: T) {
        self.trail.push(elem)
    }
}

impl<T> Deref for Trail<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.trail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backtracking_to_root_empties_the_trail() {
        let mut trail = Trail::default();

        trail.increase_decision_level();
        trail.push('a');
        let _ = trail.synchronise(0);

        assert!(trail.is_empty());
        assert_eq!(0, trail.get_decision_level());
    }

    #[test]
    fn root_entries_survive_backtracking() {
        let mut trail = Trail::default();
        trail.push(10);

        trail.increase_decision_level();
        trail.push(20);
        trail.increase_decision_level();
        trail.push(30);

        let _ = trail.synchronise(1);

        assert_eq!(&[10, 20], trail.deref());
    }

    #[test]
    fn undone_entries_come_back_most_recent_first() {
        let mut trail = Trail::default();

        trail.increase_decision_level();
        trail.push(1);
        trail.push(2);
        trail.increase_decision_level();
        trail.push(3);

        let undone = trail.synchronise(0).collect::<Vec<_>>();
        assert_eq!(vec![3, 2, 1], undone);
    }
}
