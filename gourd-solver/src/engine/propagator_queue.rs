use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::VecDeque;

use crate::constraints::Constraint;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::variables::VariableId;
use crate::engine::DomainStore;
use crate::engine::PropagationContext;
use crate::gourd_assert_moderate;
use crate::propagators::Priority;

/// Position of a constraint in the slice the queue was built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ConstraintId(u32);

impl StorageKey for ConstraintId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        ConstraintId(index as u32)
    }
}

/// Runs constraints until no domain changes any more (the fixpoint) or a domain is wiped out.
///
/// A constraint is (re-)enqueued whenever a variable in its scope is narrowed, including by the
/// constraint itself, since a single pass of e.g. bounds propagation on an equality is not
/// idempotent. A newly built queue has every constraint enqueued.
#[derive(Clone, Debug)]
pub struct PropagatorQueue {
    queue: PriorityQueue,
    watch_lists: KeyedVec<VariableId, Vec<ConstraintId>>,
    priorities: KeyedVec<ConstraintId, Priority>,
    num_propagations: u64,
}

impl PropagatorQueue {
    /// Builds the queue and the variable-to-constraint watch lists for `constraints` over
    /// `num_variables` variables.
    pub fn new(num_variables: usize, constraints: &[Constraint]) -> PropagatorQueue {
        let mut watch_lists = KeyedVec::default();
        watch_lists.resize(num_variables, Vec::new());
        let mut priorities = KeyedVec::default();

        for constraint in constraints {
            let id: ConstraintId = priorities.push(constraint.priority());

            let mut scope = constraint.scope();
            scope.sort_unstable();
            scope.dedup();
            for variable in scope {
                watch_lists[variable].push(id);
            }
        }

        let mut queue = PropagatorQueue {
            queue: PriorityQueue::new(priorities.len()),
            watch_lists,
            priorities,
            num_propagations: 0,
        };
        queue.enqueue_all();
        queue
    }

    /// Enqueues every constraint, as is needed before propagating at the root.
    pub fn enqueue_all(&mut self) {
        for id in self.priorities.keys() {
            self.queue.enqueue(id, self.priorities[id]);
        }
    }

    /// The number of times a constraint has been propagated by this queue.
    pub fn num_propagations(&self) -> u64 {
        self.num_propagations
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Propagates to a fixpoint, starting from the constraints already enqueued and those watching
    /// a variable narrowed since the last run. Returns `false` as soon as a constraint fails; the
    /// queue is then empty again and the domains must be restored by backtracking.
    ///
    /// `constraints` must be the slice the queue was built for.
    pub fn run(&mut self, constraints: &[Constraint], domains: &mut DomainStore) -> bool {
        gourd_assert_moderate!(constraints.len() == self.priorities.len());

        self.enqueue_watchers_of_touched(domains);

        while let Some(id) = self.queue.pop() {
            self.num_propagations += 1;

            let status = constraints[id.index()].propagate_in(&mut PropagationContext::new(domains));
            if status.is_err() {
                self.queue.clear();
                let _ = domains.drain_touched();
                return false;
            }

            self.enqueue_watchers_of_touched(domains);
        }

        true
    }

    fn enqueue_watchers_of_touched(&mut self, domains: &mut DomainStore) {
        for variable in domains.drain_touched() {
            for &watcher in &self.watch_lists[variable] {
                self.queue.enqueue(watcher, self.priorities[watcher]);
            }
        }
    }
}

/// First-in first-out queues per priority level, served highest priority first.
#[derive(Clone, Debug)]
struct PriorityQueue {
    queues: Vec<VecDeque<ConstraintId>>,
    is_enqueued: KeyedVec<ConstraintId, bool>,
    num_enqueued: usize,
    present_priorities: BinaryHeap<Reverse<u8>>,
}

impl PriorityQueue {
    fn new(num_constraints: usize) -> PriorityQueue {
        let mut is_enqueued = KeyedVec::default();
        is_enqueued.resize(num_constraints, false);

        PriorityQueue {
            queues: vec![VecDeque::new(); Priority::NUM_PRIORITIES],
            is_enqueued,
            num_enqueued: 0,
            present_priorities: BinaryHeap::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.num_enqueued == 0
    }

    fn enqueue(&mut self, id: ConstraintId, priority: Priority) {
        if self.is_enqueued[id] {
            return;
        }

        self.is_enqueued[id] = true;
        self.num_enqueued += 1;

        if self.queues[priority as usize].is_empty() {
            self.present_priorities.push(Reverse(priority as u8));
        }
        self.queues[priority as usize].push_back(id);
    }

    fn pop(&mut self) -> Option<ConstraintId> {
        let top_priority = self.present_priorities.peek()?.0 as usize;
        gourd_assert_moderate!(!self.queues[top_priority].is_empty());

        let next = self.queues[top_priority].pop_front();

        if let Some(id) = next {
            self.is_enqueued[id] = false;
            self.num_enqueued -= 1;

            if self.queues[top_priority].is_empty() {
                let _ = self.present_priorities.pop();
            }
        }

        next
    }

    fn clear(&mut self) {
        while let Some(Reverse(priority)) = self.present_priorities.pop() {
            self.queues[priority as usize].clear();
        }

        for is_enqueued in self.is_enqueued.iter_mut() {
            *is_enqueued = false;
        }
        self.num_enqueued = 0;
    }
}
