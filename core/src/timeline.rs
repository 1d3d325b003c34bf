use alloc::collections::BinaryHeap;
use core::cmp::Ordering;
use core::time::Duration;

/// Virtual clock with a queue of delayed tasks.
///
/// The host moves time forward; tasks are handed back in deadline order, ties in the order they
/// were scheduled.
/// Nothing is ever cancelled: a scheduled task always comes back out eventually.
#[derive(Debug)]
pub struct Timeline<T> {
    now: Duration,
    next_seq: u64,
    pending: BinaryHeap<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    deadline: Duration,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Pending<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<T> Eq for Pending<T> {}

impl<T> PartialOrd for Pending<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Pending<T> {
    // reversed, BinaryHeap is a max-heap
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BinaryHeap::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Queues `task` to fire `delay` after the current clock.
    pub fn schedule_after(&mut self, delay: Duration, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            deadline: self.now + delay,
            seq,
            task,
        });
    }

    /// Pops the earliest task due at or before `target`, moving the clock to its deadline.
    pub fn pop_due(&mut self, target: Duration) -> Option<T> {
        if self.pending.peek()?.deadline > target {
            return None;
        }
        let Pending { deadline, task, .. } = self.pending.pop()?;
        if deadline > self.now {
            self.now = deadline;
        }
        Some(task)
    }

    /// Moves the clock to `target` once everything due has been popped.
    pub fn settle(&mut self, target: Duration) {
        if target > self.now {
            self.now = target;
        }
    }
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}
