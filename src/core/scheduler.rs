//! Deterministic task queue
//!
//! Every deferred callback of the landing page (countdown ticks, particle
//! expiry, effect cleanup, the trail idle timer) is a task in a [`TaskQueue`].
//! The queue does not own a clock: callers pass the current time in, which
//! lets the browser drive it from a single re-armed timeout and lets tests
//! drive it with virtual time.

use std::collections::{BTreeMap, HashMap};

/// Milliseconds since the Unix epoch
pub type Millis = i64;

/// Handle used to cancel a scheduled task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Task<E> {
    due: Millis,
    seq: u64,
    every: Option<Millis>,
    event: E,
}

/// Pending one-shot and repeating tasks ordered by due time
///
/// Tasks due at the same instant fire in the order they were scheduled.
#[derive(Debug)]
pub struct TaskQueue<E> {
    tasks: HashMap<TaskId, Task<E>>,
    timeline: BTreeMap<(Millis, u64), TaskId>,
    next_id: u64,
    next_seq: u64,
}

impl<E: Clone> TaskQueue<E> {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
            timeline: BTreeMap::new(),
            next_id: 0,
            next_seq: 0,
        }
    }

    /// Schedule `event` to fire once, `delay` ms after `now`
    pub fn schedule_once(&mut self, now: Millis, delay: Millis, event: E) -> TaskId {
        self.insert(now.saturating_add(delay.max(0)), None, event)
    }

    /// Schedule `event` to fire every `every` ms, first after one period
    pub fn schedule_repeating(&mut self, now: Millis, every: Millis, event: E) -> TaskId {
        let every = every.max(1);
        self.insert(now.saturating_add(every), Some(every), event)
    }

    /// Cancel a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.tasks.remove(&id) {
            Some(task) => {
                self.timeline.remove(&(task.due, task.seq));
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// Due time of the earliest pending task
    pub fn next_due(&self) -> Option<Millis> {
        self.timeline.keys().next().map(|(due, _)| *due)
    }

    /// Pop the earliest task due at or before `now`
    ///
    /// Repeating tasks are re-armed one period later; a task that fell more
    /// than a period behind is re-armed relative to `now` instead of firing a
    /// burst of catch-up ticks.
    pub fn pop_due(&mut self, now: Millis) -> Option<(TaskId, E)> {
        let (&(due, seq), &id) = self.timeline.iter().next()?;
        if due > now {
            return None;
        }
        self.timeline.remove(&(due, seq));

        let task = self.tasks.remove(&id)?;
        match task.every {
            Some(every) => {
                let mut next = task.due.saturating_add(every);
                if next <= now {
                    next = now.saturating_add(every);
                }
                let event = task.event.clone();
                let seq = self.bump_seq();
                self.timeline.insert((next, seq), id);
                self.tasks.insert(
                    id,
                    Task {
                        due: next,
                        seq,
                        ..task
                    },
                );
                Some((id, event))
            }
            None => Some((id, task.event)),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn insert(&mut self, due: Millis, every: Option<Millis>, event: E) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        self.timeline.insert((due, seq), id);
        self.tasks.insert(
            id,
            Task {
                due,
                seq,
                every,
                event,
            },
        );
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

impl<E: Clone> Default for TaskQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}
