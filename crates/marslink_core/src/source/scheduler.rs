//! Single-threaded delayed task queue on a virtual clock.
//!
//! # Responsibility
//! - Hold payloads that become due after a relative delay.
//! - Release them strictly in due order as the host advances time.
//!
//! # Invariants
//! - The clock only moves forward.
//! - Tasks with equal due times fire in scheduling order.
//! - A task scheduled while another fires is timed from that firing instant,
//!   which is how callback chains accumulate their delays.

use std::collections::VecDeque;

/// Milliseconds elapsed on the scheduler clock.
pub type ElapsedMs = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ScheduledTask<T> {
    due_at: ElapsedMs,
    payload: T,
}

/// A task released by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub fired_at: ElapsedMs,
    pub payload: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: ElapsedMs,
    pending: VecDeque<ScheduledTask<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: 0,
            pending: VecDeque::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value.
    pub fn now(&self) -> ElapsedMs {
        self.now
    }

    /// Queues `payload` to fire `delay_ms` after the current clock value.
    pub fn schedule(&mut self, delay_ms: ElapsedMs, payload: T) {
        let due_at = self.now.saturating_add(delay_ms);
        let position = self.pending.partition_point(|task| task.due_at <= due_at);
        self.pending.insert(position, ScheduledTask { due_at, payload });
    }

    /// Time until the next task is due, `None` when idle.
    pub fn next_due_in(&self) -> Option<ElapsedMs> {
        self.pending
            .front()
            .map(|task| task.due_at.saturating_sub(self.now))
    }

    /// Releases the next task due at or before `deadline`.
    ///
    /// The clock jumps to the task's due time, so work scheduled by the
    /// caller in response is timed from the firing instant.
    pub fn pop_due(&mut self, deadline: ElapsedMs) -> Option<Fired<T>> {
        let due_at = self.pending.front()?.due_at;
        if due_at > deadline {
            return None;
        }
        let task = self.pending.pop_front()?;
        self.now = self.now.max(task.due_at);
        Some(Fired {
            fired_at: self.now,
            payload: task.payload,
        })
    }

    /// Moves the clock to `deadline` without firing anything.
    pub fn settle_at(&mut self, deadline: ElapsedMs) {
        self.now = self.now.max(deadline);
    }
}

#[cfg(test)]
mod tests {
    use super::{ElapsedMs, Scheduler};

    fn drain_until<T>(scheduler: &mut Scheduler<T>, deadline: ElapsedMs) -> Vec<T> {
        let mut fired = Vec::new();
        while let Some(task) = scheduler.pop_due(deadline) {
            fired.push(task.payload);
        }
        scheduler.settle_at(deadline);
        fired
    }

    #[test]
    fn releases_tasks_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(300, "late");
        scheduler.schedule(100, "early");
        scheduler.schedule(100, "early-second");

        let fired = drain_until(&mut scheduler, 1_000);
        assert_eq!(fired, vec!["early", "early-second", "late"]);
        assert_eq!(scheduler.now(), 1_000);
        assert_eq!(scheduler.next_due_in(), None);
    }

    #[test]
    fn holds_tasks_that_are_not_yet_due() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(2_300, 1);

        assert!(scheduler.pop_due(2_299).is_none());
        scheduler.settle_at(2_299);
        assert_eq!(scheduler.next_due_in(), Some(1));
        let fired = scheduler.pop_due(2_300).expect("task due at deadline");
        assert_eq!(fired.fired_at, 2_300);
    }

    #[test]
    fn work_scheduled_from_a_firing_task_is_chained() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(2_300, 0);

        let first = scheduler.pop_due(10_000).expect("first task due");
        assert_eq!(first.fired_at, 2_300);
        scheduler.schedule(1_000, 1);
        let second = scheduler.pop_due(10_000).expect("chained task due");
        assert_eq!(second.fired_at, 3_300);
    }

    #[test]
    fn settle_never_moves_the_clock_backwards() {
        let mut scheduler: Scheduler<()> = Scheduler::new();
        scheduler.settle_at(500);
        scheduler.settle_at(100);
        assert_eq!(scheduler.now(), 500);
    }
}
