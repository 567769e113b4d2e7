//! Simulated rover link delivering scripted messages.
//!
//! # Responsibility
//! - Hold the message log, seeded with two historical transmissions.
//! - Play a fixed countdown script on a chained delay schedule.
//! - Notify registered observers synchronously after every append.
//!
//! # Invariants
//! - Scripted messages are appended strictly in script order.
//! - Each script step is scheduled from inside the previous step's firing.
//! - Observers are held weakly; their lifetime belongs to the host session.

use crate::model::item::DatedItem;
use crate::model::message::{Message, User};
use crate::model::EpochMs;
use crate::source::scheduler::{ElapsedMs, Scheduler};
use crate::source::FeedSource;
use log::{debug, info};
use std::rc::{Rc, Weak};

/// Author of every transmission on the link.
pub const LEWIS_USER_ID: u64 = 2;
pub const LEWIS_USER_NAME: &str = "cpt.lewis";

/// Historical transmissions as `(seconds relative to session start, text)`.
static HISTORY: [(i64, &str); 2] = [
    (-803_200, "Mark, are you receiving me?"),
    (
        -259_200,
        "I think I left behind some ABBA, might help with the drive",
    ),
];

/// Countdown script as `(delay after previous step in ms, text)`.
static SCRIPT: [(ElapsedMs, &str); 3] = [
    (2_300, "Liftoff in 3..."),
    (1_000, "2..."),
    (1_000, "1..."),
];

/// Receives change notifications from a `Pathfinder`.
pub trait MessagesObserver {
    /// Called after the message log changed; `source` is already updated.
    fn on_items_changed(&self, source: &Pathfinder);
}

/// Link lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Idle,
    Connecting,
    Complete,
}

pub struct Pathfinder {
    session_start_ms: EpochMs,
    messages: Vec<Message>,
    observers: Vec<Weak<dyn MessagesObserver>>,
    scheduler: Scheduler<usize>,
    state: LinkState,
}

impl std::fmt::Debug for Pathfinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pathfinder")
            .field("session_start_ms", &self.session_start_ms)
            .field("messages", &self.messages.len())
            .field("observers", &self.observers.len())
            .field("state", &self.state)
            .finish()
    }
}

fn lewis_message(date: EpochMs, text: &str) -> Message {
    Message::new(date, text, User::new(LEWIS_USER_ID, LEWIS_USER_NAME))
}

impl Pathfinder {
    /// Creates the link with its seeded history.
    pub fn new(session_start_ms: EpochMs) -> Self {
        let messages = HISTORY
            .iter()
            .map(|(offset_secs, text)| {
                lewis_message(session_start_ms.saturating_add(offset_secs * 1_000), text)
            })
            .collect();
        Self::with_messages(session_start_ms, messages)
    }

    /// Creates the link with caller-provided history.
    pub fn with_messages(session_start_ms: EpochMs, messages: Vec<Message>) -> Self {
        Self {
            session_start_ms,
            messages,
            observers: Vec::new(),
            scheduler: Scheduler::new(),
            state: LinkState::Idle,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Current link time in epoch milliseconds.
    pub fn now_ms(&self) -> EpochMs {
        let elapsed = EpochMs::try_from(self.scheduler.now()).unwrap_or(EpochMs::MAX);
        self.session_start_ms.saturating_add(elapsed)
    }

    /// Registers an observer. The caller keeps the strong reference.
    pub fn register_observer(&mut self, observer: &Rc<dyn MessagesObserver>) {
        self.observers.push(Rc::downgrade(observer));
    }

    /// Starts the countdown script.
    ///
    /// Returns `false` when the script is already running or has finished.
    pub fn connect(&mut self) -> bool {
        if self.state != LinkState::Idle {
            debug!(
                "event=link_connect module=pathfinder status=skipped state={:?}",
                self.state
            );
            return false;
        }
        let (delay, _) = SCRIPT[0];
        self.scheduler.schedule(delay, 0);
        self.state = LinkState::Connecting;
        info!(
            "event=link_connect module=pathfinder status=ok steps={}",
            SCRIPT.len()
        );
        true
    }

    /// Time until the next scripted message, `None` when nothing is pending.
    pub fn next_due_in(&self) -> Option<ElapsedMs> {
        self.scheduler.next_due_in()
    }

    /// Advances the link clock, firing every step that becomes due.
    ///
    /// Returns the number of messages appended.
    pub fn advance(&mut self, elapsed_ms: ElapsedMs) -> usize {
        let deadline = self.scheduler.now().saturating_add(elapsed_ms);
        let mut appended = 0;
        while let Some(fired) = self.scheduler.pop_due(deadline) {
            self.fire_step(fired.payload);
            appended += 1;
        }
        self.scheduler.settle_at(deadline);
        appended
    }

    /// Fires every remaining step, however far in the future.
    pub fn run_until_idle(&mut self) -> usize {
        let mut appended = 0;
        while let Some(wait) = self.next_due_in() {
            appended += self.advance(wait);
        }
        appended
    }

    /// Appends one message and notifies observers.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.notify_observers();
    }

    fn fire_step(&mut self, step: usize) {
        let Some((_, text)) = SCRIPT.get(step) else {
            return;
        };
        debug!(
            "event=link_message module=pathfinder status=ok step={} at_ms={}",
            step,
            self.scheduler.now()
        );
        let message = lewis_message(self.now_ms(), text);
        self.append(message);

        match SCRIPT.get(step + 1) {
            Some((delay, _)) => self.scheduler.schedule(*delay, step + 1),
            None => {
                self.state = LinkState::Complete;
                info!(
                    "event=link_complete module=pathfinder status=ok messages={}",
                    self.messages.len()
                );
            }
        }
    }

    fn notify_observers(&mut self) {
        self.observers.retain(|observer| observer.strong_count() > 0);
        let live: Vec<Rc<dyn MessagesObserver>> =
            self.observers.iter().filter_map(Weak::upgrade).collect();
        for observer in live {
            observer.on_items_changed(self);
        }
    }
}

impl FeedSource for Pathfinder {
    fn source_name(&self) -> &'static str {
        "pathfinder"
    }

    fn items(&self) -> Vec<DatedItem<'_>> {
        self.messages.iter().map(DatedItem::Message).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{LinkState, MessagesObserver, Pathfinder};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        seen: RefCell<Vec<usize>>,
    }

    impl MessagesObserver for Recorder {
        fn on_items_changed(&self, source: &Pathfinder) {
            self.seen.borrow_mut().push(source.messages().len());
        }
    }

    #[test]
    fn seeds_two_historical_messages() {
        let pathfinder = Pathfinder::new(1_000_000_000);
        let dates: Vec<i64> = pathfinder.messages().iter().map(|m| m.date).collect();
        assert_eq!(dates, vec![1_000_000_000 - 803_200_000, 1_000_000_000 - 259_200_000]);
        assert_eq!(pathfinder.state(), LinkState::Idle);
    }

    #[test]
    fn observers_see_the_updated_log() {
        let recorder = Rc::new(Recorder::default());
        let observer: Rc<dyn MessagesObserver> = recorder.clone();
        let mut pathfinder = Pathfinder::new(0);
        pathfinder.register_observer(&observer);

        pathfinder.connect();
        pathfinder.run_until_idle();

        assert_eq!(*recorder.seen.borrow(), vec![3, 4, 5]);
    }

    #[test]
    fn dropped_observers_are_pruned() {
        let mut pathfinder = Pathfinder::new(0);
        {
            let observer: Rc<dyn MessagesObserver> = Rc::new(Recorder::default());
            pathfinder.register_observer(&observer);
        }
        pathfinder.connect();
        assert_eq!(pathfinder.run_until_idle(), 3);
        assert!(pathfinder.observers.is_empty());
    }

    #[test]
    fn second_connect_is_ignored() {
        let mut pathfinder = Pathfinder::new(0);
        assert!(pathfinder.connect());
        assert!(!pathfinder.connect());
        pathfinder.run_until_idle();
        assert!(!pathfinder.connect());
        assert_eq!(pathfinder.messages().len(), 5);
    }
}
