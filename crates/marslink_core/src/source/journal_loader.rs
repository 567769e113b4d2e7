//! Journal entry producer.
//!
//! # Responsibility
//! - Bulk-load journal entries from the built-in log or a JSON file.
//!
//! # Invariants
//! - Loading replaces the whole collection; entries are never removed one by one.
//! - A failed load leaves the previous entries untouched.

use crate::model::item::DatedItem;
use crate::model::journal::JournalEntry;
use crate::model::EpochMs;
use crate::source::FeedSource;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Built-in log as `(seconds relative to load time, text)`.
static BUILTIN_LOG: [(i64, &str); 4] = [
    (
        -1_900_800,
        "I'm pretty much stranded. My crew thinks I'm dead and there's no way to tell them otherwise.",
    ),
    (
        -1_296_000,
        "Potatoes are in the ground. Turns out botany is the best thing that could have happened to me.",
    ),
    (
        -604_800,
        "Dug up Pathfinder today. Eighty kilometers of driving for a lander that stopped talking in 1997.",
    ),
    (
        -86_400,
        "Got the rover ready for the long drive. Packed every battery I could find.",
    ),
];

/// Journal loading errors.
#[derive(Debug)]
pub enum JournalLoadError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl Display for JournalLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read journal: {err}"),
            Self::Parse(err) => write!(f, "failed to parse journal: {err}"),
        }
    }
}

impl Error for JournalLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for JournalLoadError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for JournalLoadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct JournalLoader {
    entries: Vec<JournalEntry>,
}

impl JournalLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Loads the built-in log with dates relative to `now_ms`.
    pub fn load_latest(&mut self, now_ms: EpochMs) {
        self.entries = BUILTIN_LOG
            .iter()
            .map(|(offset_secs, text)| {
                JournalEntry::new(now_ms.saturating_add(offset_secs * 1_000), *text)
            })
            .collect();
        info!(
            "event=journal_load module=journal status=ok source=builtin entries={}",
            self.entries.len()
        );
    }

    /// Loads entries from a JSON array of `{ "date": <epoch ms>, "text": ... }`.
    ///
    /// # Errors
    /// - Returns `JournalLoadError::Parse` when the payload is not such an array.
    pub fn load_json(&mut self, json: &str) -> Result<usize, JournalLoadError> {
        let entries: Vec<JournalEntry> = serde_json::from_str(json)?;
        self.entries = entries;
        info!(
            "event=journal_load module=journal status=ok source=json entries={}",
            self.entries.len()
        );
        Ok(self.entries.len())
    }

    /// Reads and loads a JSON journal file.
    ///
    /// # Errors
    /// - Returns `JournalLoadError::Io` when the file cannot be read.
    /// - Returns `JournalLoadError::Parse` when its content is malformed.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, JournalLoadError> {
        let json = std::fs::read_to_string(path)?;
        self.load_json(&json)
    }
}

impl FeedSource for JournalLoader {
    fn source_name(&self) -> &'static str {
        "journal"
    }

    fn items(&self) -> Vec<DatedItem<'_>> {
        self.entries.iter().map(DatedItem::Journal).collect()
    }
}
