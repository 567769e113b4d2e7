//! Journal entry written by the astronaut.

use crate::model::item::Dated;
use crate::model::EpochMs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unix epoch milliseconds.
    pub date: EpochMs,
    pub text: String,
}

impl JournalEntry {
    pub fn new(date: EpochMs, text: impl Into<String>) -> Self {
        Self {
            date,
            text: text.into(),
        }
    }
}

impl Dated for JournalEntry {
    fn date(&self) -> EpochMs {
        self.date
    }
}
