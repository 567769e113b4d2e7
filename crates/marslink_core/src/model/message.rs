//! Messages received over the rover link.

use crate::model::item::Dated;
use crate::model::EpochMs;
use serde::{Deserialize, Serialize};

/// Author reference for a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unix epoch milliseconds.
    pub date: EpochMs,
    pub text: String,
    pub user: User,
}

impl Message {
    pub fn new(date: EpochMs, text: impl Into<String>, user: User) -> Self {
        Self {
            date,
            text: text.into(),
            user,
        }
    }
}

impl Dated for Message {
    fn date(&self) -> EpochMs {
        self.date
    }
}
