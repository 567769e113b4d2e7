//! Tagged view over feed entities.
//!
//! # Responsibility
//! - Give producers one borrowed shape to hand to the aggregator.
//! - Derive the stable diff key a list host uses for identity.
//!
//! # Invariants
//! - `DatedItem` only borrows; it never owns or mutates source data.
//! - `ItemKey` ordering is total so keys can live in ordered sets.

use crate::model::journal::JournalEntry;
use crate::model::message::Message;
use crate::model::weather::WeatherSnapshot;
use crate::model::EpochMs;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Anything that can be placed on the feed timeline.
pub trait Dated: Debug {
    /// Timestamp used for chronological ordering.
    fn date(&self) -> EpochMs;
}

/// Variant tag for a feed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Journal,
    Weather,
    Message,
    /// Item from a producer this crate has no dedicated rendering for.
    Other,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Journal => "journal",
            Self::Weather => "weather",
            Self::Message => "message",
            Self::Other => "other",
        }
    }
}

/// Diff identity of one feed section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey {
    pub kind: ItemKind,
    pub date: EpochMs,
}

/// Borrowed, tagged reference to one feed entity.
#[derive(Debug, Clone, Copy)]
pub enum DatedItem<'a> {
    Journal(&'a JournalEntry),
    Weather(&'a WeatherSnapshot),
    Message(&'a Message),
    Other(&'a dyn Dated),
}

impl DatedItem<'_> {
    pub fn timestamp(&self) -> EpochMs {
        match self {
            Self::Journal(entry) => entry.date,
            Self::Weather(weather) => weather.date,
            Self::Message(message) => message.date,
            Self::Other(item) => item.date(),
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Journal(_) => ItemKind::Journal,
            Self::Weather(_) => ItemKind::Weather,
            Self::Message(_) => ItemKind::Message,
            Self::Other(_) => ItemKind::Other,
        }
    }

    pub fn key(&self) -> ItemKey {
        ItemKey {
            kind: self.kind(),
            date: self.timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Dated, DatedItem, ItemKind};
    use crate::model::journal::JournalEntry;
    use crate::model::EpochMs;

    #[derive(Debug)]
    struct Photo {
        taken_at: EpochMs,
    }

    impl Dated for Photo {
        fn date(&self) -> EpochMs {
            self.taken_at
        }
    }

    #[test]
    fn key_combines_kind_and_timestamp() {
        let entry = JournalEntry::new(42, "dust everywhere");
        let key = DatedItem::Journal(&entry).key();
        assert_eq!(key.kind, ItemKind::Journal);
        assert_eq!(key.date, 42);
    }

    #[test]
    fn foreign_items_report_their_own_date() {
        let photo = Photo { taken_at: -7 };
        let item = DatedItem::Other(&photo);
        assert_eq!(item.timestamp(), -7);
        assert_eq!(item.kind().as_str(), "other");
    }
}
