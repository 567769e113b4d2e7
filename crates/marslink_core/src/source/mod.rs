//! Feed producers.
//!
//! # Responsibility
//! - Own the collections the feed is built from.
//! - Expose them to the aggregator as borrowed `DatedItem`s.
//!
//! # Invariants
//! - Producers only append or bulk-load; items are never removed.

pub mod journal_loader;
pub mod pathfinder;
pub mod scheduler;
pub mod weather_scanner;

use crate::model::item::DatedItem;

/// A producer of dated feed items.
pub trait FeedSource {
    /// Short name used in diagnostics.
    fn source_name(&self) -> &'static str;

    /// Borrowed view of every item the producer currently holds.
    fn items(&self) -> Vec<DatedItem<'_>>;
}
