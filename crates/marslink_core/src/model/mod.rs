//! Feed domain model.
//!
//! # Responsibility
//! - Define the entities shown in the feed (journal, weather, messages).
//! - Provide the tagged `DatedItem` view the aggregator sorts and dispatches.
//!
//! # Invariants
//! - Every feed entity exposes a comparable epoch-millisecond timestamp.
//! - View state (e.g. weather expansion) never lives on the entities.

pub mod item;
pub mod journal;
pub mod message;
pub mod weather;

/// Unix epoch milliseconds used for every feed timestamp.
pub type EpochMs = i64;
