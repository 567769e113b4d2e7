//! Feed assembly: aggregation, dispatch, diffing and the host session.
//!
//! # Responsibility
//! - Merge producers into one chronological sequence per render cycle.
//! - Pick a presentation strategy for each item.
//! - Keep per-section view state alive across refreshes.

pub mod aggregator;
pub mod diff;
pub mod dispatcher;
pub mod session;
