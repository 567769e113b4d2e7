//! Weather snapshot reported by the habitat scanner.
//!
//! Temperatures are whole degrees Celsius. Expansion state is owned by the
//! presentation layer, never by the snapshot.

use crate::model::item::Dated;
use crate::model::EpochMs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Unix epoch milliseconds.
    pub date: EpochMs,
    /// Local sunrise, preformatted (`HH:MM`).
    pub sunrise: String,
    /// Local sunset, preformatted (`HH:MM`).
    pub sunset: String,
    pub high: i32,
    pub low: i32,
}

impl Dated for WeatherSnapshot {
    fn date(&self) -> EpochMs {
        self.date
    }
}
