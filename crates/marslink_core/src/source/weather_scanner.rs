//! Habitat weather scanner holding the latest snapshot.

use crate::model::item::DatedItem;
use crate::model::weather::WeatherSnapshot;
use crate::model::EpochMs;
use crate::source::FeedSource;

#[derive(Debug, Clone)]
pub struct WeatherScanner {
    current: WeatherSnapshot,
}

impl WeatherScanner {
    /// Scanner reporting the standard Acidalia reading taken at `now_ms`.
    pub fn new(now_ms: EpochMs) -> Self {
        Self::with_snapshot(WeatherSnapshot {
            date: now_ms,
            sunrise: "05:42".to_string(),
            sunset: "17:58".to_string(),
            high: -18,
            low: -74,
        })
    }

    pub fn with_snapshot(current: WeatherSnapshot) -> Self {
        Self { current }
    }

    pub fn current_weather(&self) -> &WeatherSnapshot {
        &self.current
    }
}

impl FeedSource for WeatherScanner {
    fn source_name(&self) -> &'static str {
        "weather"
    }

    fn items(&self) -> Vec<DatedItem<'_>> {
        vec![DatedItem::Weather(&self.current)]
    }
}
