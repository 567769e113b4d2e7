//! Weather section: a summary header that expands into detail rows.
//!
//! # Invariants
//! - Collapsed shows 1 cell, expanded shows 5.
//! - Index 0 is always the summary; 1..=4 map to sunrise, sunset, high, low.

use crate::model::item::DatedItem;
use crate::model::weather::WeatherSnapshot;
use crate::presentation::{
    CellSize, LayoutContext, PresentationStrategy, RenderedCell, SelectionEffect, StrategyKind,
};

pub const WEATHER_SUMMARY_HEIGHT: f64 = 70.0;
pub const WEATHER_DETAIL_HEIGHT: f64 = 40.0;

const COLLAPSED_CELLS: usize = 1;
const EXPANDED_CELLS: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct WeatherStrategy {
    weather: Option<WeatherSnapshot>,
    expanded: bool,
}

impl WeatherStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    fn detail_row(weather: &WeatherSnapshot, index: usize) -> (String, String) {
        match index {
            1 => ("SUNRISE".to_string(), weather.sunrise.clone()),
            2 => ("SUNSET".to_string(), weather.sunset.clone()),
            3 => ("HIGH".to_string(), format!("{} C", weather.high)),
            4 => ("LOW".to_string(), format!("{} C", weather.low)),
            _ => ("n/a".to_string(), "n/a".to_string()),
        }
    }
}

impl PresentationStrategy for WeatherStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Weather
    }

    fn bind(&mut self, item: DatedItem<'_>) {
        self.weather = match item {
            DatedItem::Weather(weather) => Some(weather.clone()),
            _ => None,
        };
    }

    fn item_count(&self) -> usize {
        if self.expanded {
            EXPANDED_CELLS
        } else {
            COLLAPSED_CELLS
        }
    }

    fn size_for(&self, index: usize, context: &LayoutContext) -> CellSize {
        if self.weather.is_none() || index >= self.item_count() {
            return CellSize::ZERO;
        }
        let width = context.container_width;
        if index == 0 {
            CellSize::new(width, WEATHER_SUMMARY_HEIGHT)
        } else {
            CellSize::new(width, WEATHER_DETAIL_HEIGHT)
        }
    }

    fn render(&self, index: usize) -> RenderedCell {
        let Some(weather) = self.weather.as_ref() else {
            return RenderedCell::Empty;
        };
        if index >= self.item_count() {
            return RenderedCell::Empty;
        }
        if index == 0 {
            return RenderedCell::WeatherSummary {
                expanded: self.expanded,
            };
        }
        let (title, detail) = Self::detail_row(weather, index);
        RenderedCell::WeatherDetail { title, detail }
    }

    fn on_select(&mut self, _index: usize) -> SelectionEffect {
        self.expanded = !self.expanded;
        log::debug!(
            "event=weather_toggle module=presentation status=ok expanded={}",
            self.expanded
        );
        SelectionEffect::ReloadSection
    }
}
