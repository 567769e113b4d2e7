//! Per-type presentation rules for feed sections.
//!
//! # Responsibility
//! - Define the strategy contract a list host drives for every section.
//! - Return size and text facts only; cells and views belong to the host.
//!
//! # Invariants
//! - `render`/`size_for` never fail: unbound strategies or out-of-range
//!   indices yield `RenderedCell::Empty` and `CellSize::ZERO`.
//! - Only selection mutates strategy state.

pub mod journal;
pub mod message;
pub mod sol;
pub mod text;
pub mod weather;

use crate::model::item::DatedItem;
use crate::presentation::text::TextMetrics;
use serde::Serialize;
use std::fmt::Debug;

/// Bottom spacing every built-in section leaves below its last cell.
pub const SECTION_BOTTOM_INSET: f64 = 15.0;

/// Identifies which strategy renders a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Journal,
    Weather,
    Message,
}

/// Layout facts supplied by the list host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutContext {
    pub container_width: f64,
    pub metrics: TextMetrics,
}

impl LayoutContext {
    pub fn new(container_width: f64, metrics: TextMetrics) -> Self {
        Self {
            container_width,
            metrics,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

impl CellSize {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    pub fn bottom(bottom: f64) -> Self {
        Self {
            bottom,
            ..Self::default()
        }
    }
}

/// Display facts for one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "cell", rename_all = "snake_case")]
pub enum RenderedCell {
    JournalDate { text: String },
    JournalText { text: String },
    WeatherSummary { expanded: bool },
    WeatherDetail { title: String, detail: String },
    Message { text: String, author: String },
    /// Nothing to show (unbound strategy or unknown index).
    Empty,
}

impl RenderedCell {
    /// Main label text.
    pub fn primary_text(&self) -> &str {
        match self {
            Self::JournalDate { text } | Self::JournalText { text } => text,
            Self::WeatherSummary { .. } => "LATEST WEATHER",
            Self::WeatherDetail { title, .. } => title,
            Self::Message { text, .. } => text,
            Self::Empty => "",
        }
    }

    /// Secondary label text, empty when the cell has a single label.
    pub fn secondary_text(&self) -> &str {
        match self {
            Self::WeatherDetail { detail, .. } => detail,
            Self::Message { author, .. } => author,
            _ => "",
        }
    }
}

/// What the host must do after a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEffect {
    None,
    /// Re-layout exactly this section's cells in one batch.
    ReloadSection,
}

/// Rendering rules for one section of the feed.
pub trait PresentationStrategy: Debug {
    fn kind(&self) -> StrategyKind;

    /// Hands the section its item; always called before any cell query.
    ///
    /// Items of a variant the strategy cannot show leave it unbound.
    fn bind(&mut self, item: DatedItem<'_>);

    /// Number of cells for the bound item.
    fn item_count(&self) -> usize;

    fn size_for(&self, index: usize, context: &LayoutContext) -> CellSize;

    fn render(&self, index: usize) -> RenderedCell;

    fn on_select(&mut self, _index: usize) -> SelectionEffect {
        SelectionEffect::None
    }

    fn insets(&self) -> EdgeInsets {
        EdgeInsets::bottom(SECTION_BOTTOM_INSET)
    }
}
