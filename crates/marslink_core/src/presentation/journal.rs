//! Journal section: a sol header followed by the entry text.

use crate::model::item::DatedItem;
use crate::model::journal::JournalEntry;
use crate::presentation::sol::SolFormatter;
use crate::presentation::{
    CellSize, LayoutContext, PresentationStrategy, RenderedCell, StrategyKind,
};

/// Fixed height of the sol header cell.
pub const JOURNAL_DATE_HEIGHT: f64 = 30.0;

/// Two-cell strategy for journal entries; also the fallback for unknown items.
#[derive(Debug, Clone)]
pub struct JournalStrategy {
    entry: Option<JournalEntry>,
    sols: SolFormatter,
}

impl JournalStrategy {
    pub fn new(sols: SolFormatter) -> Self {
        Self { entry: None, sols }
    }
}

impl PresentationStrategy for JournalStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Journal
    }

    fn bind(&mut self, item: DatedItem<'_>) {
        self.entry = match item {
            DatedItem::Journal(entry) => Some(entry.clone()),
            _ => None,
        };
    }

    fn item_count(&self) -> usize {
        2
    }

    fn size_for(&self, index: usize, context: &LayoutContext) -> CellSize {
        let Some(entry) = self.entry.as_ref() else {
            return CellSize::ZERO;
        };
        let width = context.container_width;
        match index {
            0 => CellSize::new(width, JOURNAL_DATE_HEIGHT),
            1 => CellSize::new(width, context.metrics.text_height(&entry.text, width)),
            _ => CellSize::ZERO,
        }
    }

    fn render(&self, index: usize) -> RenderedCell {
        let Some(entry) = self.entry.as_ref() else {
            return RenderedCell::Empty;
        };
        match index {
            0 => RenderedCell::JournalDate {
                text: self.sols.label(entry.date),
            },
            1 => RenderedCell::JournalText {
                text: entry.text.clone(),
            },
            _ => RenderedCell::Empty,
        }
    }
}
