//! Maps item variants to presentation strategies.
//!
//! # Invariants
//! - Dispatch never fails: unrecognised variants get the journal strategy.
//! - Returned strategies are already bound to their item.

use crate::model::item::DatedItem;
use crate::presentation::journal::JournalStrategy;
use crate::presentation::message::MessageStrategy;
use crate::presentation::sol::SolFormatter;
use crate::presentation::weather::WeatherStrategy;
use crate::presentation::{PresentationStrategy, StrategyKind};

/// Strategy kind responsible for `item`.
pub fn kind_for(item: &DatedItem<'_>) -> StrategyKind {
    match item {
        DatedItem::Message(_) => StrategyKind::Message,
        DatedItem::Weather(_) => StrategyKind::Weather,
        _ => StrategyKind::Journal,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SectionDispatcher {
    sols: SolFormatter,
}

impl SectionDispatcher {
    pub fn new(sols: SolFormatter) -> Self {
        Self { sols }
    }

    /// Builds a fresh strategy for `item` and binds it.
    pub fn strategy_for(&self, item: DatedItem<'_>) -> Box<dyn PresentationStrategy> {
        let mut strategy: Box<dyn PresentationStrategy> = match kind_for(&item) {
            StrategyKind::Message => Box::new(MessageStrategy::new()),
            StrategyKind::Weather => Box::new(WeatherStrategy::new()),
            StrategyKind::Journal => Box::new(JournalStrategy::new(self.sols)),
        };
        strategy.bind(item);
        strategy
    }
}
