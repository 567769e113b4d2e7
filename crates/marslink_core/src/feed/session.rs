//! Host-side feed session.
//!
//! # Responsibility
//! - Own the three producers for the lifetime of one feed screen.
//! - Re-aggregate whenever the message link reports a change.
//! - Keep one strategy per section so view state survives refreshes.
//!
//! # Invariants
//! - Sections always mirror the latest aggregation, most recent first.
//! - A section keeps its strategy while its `ItemKey` stays in the feed.
//! - The session, not the link, owns the refresh observer.

use crate::config::{ConfigError, FeedConfig};
use crate::feed::aggregator::aggregate;
use crate::feed::diff::FeedDiff;
use crate::feed::dispatcher::SectionDispatcher;
use crate::model::item::ItemKey;
use crate::presentation::sol::SolFormatter;
use crate::presentation::{
    CellSize, EdgeInsets, LayoutContext, PresentationStrategy, RenderedCell, SelectionEffect,
    StrategyKind,
};
use crate::source::journal_loader::JournalLoader;
use crate::source::pathfinder::{MessagesObserver, Pathfinder};
use crate::source::scheduler::ElapsedMs;
use crate::source::weather_scanner::WeatherScanner;
use crate::source::FeedSource;
use log::{debug, info};
use serde::Serialize;
use std::cell::Cell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

/// Marks the feed stale when the link changes.
#[derive(Debug, Default)]
struct RefreshFlag {
    dirty: Cell<bool>,
}

impl RefreshFlag {
    fn take(&self) -> bool {
        self.dirty.replace(false)
    }
}

impl MessagesObserver for RefreshFlag {
    fn on_items_changed(&self, source: &Pathfinder) {
        self.dirty.set(true);
        debug!(
            "event=feed_invalidate module=session status=ok messages={}",
            source.messages().len()
        );
    }
}

/// One rendered section of the feed.
#[derive(Debug)]
pub struct Section {
    key: ItemKey,
    strategy: Box<dyn PresentationStrategy>,
}

impl Section {
    pub fn key(&self) -> ItemKey {
        self.key
    }

    pub fn strategy(&self) -> &dyn PresentationStrategy {
        self.strategy.as_ref()
    }
}

/// Flattened cell facts handed to a list host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedRow {
    pub section: usize,
    pub index: usize,
    pub key: ItemKey,
    pub kind: StrategyKind,
    pub size: CellSize,
    pub section_insets: EdgeInsets,
    pub cell: RenderedCell,
}

pub struct FeedSession {
    config: FeedConfig,
    dispatcher: SectionDispatcher,
    journal: JournalLoader,
    weather: WeatherScanner,
    pathfinder: Pathfinder,
    refresh_flag: Rc<RefreshFlag>,
    sections: Vec<Section>,
}

impl FeedSession {
    /// Opens a session with the built-in journal and weather reading.
    ///
    /// # Errors
    /// - Returns `ConfigError` when `config` fails validation.
    pub fn new(config: FeedConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let start = config.session_start_ms;
        let mut journal = JournalLoader::new();
        journal.load_latest(start);
        Self::with_sources(
            config,
            journal,
            WeatherScanner::new(start),
            Pathfinder::new(start),
        )
    }

    /// Opens a session over caller-provided producers.
    ///
    /// # Errors
    /// - Returns `ConfigError` when `config` fails validation.
    pub fn with_sources(
        config: FeedConfig,
        journal: JournalLoader,
        weather: WeatherScanner,
        mut pathfinder: Pathfinder,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let refresh_flag = Rc::new(RefreshFlag::default());
        let observer: Rc<dyn MessagesObserver> = refresh_flag.clone();
        pathfinder.register_observer(&observer);

        let mut session = Self {
            dispatcher: SectionDispatcher::new(SolFormatter::new(config.landing_ms())),
            config,
            journal,
            weather,
            pathfinder,
            refresh_flag,
            sections: Vec::new(),
        };
        session.refresh();
        info!(
            "event=session_open module=session status=ok sections={} width={}",
            session.sections.len(),
            session.config.container_width
        );
        Ok(session)
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn pathfinder(&self) -> &Pathfinder {
        &self.pathfinder
    }

    pub fn journal(&self) -> &JournalLoader {
        &self.journal
    }

    pub fn weather(&self) -> &WeatherScanner {
        &self.weather
    }

    /// Registers an extra host observer on the message link.
    pub fn register_observer(&mut self, observer: &Rc<dyn MessagesObserver>) {
        self.pathfinder.register_observer(observer);
    }

    pub fn layout_context(&self) -> LayoutContext {
        LayoutContext::new(self.config.container_width, self.config.text_metrics)
    }

    /// Updates the container width, e.g. after rotation.
    ///
    /// # Errors
    /// - Returns `ConfigError::InvalidContainerWidth` for non-positive widths.
    pub fn set_container_width(&mut self, width: f64) -> Result<(), ConfigError> {
        let mut config = self.config.clone();
        config.container_width = width;
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Starts the scripted transmission. See [`Pathfinder::connect`].
    pub fn connect(&mut self) -> bool {
        self.pathfinder.connect()
    }

    pub fn next_due_in(&self) -> Option<ElapsedMs> {
        self.pathfinder.next_due_in()
    }

    /// Advances the link clock and refreshes when messages arrived.
    pub fn advance(&mut self, elapsed_ms: ElapsedMs) -> Option<FeedDiff> {
        self.pathfinder.advance(elapsed_ms);
        if self.refresh_flag.take() {
            Some(self.refresh())
        } else {
            None
        }
    }

    /// Re-runs aggregation and rebinds every section.
    pub fn refresh(&mut self) -> FeedDiff {
        let sources: [&dyn FeedSource; 3] = [&self.weather, &self.journal, &self.pathfinder];
        let items = aggregate(&sources);

        let old_keys: Vec<ItemKey> = self.sections.iter().map(Section::key).collect();
        let mut previous: BTreeMap<ItemKey, VecDeque<Box<dyn PresentationStrategy>>> =
            BTreeMap::new();
        for section in self.sections.drain(..) {
            previous
                .entry(section.key)
                .or_default()
                .push_back(section.strategy);
        }

        let mut sections = Vec::with_capacity(items.len());
        for item in items {
            let key = item.key();
            let strategy = match previous.get_mut(&key).and_then(VecDeque::pop_front) {
                Some(mut strategy) => {
                    strategy.bind(item);
                    strategy
                }
                None => self.dispatcher.strategy_for(item),
            };
            sections.push(Section { key, strategy });
        }

        let new_keys: Vec<ItemKey> = sections.iter().map(Section::key).collect();
        self.sections = sections;
        self.refresh_flag.take();

        let diff = FeedDiff::between(&old_keys, &new_keys);
        debug!(
            "event=feed_refresh module=session status=ok sections={} inserted={} deleted={}",
            self.sections.len(),
            diff.inserted.len(),
            diff.deleted.len()
        );
        diff
    }

    /// Forwards a cell selection to its section.
    ///
    /// Unknown sections or cells are ignored.
    pub fn select(&mut self, section: usize, index: usize) -> SelectionEffect {
        let Some(target) = self.sections.get_mut(section) else {
            return SelectionEffect::None;
        };
        if index >= target.strategy.item_count() {
            return SelectionEffect::None;
        }
        target.strategy.on_select(index)
    }

    /// Cell facts for every visible cell, in display order.
    pub fn rows(&self) -> Vec<FeedRow> {
        let context = self.layout_context();
        let mut rows = Vec::new();
        for (section_index, section) in self.sections.iter().enumerate() {
            let strategy = section.strategy();
            let insets = strategy.insets();
            for index in 0..strategy.item_count() {
                rows.push(FeedRow {
                    section: section_index,
                    index,
                    key: section.key,
                    kind: strategy.kind(),
                    size: strategy.size_for(index, &context),
                    section_insets: insets,
                    cell: strategy.render(index),
                });
            }
        }
        rows
    }
}
