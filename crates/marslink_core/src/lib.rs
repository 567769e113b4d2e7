//! Core feed logic for Marslink.
//! Hosts render cells; this crate decides what the feed contains, in which
//! order, and what every cell says and measures.

pub mod config;
pub mod feed;
pub mod logging;
pub mod model;
pub mod presentation;
pub mod source;

pub use config::{now_epoch_ms, ConfigError, FeedConfig};
pub use feed::aggregator::aggregate;
pub use feed::diff::FeedDiff;
pub use feed::dispatcher::{kind_for, SectionDispatcher};
pub use feed::session::{FeedRow, FeedSession, Section};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{Dated, DatedItem, ItemKey, ItemKind};
pub use model::journal::JournalEntry;
pub use model::message::{Message, User};
pub use model::weather::WeatherSnapshot;
pub use model::EpochMs;
pub use presentation::journal::JournalStrategy;
pub use presentation::message::MessageStrategy;
pub use presentation::sol::{SolFormatter, SOL_MS};
pub use presentation::text::TextMetrics;
pub use presentation::weather::WeatherStrategy;
pub use presentation::{
    CellSize, EdgeInsets, LayoutContext, PresentationStrategy, RenderedCell, SelectionEffect,
    StrategyKind,
};
pub use source::journal_loader::{JournalLoadError, JournalLoader};
pub use source::pathfinder::{LinkState, MessagesObserver, Pathfinder};
pub use source::scheduler::{ElapsedMs, Fired, Scheduler};
pub use source::weather_scanner::WeatherScanner;
pub use source::FeedSource;

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
