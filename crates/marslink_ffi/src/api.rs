//! FFI feed API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the feed session as flat, UI-ready view models.
//! - Keep one session per UI thread; Flutter drives the clock via ticks.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Calls without an open session return empty or failure envelopes.
//! - Session state is thread-local: call from the UI isolate thread only.

use log::warn;
use marslink_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, now_epoch_ms,
    ping as ping_inner, FeedConfig, FeedRow, FeedSession, SelectionEffect,
};
use std::cell::RefCell;

thread_local! {
    static SESSION: RefCell<Option<FeedSession>> = const { RefCell::new(None) };
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One cell, ready to hand to a list view.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedCellView {
    pub section: u32,
    pub index: u32,
    /// Strategy kind (`journal|weather|message`).
    pub kind: String,
    /// Cell shape (`journal_date|journal_text|weather_summary|weather_detail|message|empty`).
    pub cell: String,
    pub primary: String,
    pub secondary: String,
    /// Only meaningful for the weather summary cell.
    pub expanded: bool,
    pub width: f64,
    pub height: f64,
    /// Spacing below the section this cell belongs to.
    pub section_bottom_inset: f64,
}

/// Generic action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedActionResponse {
    pub ok: bool,
    pub message: String,
}

impl FeedActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Result of advancing the feed clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedTickResponse {
    /// Whether the host must re-query `feed_rows`.
    pub changed: bool,
    pub inserted: u32,
    /// Delay until the next scripted change, if any.
    pub next_due_in_ms: Option<u64>,
}

/// Opens (or replaces) the feed session and starts the rover link.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - `session_start_ms = None` anchors the session at the current time.
/// - Never panics; invalid widths return a failure envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn feed_open(container_width: f64, session_start_ms: Option<i64>) -> FeedActionResponse {
    let config = FeedConfig::starting_at(session_start_ms.unwrap_or_else(now_epoch_ms))
        .with_container_width(container_width);
    match FeedSession::new(config) {
        Ok(mut session) => {
            session.connect();
            let sections = session.sections().len();
            SESSION.with(|slot| *slot.borrow_mut() = Some(session));
            FeedActionResponse::success(format!("Feed opened with {sections} section(s)."))
        }
        Err(err) => FeedActionResponse::failure(format!("feed_open failed: {err}")),
    }
}

/// Drops the current session, if any.
#[flutter_rust_bridge::frb(sync)]
pub fn feed_close() {
    SESSION.with(|slot| slot.borrow_mut().take());
}

/// Returns every visible cell in display order.
///
/// # FFI contract
/// - Returns an empty list when no session is open.
#[flutter_rust_bridge::frb(sync)]
pub fn feed_rows() -> Vec<FeedCellView> {
    with_session(|session| session.rows().into_iter().map(to_cell_view).collect())
        .unwrap_or_default()
}

/// Forwards a tap to the tapped section.
///
/// Returns `true` when the host must reload that section's cells.
#[flutter_rust_bridge::frb(sync)]
pub fn feed_select(section: u32, index: u32) -> bool {
    with_session(|session| session.select(section as usize, index as usize))
        .map(|effect| effect == SelectionEffect::ReloadSection)
        .unwrap_or(false)
}

/// Advances the feed clock by `elapsed_ms`.
///
/// # FFI contract
/// - Hosts typically call this from a timer scheduled with `next_due_in_ms`.
#[flutter_rust_bridge::frb(sync)]
pub fn feed_tick(elapsed_ms: u64) -> FeedTickResponse {
    with_session(|session| {
        let diff = session.advance(elapsed_ms);
        FeedTickResponse {
            changed: diff.is_some(),
            inserted: diff.map_or(0, |diff| diff.inserted.len() as u32),
            next_due_in_ms: session.next_due_in(),
        }
    })
    .unwrap_or(FeedTickResponse {
        changed: false,
        inserted: 0,
        next_due_in_ms: None,
    })
}

/// Updates the container width after a layout change.
#[flutter_rust_bridge::frb(sync)]
pub fn feed_resize(container_width: f64) -> FeedActionResponse {
    match with_session(|session| session.set_container_width(container_width)) {
        Some(Ok(())) => FeedActionResponse::success("Feed resized."),
        Some(Err(err)) => FeedActionResponse::failure(format!("feed_resize failed: {err}")),
        None => FeedActionResponse::failure("feed_resize failed: no open feed"),
    }
}

fn with_session<T>(f: impl FnOnce(&mut FeedSession) -> T) -> Option<T> {
    SESSION.with(|slot| {
        let mut slot = slot.borrow_mut();
        match slot.as_mut() {
            Some(session) => Some(f(session)),
            None => {
                warn!("event=feed_call module=ffi status=skipped reason=no_session");
                None
            }
        }
    })
}

fn to_cell_view(row: FeedRow) -> FeedCellView {
    let (cell, expanded) = match &row.cell {
        marslink_core::RenderedCell::JournalDate { .. } => ("journal_date", false),
        marslink_core::RenderedCell::JournalText { .. } => ("journal_text", false),
        marslink_core::RenderedCell::WeatherSummary { expanded } => ("weather_summary", *expanded),
        marslink_core::RenderedCell::WeatherDetail { .. } => ("weather_detail", false),
        marslink_core::RenderedCell::Message { .. } => ("message", false),
        marslink_core::RenderedCell::Empty => ("empty", false),
    };
    FeedCellView {
        section: row.section as u32,
        index: row.index as u32,
        kind: strategy_label(row.kind).to_string(),
        cell: cell.to_string(),
        primary: row.cell.primary_text().to_string(),
        secondary: row.cell.secondary_text().to_string(),
        expanded,
        width: row.size.width,
        height: row.size.height,
        section_bottom_inset: row.section_insets.bottom,
    }
}

fn strategy_label(kind: marslink_core::StrategyKind) -> &'static str {
    match kind {
        marslink_core::StrategyKind::Journal => "journal",
        marslink_core::StrategyKind::Weather => "weather",
        marslink_core::StrategyKind::Message => "message",
    }
}
