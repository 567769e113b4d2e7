//! Feed session configuration.
//!
//! # Responsibility
//! - Collect host-provided layout facts and clock anchors in one place.
//! - Provide deterministic defaults so hosts only override what they know.
//!
//! # Invariants
//! - `container_width` is the full width available to every cell.
//! - All instants are Unix epoch milliseconds.

use crate::model::EpochMs;
use crate::presentation::sol::SOL_MS;
use crate::presentation::text::TextMetrics;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default container width in points (portrait phone).
pub const DEFAULT_CONTAINER_WIDTH: f64 = 375.0;
/// Sols between landing and session start when no landing is configured.
pub const DEFAULT_MISSION_SOLS: i64 = 31;
/// Largest session start magnitude accepted (±100 000 000 days around the epoch).
pub const MAX_SESSION_START_ABS_MS: EpochMs = 8_640_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Width supplied by the list host for size calculations.
    pub container_width: f64,
    /// Instant the feed session starts; anchors scripted message times.
    pub session_start_ms: EpochMs,
    /// Landing instant used for sol numbering. Derived when `None`.
    pub landing_ms: Option<EpochMs>,
    pub text_metrics: TextMetrics,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::starting_at(now_epoch_ms())
    }
}

impl FeedConfig {
    /// Default configuration anchored at a fixed session start.
    pub fn starting_at(session_start_ms: EpochMs) -> Self {
        Self {
            container_width: DEFAULT_CONTAINER_WIDTH,
            session_start_ms,
            landing_ms: None,
            text_metrics: TextMetrics::default(),
        }
    }

    pub fn with_container_width(mut self, width: f64) -> Self {
        self.container_width = width;
        self
    }

    /// Effective landing instant.
    pub fn landing_ms(&self) -> EpochMs {
        self.landing_ms
            .unwrap_or(self.session_start_ms.saturating_sub(DEFAULT_MISSION_SOLS * SOL_MS))
    }

    /// Checks host-provided values before a session is built.
    ///
    /// # Errors
    /// - Returns an error when the container width is not a positive finite number.
    /// - Returns an error when session start is outside `±MAX_SESSION_START_ABS_MS`.
    /// - Returns an error when the landing instant is after session start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-MAX_SESSION_START_ABS_MS..=MAX_SESSION_START_ABS_MS).contains(&self.session_start_ms)
        {
            return Err(ConfigError::SessionStartOutOfRange(self.session_start_ms));
        }
        if !self.container_width.is_finite() || self.container_width <= 0.0 {
            return Err(ConfigError::InvalidContainerWidth(self.container_width));
        }
        let landing = self.landing_ms();
        if landing > self.session_start_ms {
            return Err(ConfigError::LandingAfterSessionStart {
                landing_ms: landing,
                session_start_ms: self.session_start_ms,
            });
        }
        self.text_metrics.validate()?;
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidContainerWidth(f64),
    SessionStartOutOfRange(EpochMs),
    LandingAfterSessionStart {
        landing_ms: EpochMs,
        session_start_ms: EpochMs,
    },
    InvalidTextMetrics(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidContainerWidth(width) => {
                write!(f, "container width must be positive, got {width}")
            }
            Self::SessionStartOutOfRange(start) => write!(
                f,
                "session start {start} is outside +/-{MAX_SESSION_START_ABS_MS} ms"
            ),
            Self::LandingAfterSessionStart {
                landing_ms,
                session_start_ms,
            } => write!(
                f,
                "landing ({landing_ms}) must not be after session start ({session_start_ms})"
            ),
            Self::InvalidTextMetrics(field) => write!(f, "text metric `{field}` must be positive"),
        }
    }
}

impl Error for ConfigError {}

/// Current wall-clock time in epoch milliseconds.
///
/// Falls back to `0` if the system clock is before the Unix epoch.
pub fn now_epoch_ms() -> EpochMs {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as EpochMs)
        .unwrap_or(0)
}
