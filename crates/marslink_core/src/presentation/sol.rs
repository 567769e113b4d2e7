//! Martian sol numbering for journal headers.

use crate::model::EpochMs;

/// Length of one sol in milliseconds (88 775.244 s).
pub const SOL_MS: i64 = 88_775_244;

/// Converts instants into sols elapsed since landing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolFormatter {
    landing_ms: EpochMs,
}

impl SolFormatter {
    pub fn new(landing_ms: EpochMs) -> Self {
        Self { landing_ms }
    }

    /// Whole sols between landing and `date`, truncated toward zero.
    pub fn sols(&self, date: EpochMs) -> i64 {
        date.saturating_sub(self.landing_ms) / SOL_MS
    }

    /// Header label, e.g. `SOL 12`.
    pub fn label(&self, date: EpochMs) -> String {
        format!("SOL {}", self.sols(date))
    }
}
