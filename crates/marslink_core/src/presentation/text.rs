//! Deterministic text measurement for content-sized cells.
//!
//! # Responsibility
//! - Estimate wrapped text height without touching a rendering backend.
//!
//! # Invariants
//! - Measurement is pure: same text, width and metrics give the same size.
//! - Any text, including empty text, occupies at least one line.

use crate::config::ConfigError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("valid word regex"));

/// Fixed-advance font model used for sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextMetrics {
    /// Horizontal advance of one character.
    pub char_width: f64,
    pub line_height: f64,
    /// Padding applied on both the left and the right of the label.
    pub horizontal_inset: f64,
    /// Padding applied above and below the label.
    pub vertical_inset: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 20.0,
            horizontal_inset: 15.0,
            vertical_inset: 5.0,
        }
    }
}

impl TextMetrics {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("char_width", self.char_width),
            ("line_height", self.line_height),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTextMetrics(name));
            }
        }
        if self.horizontal_inset < 0.0 || self.vertical_inset < 0.0 {
            return Err(ConfigError::InvalidTextMetrics("inset"));
        }
        Ok(())
    }

    /// Characters that fit on one line of a cell `width` wide.
    pub fn line_capacity(&self, width: f64) -> usize {
        let usable = width - 2.0 * self.horizontal_inset;
        (usable / self.char_width).floor().max(1.0) as usize
    }

    /// Number of lines `text` wraps to, breaking on whitespace.
    ///
    /// Words longer than a line are hard-broken; explicit newlines start
    /// a new paragraph.
    pub fn line_count(&self, text: &str, width: f64) -> usize {
        let capacity = self.line_capacity(width);
        let total: usize = text
            .split('\n')
            .map(|paragraph| wrap_paragraph(paragraph, capacity))
            .sum();
        total.max(1)
    }

    /// Height of a label showing `text` inside a cell `width` wide.
    pub fn text_height(&self, text: &str, width: f64) -> f64 {
        self.line_count(text, width) as f64 * self.line_height + 2.0 * self.vertical_inset
    }
}

fn wrap_paragraph(paragraph: &str, capacity: usize) -> usize {
    let mut lines = 0;
    let mut current = 0;
    for word in WORD_RE.find_iter(paragraph) {
        let len = word.as_str().chars().count();
        if len > capacity {
            if current > 0 {
                lines += 1;
            }
            lines += len / capacity;
            current = len % capacity;
            continue;
        }
        let needed = if current == 0 { len } else { current + 1 + len };
        if needed > capacity {
            lines += 1;
            current = len;
        } else {
            current = needed;
        }
    }
    if current > 0 {
        lines += 1;
    }
    lines.max(1)
}

#[cfg(test)]
mod tests {
    use super::TextMetrics;

    fn metrics() -> TextMetrics {
        TextMetrics {
            char_width: 10.0,
            line_height: 20.0,
            horizontal_inset: 0.0,
            vertical_inset: 0.0,
        }
    }

    #[test]
    fn short_text_fits_one_line() {
        assert_eq!(metrics().line_count("hello mars", 100.0), 1);
        assert_eq!(metrics().text_height("hello mars", 100.0), 20.0);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        // capacity 10: "potatoes" | "need" "water" would be 10 chars + space
        assert_eq!(metrics().line_count("potatoes need water", 100.0), 2);
    }

    #[test]
    fn hard_breaks_words_longer_than_a_line() {
        assert_eq!(metrics().line_count("aaaaaaaaaaaaaaaaaaaaaaaaa", 100.0), 3);
    }

    #[test]
    fn empty_text_still_occupies_one_line() {
        assert_eq!(metrics().line_count("", 100.0), 1);
    }

    #[test]
    fn newlines_start_new_paragraphs() {
        assert_eq!(metrics().line_count("one\ntwo\nthree", 100.0), 3);
    }

    #[test]
    fn narrow_containers_keep_at_least_one_character_per_line() {
        let metrics = TextMetrics::default();
        assert_eq!(metrics.line_capacity(10.0), 1);
    }
}
