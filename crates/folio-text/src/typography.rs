//! Typography-aware line heights
//!
//! A line made only of lowercase letters gets an x-height box, a line with
//! capitals or digits a cap-height box. The same value places the glyph
//! baseline, so the ink fills the box it is measured with.

use crate::config::HeightMode;
use crate::font::FontMetrics;

/// True if `text` holds any uppercase letter or ASCII digit.
///
/// Digits count as tall characters.
pub fn has_capitals(text: &str) -> bool {
    text.chars().any(|c| c.is_uppercase() || c.is_ascii_digit())
}

/// Height of one line of `text`
pub fn line_height(text: &str, metrics: &FontMetrics, mode: HeightMode) -> f32 {
    match mode {
        HeightMode::Tight => {
            if has_capitals(text) {
                metrics.cap_height
            } else {
                metrics.x_height
            }
        }
        HeightMode::FullLineBox => metrics.ascent + metrics.descent,
    }
}

/// Distance from the top of a line box to its baseline
pub fn baseline_offset(text: &str, metrics: &FontMetrics, mode: HeightMode) -> f32 {
    match mode {
        HeightMode::Tight => line_height(text, metrics, mode),
        HeightMode::FullLineBox => metrics.ascent,
    }
}
