//! Text measurement capability
//!
//! Layout never reaches for a global canvas: every component receives a
//! measurer, so the engine can run headless.

use crate::font::{FontMetrics, FontSpec, MetricsSource, NormalizedMetrics};
use crate::typography::has_capitals;
use crate::{Result, TextError};

/// Result of measuring a run of text (canvas `measureText` semantics)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMeasurement {
    /// Advance width
    pub width: f32,
    /// Ink extent left of the origin (positive = to the left)
    pub actual_bounding_box_left: f32,
    /// Ink extent right of the origin
    pub actual_bounding_box_right: f32,
    /// Ink extent above the baseline
    pub actual_bounding_box_ascent: f32,
    /// Ink extent below the baseline
    pub actual_bounding_box_descent: f32,
}

impl TextMeasurement {
    /// Width of the visible ink, or the advance width when there is no ink
    pub fn tight_width(&self) -> f32 {
        let ink = self.actual_bounding_box_left + self.actual_bounding_box_right;
        if ink > 0.0 { ink } else { self.width.max(0.0) }
    }

    /// Distance from the left edge of [`tight_width`](Self::tight_width) to
    /// the pen origin
    pub fn ink_offset(&self) -> f32 {
        let ink = self.actual_bounding_box_left + self.actual_bounding_box_right;
        if ink > 0.0 { self.actual_bounding_box_left } else { 0.0 }
    }
}

/// Measures text without drawing it
pub trait TextMeasure {
    fn measure_text(&self, font: &FontSpec, text: &str) -> TextMeasurement;
}

/// Everything the layout pipeline needs from a font backend
pub trait TextBackend: TextMeasure + MetricsSource {}

impl<T: TextMeasure + MetricsSource> TextBackend for T {}

/// Deterministic measurer: every character advances `size * ratio`.
///
/// Used for headless layout and tests. Metrics come from fixed ratios, or
/// are reported as unavailable to exercise the fallback path.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvance {
    advance_ratio: f32,
    metrics: Option<NormalizedMetrics>,
}

impl FixedAdvance {
    pub const DEFAULT_RATIO: f32 = 0.5;

    /// Ratios close to a typical sans-serif face
    pub const METRICS: NormalizedMetrics = NormalizedMetrics {
        ascent: 0.9,
        descent: 0.25,
        cap_height: 0.7,
        x_height: 0.5,
    };

    pub fn new(advance_ratio: f32) -> Self {
        Self {
            advance_ratio,
            metrics: Some(Self::METRICS),
        }
    }

    /// Use custom metric ratios
    pub fn with_metrics(mut self, metrics: NormalizedMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Report metrics as unavailable
    pub fn without_metrics(mut self) -> Self {
        self.metrics = None;
        self
    }

    fn metrics_for(&self, font: &FontSpec) -> FontMetrics {
        self.metrics
            .unwrap_or(NormalizedMetrics::FALLBACK)
            .scale(font.size)
    }
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RATIO)
    }
}

impl TextMeasure for FixedAdvance {
    fn measure_text(&self, font: &FontSpec, text: &str) -> TextMeasurement {
        let width = text.chars().count() as f32 * font.size.max(0.0) * self.advance_ratio;
        if text.trim().is_empty() {
            return TextMeasurement { width, ..Default::default() };
        }
        let metrics = self.metrics_for(font);
        let ascent = if has_capitals(text) { metrics.cap_height } else { metrics.x_height };
        TextMeasurement {
            width,
            actual_bounding_box_left: 0.0,
            actual_bounding_box_right: width,
            actual_bounding_box_ascent: ascent,
            actual_bounding_box_descent: 0.0,
        }
    }
}

impl MetricsSource for FixedAdvance {
    fn font_metrics(&self, font: &FontSpec) -> Result<FontMetrics> {
        self.metrics
            .map(|m| m.scale(font.size))
            .ok_or_else(|| TextError::MetricsUnavailable(font.css()))
    }
}
