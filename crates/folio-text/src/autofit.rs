//! Auto-fit font size search
//!
//! Candidates lie on a fixed grid stepping down from the maximum size, so a
//! larger height budget only ever adds accepted candidates and never lowers
//! the result.

use crate::bounds::block_height;
use crate::config::HeightMode;
use crate::font::{FontSpec, metrics_or_fallback};
use crate::measure::TextBackend;
use crate::typography;
use crate::wrap::{split_lines, wrap_text};

/// Step between candidate sizes, in pixels
pub const DEFAULT_STEP: f32 = 2.0;

/// Largest size the search will try
pub const MAX_SIZE: f32 = 4096.0;

/// Heuristic start ratio when the line count is known up front
const ESTIMATE_RATIO: f32 = 0.8;

/// Space and size bounds for [`find_font_size`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitConstraints {
    pub max_width: f32,
    pub max_height: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Gap between lines
    pub line_spacing: f32,
    pub step: f32,
    /// Known approximate line count, used to skip oversized candidates
    pub estimated_lines: Option<usize>,
}

impl FitConstraints {
    pub fn new(max_width: f32, max_height: f32, min_size: f32, max_size: f32) -> Self {
        Self {
            max_width,
            max_height,
            min_size,
            max_size,
            line_spacing: 0.0,
            step: DEFAULT_STEP,
            estimated_lines: None,
        }
    }

    pub fn line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    pub fn estimated_lines(mut self, lines: usize) -> Self {
        self.estimated_lines = Some(lines);
        self
    }

    /// Largest size worth trying
    fn start_cap(&self) -> f32 {
        let cap = self.max_size.min(self.max_height);
        match self.estimated_lines {
            Some(lines) if lines > 0 => cap.min(self.max_height / lines as f32 * ESTIMATE_RATIO),
            _ => cap,
        }
    }
}

/// Height of `lines` at `font`, stacked with `spacing`
pub fn stacked_height(
    backend: &(impl TextBackend + ?Sized),
    font: &FontSpec,
    lines: &[String],
    spacing: f32,
    mode: HeightMode,
) -> f32 {
    let metrics = metrics_or_fallback(backend, font);
    let heights: Vec<f32> = lines
        .iter()
        .map(|line| typography::line_height(line, &metrics, mode))
        .collect();
    block_height(&heights, spacing)
}

/// Largest font size at which `text` wraps to fit both dimensions.
///
/// Candidates step down from `max_size` (clamped to [`MAX_SIZE`]), so the
/// search tries at most `(max - min) / step + 1` sizes. Falls back to
/// `min_size` when nothing fits, when the constraints are degenerate or
/// when `min_size >= max_size`. The result may then overflow.
pub fn find_font_size(
    backend: &(impl TextBackend + ?Sized),
    base_font: &FontSpec,
    text: &str,
    constraints: &FitConstraints,
    mode: HeightMode,
) -> f32 {
    let c = constraints;
    if text.trim().is_empty()
        || !(c.max_width > 0.0 && c.max_height > 0.0 && c.step > 0.0)
        || !c.min_size.is_finite()
        || c.max_size.is_nan()
        || c.min_size >= c.max_size
    {
        return c.min_size;
    }

    // Grid anchored at the clamped maximum; the start skips down to the cap
    let top = c.max_size.min(MAX_SIZE);
    let cap = c.start_cap().min(top);
    let start = if top > cap { top - ((top - cap) / c.step).ceil() * c.step } else { top };
    if start < c.min_size {
        return c.min_size;
    }
    let candidates = ((start - c.min_size) / c.step).floor() as usize + 1;

    for k in 0..candidates {
        let candidate = start - k as f32 * c.step;
        let font = base_font.with_size(candidate);
        let lines = wrap_text(backend, &font, text, c.max_width);
        let height = stacked_height(backend, &font, &lines, c.line_spacing, mode);
        let fits_width = lines
            .iter()
            .all(|line| backend.measure_text(&font, line).width <= c.max_width);

        tracing::trace!(candidate, height, fits_width, lines = lines.len(), "Auto-fit candidate");
        if fits_width && height <= c.max_height {
            tracing::debug!(size = candidate, iterations = k + 1, "Auto-fit accepted");
            return candidate;
        }
    }

    tracing::debug!(size = c.min_size, iterations = candidates, "Auto-fit fell back to minimum size");
    c.min_size
}

/// Manual mode: keep `font.size` and the explicit line breaks, shrinking
/// proportionally only when the longest line is wider than `available_width`.
/// Height overflow is tolerated.
pub fn fit_manual(
    backend: &(impl TextBackend + ?Sized),
    font: &FontSpec,
    text: &str,
    available_width: f32,
) -> f32 {
    if available_width <= 0.0 {
        return font.size;
    }
    let needed = split_lines(text)
        .iter()
        .map(|line| backend.measure_text(font, line).width)
        .fold(0.0, f32::max);
    if needed > available_width {
        font.size * available_width / needed
    } else {
        font.size
    }
}
