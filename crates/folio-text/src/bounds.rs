//! Bounding boxes of lines and text blocks

use crate::config::HeightMode;
use crate::font::{FontSpec, metrics_or_fallback};
use crate::geometry::Rect;
use crate::line::Alignment;
use crate::measure::TextBackend;
use crate::typography;

/// Σ heights + (n - 1) × spacing
pub fn block_height(heights: &[f32], spacing: f32) -> f32 {
    if heights.is_empty() {
        return 0.0;
    }
    heights.iter().sum::<f32>() + (heights.len() - 1) as f32 * spacing
}

/// Top of every line, stacked downward from `anchor_y`
pub fn line_tops(anchor_y: f32, heights: &[f32], spacing: f32) -> Vec<f32> {
    let mut y = anchor_y;
    heights
        .iter()
        .map(|height| {
            let top = y;
            y += height + spacing;
            top
        })
        .collect()
}

/// X of a line `width` wide aligned inside `[left, left + span]`
pub fn aligned_x(alignment: Alignment, left: f32, span: f32, width: f32) -> f32 {
    alignment.place(left, span, width)
}

/// Per-line rectangles of a block whose envelope starts at `(x, y)`.
///
/// `lines` holds `(width, height, alignment)`; each line is aligned inside an
/// envelope as wide as the widest line.
pub fn line_rects(x: f32, y: f32, lines: &[(f32, f32, Alignment)], spacing: f32) -> Vec<Rect> {
    let envelope = lines.iter().map(|(w, _, _)| *w).fold(0.0, f32::max);
    let heights: Vec<f32> = lines.iter().map(|(_, h, _)| *h).collect();
    line_tops(y, &heights, spacing)
        .into_iter()
        .zip(lines)
        .map(|(top, (width, height, align))| {
            Rect::new(aligned_x(*align, x, envelope, *width), top, *width, *height)
        })
        .collect()
}

/// Whether a text block is one paragraph that only wrapped visually
pub fn is_wrapped_paragraph(raw_text: &str, line_count: usize) -> bool {
    line_count > 1 && !raw_text.contains('\n') && raw_text.trim().contains(' ')
}

/// One box around a paragraph that wrapped into several visual lines.
///
/// The box is as wide as the unwrapped text, as tall as the unwrapped text's
/// line, vertically centered on the wrapped lines and aligned against their
/// envelope. Returns `None` unless `raw_text` is a single wrapped paragraph.
pub fn collapse_paragraph(
    backend: &(impl TextBackend + ?Sized),
    font: &FontSpec,
    raw_text: &str,
    line_rects: &[Rect],
    alignment: Alignment,
    mode: HeightMode,
) -> Option<Rect> {
    if !is_wrapped_paragraph(raw_text, line_rects.len()) {
        return None;
    }
    let extent = Rect::union_all(line_rects)?;
    let text = raw_text.trim();
    let width = backend.measure_text(font, text).tight_width();
    let metrics = metrics_or_fallback(backend, font);
    let height = typography::line_height(text, &metrics, mode);

    Some(Rect::new(
        aligned_x(alignment, extent.x, extent.width, width),
        extent.y + (extent.height - height) / 2.0,
        width,
        height,
    ))
}
