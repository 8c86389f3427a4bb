//! Line positioning: 9-point block anchor plus per-line alignment

use crate::bounds::{block_height, line_tops};
use crate::config::{FitMode, HorizontalPosition, VerticalPosition};
use crate::geometry::Rect;
use crate::line::Alignment;

/// A line with absolute coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLine {
    pub index: usize,
    pub text: String,
    pub alignment: Alignment,
    /// Left edge of the ink box
    pub x: f32,
    /// Pen origin for drawing the text
    pub pen_x: f32,
    /// Top of the line box
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Absolute baseline y
    pub baseline: f32,
}

impl PositionedLine {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Measured input for one line
#[derive(Debug, Clone, PartialEq)]
pub struct LineInput {
    pub text: String,
    pub alignment: Alignment,
    pub width: f32,
    pub height: f32,
    pub baseline_offset: f32,
    /// Pen origin relative to the ink box's left edge
    pub ink_offset: f32,
}

/// True when not every line shares one alignment
pub fn is_mixed_alignment(alignments: impl IntoIterator<Item = Alignment>) -> bool {
    let mut iter = alignments.into_iter();
    match iter.next() {
        Some(first) => iter.any(|a| a != first),
        None => false,
    }
}

/// Top-left of a `width` × `height` block anchored inside `area`
pub fn block_anchor(
    area: Rect,
    width: f32,
    height: f32,
    horizontal: HorizontalPosition,
    vertical: VerticalPosition,
) -> (f32, f32) {
    let x = match horizontal {
        HorizontalPosition::Left => area.x,
        HorizontalPosition::Center => area.x + (area.width - width) / 2.0,
        HorizontalPosition::Right => area.right() - width,
    };
    let y = match vertical {
        VerticalPosition::Top => area.y,
        VerticalPosition::Center => area.y + (area.height - height) / 2.0,
        VerticalPosition::Bottom => area.bottom() - height,
    };
    (x, y)
}

/// Place every line inside `area` (the container minus padding).
///
/// Lines sharing one alignment are aligned inside the block envelope and the
/// envelope is moved to the anchor, so the paragraph travels as a group.
/// Mixed alignments are each honored against the whole area and the block
/// is never recentered, except in manual mode where the envelope is always
/// moved to the anchor and lines keep their alignment inside it.
pub fn position_lines(
    area: Rect,
    lines: &[LineInput],
    spacing: f32,
    horizontal: HorizontalPosition,
    vertical: VerticalPosition,
    mode: FitMode,
) -> Vec<PositionedLine> {
    if lines.is_empty() {
        return Vec::new();
    }
    let heights: Vec<f32> = lines.iter().map(|l| l.height).collect();
    let envelope = lines.iter().map(|l| l.width).fold(0.0, f32::max);
    let height = block_height(&heights, spacing);
    let (block_x, block_y) = block_anchor(area, envelope, height, horizontal, vertical);

    let per_line = mode == FitMode::FillCanvas && is_mixed_alignment(lines.iter().map(|l| l.alignment));
    let (span_x, span_width) = if per_line { (area.x, area.width) } else { (block_x, envelope) };

    line_tops(block_y, &heights, spacing)
        .into_iter()
        .zip(lines)
        .enumerate()
        .map(|(index, (top, line))| {
            let x = line.alignment.place(span_x, span_width, line.width);
            PositionedLine {
                index,
                text: line.text.clone(),
                alignment: line.alignment,
                x,
                pen_x: x + line.ink_offset,
                y: top,
                width: line.width,
                height: line.height,
                baseline: top + line.baseline_offset,
            }
        })
        .collect()
}
