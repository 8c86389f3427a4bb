//! Text decorations: highlight boxes and underlines

use crate::geometry::{Color, Rect};
use crate::position::PositionedLine;

/// Highlight padding as a fraction of the font size
pub const HIGHLIGHT_PADDING_RATIO: f32 = 0.1;

/// Underline geometry for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationGeometry {
    /// Start of the line
    pub x: f32,
    /// Center of the stroke
    pub y: f32,
    /// Length of the line
    pub width: f32,
    pub thickness: f32,
    pub color: Color,
}

/// Default decoration thickness for a font size
pub fn decoration_thickness(font_size: f32) -> f32 {
    (font_size / 14.0).max(1.0)
}

/// Underline one line at `baseline + descent`
pub fn underline(line: &PositionedLine, font_size: f32, descent: f32, color: Color) -> DecorationGeometry {
    DecorationGeometry {
        x: line.x,
        y: line.baseline + descent,
        width: line.width,
        thickness: decoration_thickness(font_size),
        color,
    }
}

/// Box drawn behind a highlighted line
pub fn highlight_rect(line: &PositionedLine, font_size: f32) -> Rect {
    line.rect().expand(font_size * HIGHLIGHT_PADDING_RATIO)
}
