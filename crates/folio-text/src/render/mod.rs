//! Drawing laid-out text to a 2D surface

pub mod decorations;
mod recording;

pub use decorations::{DecorationGeometry, HIGHLIGHT_PADDING_RATIO};
pub use recording::{DrawCommand, RecordingSurface};

use crate::config::TextStyles;
use crate::font::FontSpec;
use crate::geometry::{Color, Rect};
use crate::position::PositionedLine;

/// A 2D drawing surface (Canvas 2D subset)
pub trait Surface {
    /// Push the drawing state
    fn save(&mut self);

    /// Pop the drawing state
    fn restore(&mut self);

    fn set_font(&mut self, font: &FontSpec);

    fn set_fill_color(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect);

    /// Fill `text` with its alphabetic baseline at `y`
    fn fill_text(&mut self, text: &str, x: f32, y: f32);

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color);
}

/// Everything the renderer needs besides the lines
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub font: FontSpec,
    pub color: Color,
    pub styles: TextStyles,
    /// Font descent, for underline placement
    pub descent: f32,
}

/// Draws positioned lines at their baselines
pub struct TextRenderer;

impl TextRenderer {
    /// Draw `lines` onto `surface`; only the surface is mutated
    pub fn render(surface: &mut (impl Surface + ?Sized), lines: &[PositionedLine], style: &RenderStyle) {
        if lines.is_empty() {
            return;
        }
        surface.save();
        surface.set_font(&style.font);

        for line in lines.iter().filter(|l| !l.text.is_empty()) {
            if style.styles.highlight {
                let color = style.styles.highlight_color.unwrap_or(Color::HIGHLIGHT);
                surface.set_fill_color(color);
                surface.fill_rect(decorations::highlight_rect(line, style.font.size));
            }

            surface.set_fill_color(style.color);
            surface.fill_text(&line.text, line.pen_x, line.baseline);

            if style.styles.underline {
                let geom = decorations::underline(line, style.font.size, style.descent, style.color);
                surface.stroke_line(
                    (geom.x, geom.y),
                    (geom.x + geom.width, geom.y),
                    geom.thickness,
                    geom.color,
                );
            }
        }

        surface.restore();
    }
}
