//! Canvas 2D Rendering Context
//!
//! CanvasRenderingContext2D over a tiny-skia pixmap.

use std::path::Path;
use std::sync::Arc;

use folio_text::{Color, FontSpec, Rect, Surface, SystemFonts, TextMeasure, TextMeasurement};
use tiny_skia::{BlendMode, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::{CanvasError, Result};

/// Canvas state (for save/restore)
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasState {
    pub fill_color: Color,
    pub font: FontSpec,
    pub line_width: f32,
    pub global_alpha: f32,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            fill_color: Color::BLACK,
            font: FontSpec::new("sans-serif", 10.0),
            line_width: 1.0,
            global_alpha: 1.0,
        }
    }
}

/// Canvas 2D rendering context
pub struct CanvasRenderingContext2D {
    pixmap: Pixmap,
    state: CanvasState,
    /// Saved states
    stack: Vec<CanvasState>,
    /// Font backend for text; without one text draws nothing
    fonts: Option<Arc<SystemFonts>>,
}

impl CanvasRenderingContext2D {
    /// Create a transparent canvas
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(CanvasError::InvalidSize { width, height })?;
        Ok(Self {
            pixmap,
            state: CanvasState::default(),
            stack: Vec::new(),
            fonts: None,
        })
    }

    /// Use `fonts` to measure and draw text
    pub fn with_fonts(mut self, fonts: Arc<SystemFonts>) -> Self {
        self.fonts = Some(fonts);
        self
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CanvasState {
        &mut self.state
    }

    // State management

    /// Save current state
    pub fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    /// Restore previous state; unbalanced calls are ignored
    pub fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.state.fill_color = color;
    }

    pub fn set_font(&mut self, font: &FontSpec) {
        self.state.font = font.clone();
    }

    pub fn set_line_width(&mut self, width: f32) {
        if width > 0.0 && width.is_finite() {
            self.state.line_width = width;
        }
    }

    pub fn set_global_alpha(&mut self, alpha: f32) {
        if (0.0..=1.0).contains(&alpha) {
            self.state.global_alpha = alpha;
        }
    }

    fn paint(&self, color: Color) -> Paint<'static> {
        let alpha = (f32::from(color.a) * self.state.global_alpha).round() as u8;
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, alpha);
        paint.anti_alias = true;
        paint
    }

    /// Fill the whole canvas
    pub fn fill(&mut self, color: Color) {
        self.pixmap.fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    // Drawing rectangles

    /// Fill a rectangle with the fill color
    pub fn fill_rect(&mut self, rect: Rect) {
        let Some(area) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
            return;
        };
        let paint = self.paint(self.state.fill_color);
        self.pixmap.fill_rect(area, &paint, Transform::identity(), None);
    }

    /// Clear a rectangle to transparent
    pub fn clear_rect(&mut self, rect: Rect) {
        let Some(area) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
            return;
        };
        let mut paint = Paint::default();
        paint.blend_mode = BlendMode::Clear;
        self.pixmap.fill_rect(area, &paint, Transform::identity(), None);
    }

    /// Stroke a straight line
    pub fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color) {
        let mut builder = PathBuilder::new();
        builder.move_to(from.0, from.1);
        builder.line_to(to.0, to.1);
        let Some(path) = builder.finish() else {
            return;
        };
        let stroke = Stroke {
            width: if width > 0.0 { width } else { self.state.line_width },
            ..Stroke::default()
        };
        let paint = self.paint(color);
        self.pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    // Text

    /// Fill text with its alphabetic baseline at `y`; returns the number of
    /// glyphs that left ink
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) -> usize {
        let Some(fonts) = self.fonts.clone() else {
            tracing::debug!("Canvas has no font backend, skipping text");
            return 0;
        };
        let paint = self.paint(self.state.fill_color);
        let font = self.state.font.clone();
        let glyphs = crate::text::fill_glyphs(&mut self.pixmap, &fonts, &font, text, (x, y), &paint);
        tracing::trace!(text, glyphs, x, y, "Filled text");
        glyphs
    }

    /// Measure text in the current font
    pub fn measure_current(&self, text: &str) -> TextMeasurement {
        self.measure_text(&self.state.font, text)
    }

    // Pixels

    /// Unpremultiplied color at a pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let p = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(p.red(), p.green(), p.blue(), p.alpha()))
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap.encode_png().map_err(|e| CanvasError::Encode(e.to_string()))
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.pixmap
            .save_png(path)
            .map_err(|e| CanvasError::Encode(e.to_string()))
    }
}

impl Surface for CanvasRenderingContext2D {
    fn save(&mut self) {
        CanvasRenderingContext2D::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2D::restore(self);
    }

    fn set_font(&mut self, font: &FontSpec) {
        CanvasRenderingContext2D::set_font(self, font);
    }

    fn set_fill_color(&mut self, color: Color) {
        CanvasRenderingContext2D::set_fill_color(self, color);
    }

    fn fill_rect(&mut self, rect: Rect) {
        CanvasRenderingContext2D::fill_rect(self, rect);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        CanvasRenderingContext2D::fill_text(self, text, x, y);
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color) {
        CanvasRenderingContext2D::stroke_line(self, from, to, width, color);
    }
}

impl TextMeasure for CanvasRenderingContext2D {
    fn measure_text(&self, font: &FontSpec, text: &str) -> TextMeasurement {
        match &self.fonts {
            Some(fonts) => fonts.measure_text(font, text),
            None => TextMeasurement::default(),
        }
    }
}
