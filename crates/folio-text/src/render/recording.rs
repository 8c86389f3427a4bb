//! Surface that records draw calls instead of rasterizing them

use super::Surface;
use crate::font::FontSpec;
use crate::geometry::{Color, Rect};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    SetFont(String),
    SetFillColor(Color),
    FillRect(Rect),
    FillText { text: String, x: f32, y: f32 },
    StrokeLine { from: (f32, f32), to: (f32, f32), width: f32, color: Color },
}

/// Records every call made by a renderer
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded text draws as `(text, x, baseline_y)`
    pub fn texts(&self) -> Vec<(&str, f32, f32)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillText { text, x, y } => Some((text.as_str(), *x, *y)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.commands.push(DrawCommand::SetFont(font.css()));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetFillColor(color));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::FillRect(rect));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCommand::FillText { text: text.to_string(), x, y });
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeLine { from, to, width, color });
    }
}
