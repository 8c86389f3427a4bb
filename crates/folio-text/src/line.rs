//! Laid-out lines and the frame around them

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Line alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// X of a box `width` wide aligned inside `[left, left + span]`
    pub fn place(self, left: f32, span: f32, width: f32) -> f32 {
        match self {
            Alignment::Left => left,
            Alignment::Center => left + (span - width) / 2.0,
            Alignment::Right => left + span - width,
        }
    }
}

/// Cached measurement of one line
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineMetrics {
    /// Ink width (falls back to advance width)
    pub width: f32,
    /// Advance width
    pub advance: f32,
    /// Typography-aware height
    pub height: f32,
    /// Distance from the line top to its baseline
    pub baseline_offset: f32,
    /// Font descent below the baseline
    pub descent: f32,
}

/// One display line produced by wrapping
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub index: usize,
    pub alignment: Alignment,
    pub metrics: Option<LineMetrics>,
    pub bounds: Option<Rect>,
}

impl TextLine {
    pub fn new(text: impl Into<String>, index: usize, alignment: Alignment) -> Self {
        Self {
            text: text.into(),
            index,
            alignment,
            metrics: None,
            bounds: None,
        }
    }
}

/// Padding between the frame and the text block
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FramePadding {
    pub horizontal: f32,
    pub vertical: f32,
}

/// Auto-sized frame around all lines
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextFrame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub padding: FramePadding,
}

impl TextFrame {
    /// Frame around `lines` separated by `spacing`.
    ///
    /// Width is the widest line plus horizontal padding on both sides, height
    /// the stacked line heights plus vertical padding on both sides.
    pub fn around(lines: &[Rect], spacing: f32, padding: FramePadding) -> Self {
        let Some(envelope) = Rect::union_all(lines) else {
            return Self { padding, ..Default::default() };
        };
        let widest = lines.iter().map(|r| r.width).fold(0.0, f32::max);
        let heights: Vec<f32> = lines.iter().map(|r| r.height).collect();
        let height = crate::bounds::block_height(&heights, spacing);

        Self {
            x: envelope.x - padding.horizontal,
            y: envelope.y - padding.vertical,
            width: widest + padding.horizontal * 2.0,
            height: height + padding.vertical * 2.0,
            padding,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}
