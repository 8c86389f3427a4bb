//! Folio Text - Text Layout Engine
//!
//! This crate provides the text layout core of the Folio canvas editor:
//! - Font metrics (fontdb + ttf-parser) with fixed-ratio fallback
//! - Typography-aware line heights (cap-height / x-height)
//! - Greedy word wrapping that never splits a word
//! - Auto-fit font size search under width and height constraints
//! - Block anchoring, per-line alignment and bounding boxes
//! - Drawing to any 2D surface

pub mod autofit;
pub mod bounds;
pub mod config;
pub mod engine;
pub mod font;
pub mod geometry;
pub mod line;
pub mod measure;
pub mod persist;
pub mod position;
pub mod render;
pub mod typography;
pub mod wrap;

pub use autofit::{FitConstraints, find_font_size, fit_manual};
pub use config::{
    ConfigPatch, FitMode, FontSize, HeightMode, HorizontalPosition, LayoutPolicy,
    TextBlockConfig, TextStyles, VerticalPosition,
};
pub use engine::{TextEngine, TextLayout};
pub use font::{
    FontDatabase, FontMetrics, FontSpec, FontStyle, FontWeight, MetricsSource,
    NormalizedMetrics, SystemFonts, metrics_or_fallback,
};
pub use geometry::{Color, Insets, Rect};
pub use line::{Alignment, FramePadding, LineMetrics, TextFrame, TextLine};
pub use measure::{FixedAdvance, TextBackend, TextMeasure, TextMeasurement};
pub use persist::TextSnapshot;
pub use position::{PositionedLine, is_mixed_alignment, position_lines};
pub use render::{DrawCommand, RecordingSurface, RenderStyle, Surface, TextRenderer};
pub use typography::{has_capitals, line_height};
pub use wrap::{split_lines, wrap_text};

/// Text engine error types
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("Font metrics unavailable for {0}")]
    MetricsUnavailable(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Failed to parse font: {0}")]
    FontParsing(String),

    #[error("Invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TextError>;
