//! Folio Canvas - Canvas 2D Surface
//!
//! This crate draws laid-out Folio text into pixels:
//! - Canvas 2D context over a tiny-skia pixmap with a save/restore stack
//! - Glyph rasterization from font outlines (ttf-parser)
//! - PNG output

pub mod context2d;
mod rasterizer;
mod text;

pub use context2d::{CanvasRenderingContext2D, CanvasState};

/// Canvas error types
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Failed to encode PNG: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, CanvasError>;
