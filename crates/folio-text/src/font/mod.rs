//! Font description, metrics and the metrics facility

mod database;
mod face;
mod shaping;
mod system;

pub use database::FontDatabase;
pub use face::FontFace;
pub use shaping::{PositionedGlyph, ShapedGlyph, ShapedRun};
pub use system::SystemFonts;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Fallback ratios used whenever a face cannot be measured
pub const FALLBACK_ASCENT: f32 = 0.8;
pub const FALLBACK_DESCENT: f32 = 0.2;
pub const FALLBACK_X_HEIGHT: f32 = 0.5;

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    /// Numeric weight (400 / 700)
    pub fn value(self) -> u16 {
        match self {
            Self::Normal => 400,
            Self::Bold => 700,
        }
    }
}

/// Font style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl From<FontStyle> for fontdb::Style {
    fn from(style: FontStyle) -> Self {
        match style {
            FontStyle::Normal => fontdb::Style::Normal,
            FontStyle::Italic => fontdb::Style::Italic,
        }
    }
}

/// A fully specified font for one measurement or draw call
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    /// Size in pixels
    pub size: f32,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
        }
    }

    pub fn with_size(&self, size: f32) -> Self {
        Self { size, ..self.clone() }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.weight = if bold { FontWeight::Bold } else { FontWeight::Normal };
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.style = if italic { FontStyle::Italic } else { FontStyle::Normal };
        self
    }

    /// Canvas font string, e.g. `italic bold 40px Inter`
    pub fn css(&self) -> String {
        let mut out = String::new();
        if self.style == FontStyle::Italic {
            out.push_str("italic ");
        }
        if self.weight == FontWeight::Bold {
            out.push_str("bold ");
        }
        out.push_str(&format!("{}px {}", self.size, self.family));
        out
    }
}

/// Per-em metric ratios reported by a metrics facility
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub cap_height: f32,
    pub x_height: f32,
}

impl NormalizedMetrics {
    /// Ratios used when no facility is available
    pub const FALLBACK: NormalizedMetrics = NormalizedMetrics {
        ascent: FALLBACK_ASCENT,
        descent: FALLBACK_DESCENT,
        cap_height: FALLBACK_ASCENT,
        x_height: FALLBACK_X_HEIGHT,
    };

    /// Scale to pixels at `font_size`
    pub fn scale(&self, font_size: f32) -> FontMetrics {
        let size = font_size.max(0.0);
        let ascent = (self.ascent * size).max(0.0);
        let descent = (self.descent * size).max(0.0);
        FontMetrics {
            font_size: size,
            x_height: (self.x_height * size).max(0.0),
            cap_height: (self.cap_height * size).max(0.0),
            ascent,
            descent,
            line_height: ascent + descent,
        }
    }
}

/// Font metrics in pixels, all distances measured from the baseline
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontMetrics {
    pub font_size: f32,
    pub x_height: f32,
    pub cap_height: f32,
    /// Distance above the baseline
    pub ascent: f32,
    /// Distance below the baseline
    pub descent: f32,
    /// ascent + descent
    pub line_height: f32,
}

impl FontMetrics {
    /// Approximate metrics for a size when the face cannot be measured
    pub fn approximate(font_size: f32) -> Self {
        NormalizedMetrics::FALLBACK.scale(font_size)
    }
}

/// A font-metrics measurement facility
pub trait MetricsSource {
    /// Measure the vertical metrics of a font
    fn font_metrics(&self, font: &FontSpec) -> Result<FontMetrics>;
}

/// Measure `font`, falling back to fixed ratios when the facility fails
pub fn metrics_or_fallback(source: &(impl MetricsSource + ?Sized), font: &FontSpec) -> FontMetrics {
    source.font_metrics(font).unwrap_or_else(|err| {
        tracing::debug!(font = %font.css(), %err, "Using approximate font metrics");
        FontMetrics::approximate(font.size)
    })
}
