//! Font backend over a real font database

use super::{FontDatabase, FontFace, FontMetrics, FontSpec, MetricsSource, ShapedRun};
use crate::measure::{TextMeasure, TextMeasurement};
use crate::{Result, TextError};

/// Measures and shapes text with faces from a [`FontDatabase`]
pub struct SystemFonts {
    db: FontDatabase,
}

impl SystemFonts {
    pub fn new(db: FontDatabase) -> Self {
        Self { db }
    }

    /// Backend over the fonts installed on this machine
    #[cfg(feature = "system-fonts")]
    pub fn with_system_fonts() -> Self {
        Self::new(FontDatabase::with_system_fonts())
    }

    pub fn database(&self) -> &FontDatabase {
        &self.db
    }

    /// Shape `text` with the face matching `font`
    pub fn shape(&self, font: &FontSpec, text: &str) -> Option<ShapedRun> {
        let id = self.db.query(font)?;
        self.db
            .with_face_data(id, |data, index| ShapedRun::shape(data, index, text, font.size))
            .flatten()
    }

    /// Run `f` against the parsed face matching `font`
    pub fn with_face<R>(&self, font: &FontSpec, f: impl FnOnce(&FontFace<'_>) -> R) -> Option<R> {
        let id = self.db.query(font)?;
        self.db
            .with_face_data(id, |data, index| FontFace::parse(data, index).map(|face| f(&face)))
            .flatten()
    }

    /// Whether drawing `font` needs a synthetic oblique
    pub fn needs_synthetic_italic(&self, font: &FontSpec) -> bool {
        font.style == super::FontStyle::Italic
            && self.db.query(font).is_some_and(|id| !self.db.is_italic_face(id))
    }

    fn ink_box(&self, font: &FontSpec, run: &ShapedRun) -> Option<(f32, f32, f32, f32)> {
        let scale = run.scale();
        self.with_face(font, |face| {
            let mut bounds: Option<(f32, f32, f32, f32)> = None;
            for glyph in run.positioned_glyphs() {
                let Some((x_min, y_min, x_max, y_max)) =
                    face.glyph_bounds(ttf_parser::GlyphId(glyph.glyph_id))
                else {
                    continue;
                };
                let left = glyph.x + x_min * scale;
                let right = glyph.x + x_max * scale;
                let top = glyph.y + y_max * scale;
                let bottom = glyph.y + y_min * scale;
                bounds = Some(match bounds {
                    None => (left, bottom, right, top),
                    Some((l, b, r, t)) => (l.min(left), b.min(bottom), r.max(right), t.max(top)),
                });
            }
            bounds
        })
        .flatten()
    }
}

impl TextMeasure for SystemFonts {
    fn measure_text(&self, font: &FontSpec, text: &str) -> TextMeasurement {
        if text.is_empty() || font.size <= 0.0 {
            return TextMeasurement::default();
        }
        let Some(run) = self.shape(font, text) else {
            tracing::warn!(font = %font.css(), "No face available to measure text");
            return TextMeasurement::default();
        };

        let width = run.width();
        match self.ink_box(font, &run) {
            Some((left, bottom, right, top)) => TextMeasurement {
                width,
                actual_bounding_box_left: -left,
                actual_bounding_box_right: right,
                actual_bounding_box_ascent: top,
                actual_bounding_box_descent: -bottom,
            },
            None => TextMeasurement { width, ..Default::default() },
        }
    }
}

impl MetricsSource for SystemFonts {
    fn font_metrics(&self, font: &FontSpec) -> Result<FontMetrics> {
        self.with_face(font, |face| face.normalized_metrics().scale(font.size))
            .ok_or_else(|| TextError::MetricsUnavailable(font.css()))
    }
}
