//! Font face with parsed metrics

use ttf_parser::{Face, GlyphId};

use super::{FALLBACK_X_HEIGHT, NormalizedMetrics};

/// Parsed font face with metrics
pub struct FontFace<'a> {
    face: Face<'a>,
}

impl<'a> FontFace<'a> {
    /// Parse a font face from data
    pub fn parse(data: &'a [u8], index: u32) -> Option<Self> {
        Face::parse(data, index).ok().map(|face| Self { face })
    }

    /// Units per em
    pub fn units_per_em(&self) -> f32 {
        f32::from(self.face.units_per_em().max(1))
    }

    /// Per-em ratios of the vertical metrics.
    ///
    /// Faces without OS/2 cap or x heights get the fallback ratios for the
    /// missing values.
    pub fn normalized_metrics(&self) -> NormalizedMetrics {
        let upem = self.units_per_em();
        let ascent = f32::from(self.face.ascender()) / upem;
        let descent = -f32::from(self.face.descender()) / upem;
        let cap_height = self
            .face
            .capital_height()
            .filter(|h| *h > 0)
            .map_or(ascent, |h| f32::from(h) / upem);
        let x_height = self
            .face
            .x_height()
            .filter(|h| *h > 0)
            .map_or(FALLBACK_X_HEIGHT, |h| f32::from(h) / upem);

        NormalizedMetrics {
            ascent: ascent.max(0.0),
            descent: descent.max(0.0),
            cap_height,
            x_height,
        }
    }

    /// Glyph ink box in font units: (x_min, y_min, x_max, y_max)
    pub fn glyph_bounds(&self, glyph_id: GlyphId) -> Option<(f32, f32, f32, f32)> {
        self.face.glyph_bounding_box(glyph_id).map(|bbox| {
            (
                f32::from(bbox.x_min),
                f32::from(bbox.y_min),
                f32::from(bbox.x_max),
                f32::from(bbox.y_max),
            )
        })
    }

    /// Get underlying ttf-parser face
    pub fn ttf_face(&self) -> &Face<'a> {
        &self.face
    }
}
