//! Glyph outlines as tiny-skia paths

use ttf_parser::{Face, GlyphId, OutlineBuilder};

/// Horizontal shear of a synthetic oblique (about 12 degrees)
pub(crate) const OBLIQUE_SKEW: f32 = 0.21;

/// Where and how large to place one glyph outline
#[derive(Debug, Clone, Copy)]
pub(crate) struct GlyphPlacement {
    /// Font units to pixels
    pub scale: f32,
    /// Pen position on the baseline, in pixels
    pub origin_x: f32,
    pub origin_y: f32,
    /// Horizontal shift per unit of height
    pub skew: f32,
}

/// Outline of `glyph` in surface coordinates, `None` for blank glyphs
pub(crate) fn glyph_path(face: &Face<'_>, glyph: GlyphId, placement: GlyphPlacement) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new(placement);
    face.outline_glyph(glyph, &mut builder)?;
    builder.finish()
}

/// Converts ttf-parser outlines (y up) to tiny-skia paths (y down)
struct PathBuilder {
    builder: tiny_skia::PathBuilder,
    placement: GlyphPlacement,
}

impl PathBuilder {
    fn new(placement: GlyphPlacement) -> Self {
        Self {
            builder: tiny_skia::PathBuilder::new(),
            placement,
        }
    }

    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        let p = self.placement;
        (p.origin_x + (x + y * p.skew) * p.scale, p.origin_y - y * p.scale)
    }

    fn finish(self) -> Option<tiny_skia::Path> {
        self.builder.finish()
    }
}

impl OutlineBuilder for PathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x, y) = self.point(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x2, y2) = self.point(x2, y2);
        let (x, y) = self.point(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
