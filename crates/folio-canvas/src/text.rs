//! Text drawing
//!
//! Shapes a run with the font backend and fills each glyph outline.

use folio_text::{FontSpec, SystemFonts};
use tiny_skia::{FillRule, Paint, Pixmap, Transform};
use ttf_parser::GlyphId;

use crate::rasterizer::{GlyphPlacement, OBLIQUE_SKEW, glyph_path};

/// Fill `text` with its baseline origin at `(x, y)`.
///
/// Returns the number of glyphs that produced ink.
pub(crate) fn fill_glyphs(
    pixmap: &mut Pixmap,
    fonts: &SystemFonts,
    font: &FontSpec,
    text: &str,
    (x, y): (f32, f32),
    paint: &Paint<'_>,
) -> usize {
    let Some(run) = fonts.shape(font, text) else {
        tracing::warn!(font = %font.css(), "No face available to draw text");
        return 0;
    };
    let skew = if fonts.needs_synthetic_italic(font) { OBLIQUE_SKEW } else { 0.0 };
    let scale = run.scale();

    fonts
        .with_face(font, |face| {
            let mut drawn = 0;
            for glyph in run.positioned_glyphs() {
                let placement = GlyphPlacement {
                    scale,
                    origin_x: x + glyph.x,
                    origin_y: y - glyph.y,
                    skew,
                };
                if let Some(path) = glyph_path(face.ttf_face(), GlyphId(glyph.glyph_id), placement) {
                    pixmap.fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
                    drawn += 1;
                }
            }
            drawn
        })
        .unwrap_or(0)
}
