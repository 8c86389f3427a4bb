//! Shaped text runs (rustybuzz)

use rustybuzz::{Face, UnicodeBuffer, shape};

/// A shaped glyph with position
#[derive(Debug, Clone, Copy)]
pub struct ShapedGlyph {
    /// Glyph ID in the font
    pub glyph_id: u16,
    /// X offset from current position (in font units)
    pub x_offset: i32,
    /// Y offset from current position (in font units)
    pub y_offset: i32,
    /// Horizontal advance (in font units)
    pub x_advance: i32,
}

/// A run of shaped glyphs
#[derive(Debug, Clone)]
pub struct ShapedRun {
    pub glyphs: Vec<ShapedGlyph>,
    /// Font size used for shaping
    pub font_size: f32,
    /// Units per em from the font
    pub units_per_em: f32,
}

impl ShapedRun {
    /// Shape `text` with raw font data
    pub fn shape(font_data: &[u8], face_index: u32, text: &str, font_size: f32) -> Option<Self> {
        let face = Face::from_slice(font_data, face_index)?;

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        let output = shape(&face, &[], buffer);

        let glyphs = output
            .glyph_infos()
            .iter()
            .zip(output.glyph_positions())
            .map(|(info, pos)| ShapedGlyph {
                glyph_id: info.glyph_id as u16,
                x_offset: pos.x_offset,
                y_offset: pos.y_offset,
                x_advance: pos.x_advance,
            })
            .collect();

        Some(Self {
            glyphs,
            font_size,
            units_per_em: f32::from(face.units_per_em() as u16).max(1.0),
        })
    }

    /// Scale factor to convert font units to pixels
    pub fn scale(&self) -> f32 {
        self.font_size / self.units_per_em
    }

    /// Total advance width in pixels
    pub fn width(&self) -> f32 {
        let scale = self.scale();
        self.glyphs.iter().map(|g| g.x_advance as f32 * scale).sum()
    }

    /// Iterate over glyphs with pixel positions relative to the run origin
    pub fn positioned_glyphs(&self) -> impl Iterator<Item = PositionedGlyph> + '_ {
        let scale = self.scale();
        let mut x = 0.0;

        self.glyphs.iter().map(move |g| {
            let pos = PositionedGlyph {
                glyph_id: g.glyph_id,
                x: x + g.x_offset as f32 * scale,
                y: g.y_offset as f32 * scale,
            };
            x += g.x_advance as f32 * scale;
            pos
        })
    }
}

/// A glyph with pixel position
#[derive(Debug, Clone, Copy)]
pub struct PositionedGlyph {
    pub glyph_id: u16,
    pub x: f32,
    /// Offset above the baseline, in pixels
    pub y: f32,
}
