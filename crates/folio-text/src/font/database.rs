//! Font database for loading and matching fonts

use fontdb::{Database, Family};

use super::FontSpec;
use crate::{Result, TextError};

/// Family names that map to generic CSS families
fn generic_family(name: &str) -> Option<Family<'static>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "serif" => Some(Family::Serif),
        "sans-serif" => Some(Family::SansSerif),
        "monospace" => Some(Family::Monospace),
        "cursive" => Some(Family::Cursive),
        "fantasy" => Some(Family::Fantasy),
        _ => None,
    }
}

/// Font database for loading and matching fonts
pub struct FontDatabase {
    db: Database,
}

impl FontDatabase {
    /// Create a new empty font database
    pub fn new() -> Self {
        Self { db: Database::new() }
    }

    /// Create a font database with system fonts loaded
    pub fn with_system_fonts() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "Loaded system fonts");
        Self { db }
    }

    /// Load a font from file
    pub fn load_font_file(&mut self, path: &std::path::Path) -> Result<()> {
        self.db
            .load_font_file(path)
            .map_err(|e| TextError::FontParsing(format!("{}: {e}", path.display())))
    }

    /// Find the face best matching a font spec.
    ///
    /// A comma separated family list is tried in order, then sans-serif, then
    /// any loaded face.
    pub fn query(&self, font: &FontSpec) -> Option<fontdb::ID> {
        let mut families: Vec<Family<'_>> = font
            .family
            .split(',')
            .map(|name| name.trim().trim_matches(|c| c == '"' || c == '\''))
            .filter(|name| !name.is_empty())
            .map(|name| generic_family(name).unwrap_or(Family::Name(name)))
            .collect();
        families.push(Family::SansSerif);

        self.db
            .query(&fontdb::Query {
                families: &families,
                weight: fontdb::Weight(font.weight.value()),
                stretch: fontdb::Stretch::Normal,
                style: font.style.into(),
            })
            .or_else(|| self.db.faces().next().map(|face| face.id))
    }

    /// Whether the matched face really has the requested style
    pub fn is_italic_face(&self, id: fontdb::ID) -> bool {
        self.db
            .face(id)
            .is_some_and(|info| info.style != fontdb::Style::Normal)
    }

    /// Get font data by ID
    pub fn with_face_data<R>(&self, id: fontdb::ID, f: impl FnOnce(&[u8], u32) -> R) -> Option<R> {
        self.db.with_face_data(id, f)
    }

    /// Number of loaded faces
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if database is empty
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}
