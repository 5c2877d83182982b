//! Font database backed by fontdb

use std::path::Path;

use super::{FontId, FontMetrics, FontQuery};

/// Collection of loaded font faces
pub struct FontDatabase {
    db: fontdb::Database,
}

impl FontDatabase {
    /// Create an empty database
    pub fn new() -> Self {
        Self { db: fontdb::Database::new() }
    }

    /// Create a database populated with the system fonts
    pub fn with_system_fonts() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!("Loaded {} system font faces", db.len());
        Self { db }
    }

    /// Load a font from raw bytes (TTF/OTF/TTC)
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
    }

    /// Load every font found in a directory
    pub fn load_fonts_dir(&mut self, dir: impl AsRef<Path>) {
        let before = self.db.len();
        self.db.load_fonts_dir(dir.as_ref());
        tracing::debug!(
            "Loaded {} font faces from {}",
            self.db.len() - before,
            dir.as_ref().display()
        );
    }

    /// Number of loaded faces
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if no faces are loaded
    pub fn is_empty(&self) -> bool {
        self.db.len() == 0
    }

    /// Find the best matching regular-weight, upright face for a query
    pub fn query(&self, query: &FontQuery) -> Option<FontId> {
        let families: Vec<fontdb::Family<'_>> = query.families.iter()
            .map(|name| match name.as_str() {
                "serif" => fontdb::Family::Serif,
                "sans-serif" => fontdb::Family::SansSerif,
                "monospace" => fontdb::Family::Monospace,
                "cursive" => fontdb::Family::Cursive,
                "fantasy" => fontdb::Family::Fantasy,
                other => fontdb::Family::Name(other),
            })
            .collect();

        let fontdb_query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };

        self.db.query(&fontdb_query).map(FontId)
    }

    /// First loaded face, used when no family matches
    pub fn first_face(&self) -> Option<FontId> {
        self.db.faces().next().map(|face| FontId(face.id))
    }

    /// Run a closure with the raw data and face index of a font
    pub fn with_face_data<T>(&self, id: FontId, f: impl FnOnce(&[u8], u32) -> T) -> Option<T> {
        self.db.with_face_data(id.0, f)
    }

    /// Vertical metrics scaled to a pixel size
    pub fn metrics(&self, id: FontId, font_size: f32) -> Option<FontMetrics> {
        self.with_face_data(id, |data, index| {
            ttf_parser::Face::parse(data, index)
                .ok()
                .map(|face| FontMetrics::from_face(&face, font_size))
        })
        .flatten()
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}
