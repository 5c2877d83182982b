//! Glyph atlas (cache)

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::{DefaultHasher, Hash, Hasher};

use super::RasterizedGlyph;
use crate::font::FontId;

/// Key for glyph cache lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    /// Hash of the font the glyph came from
    pub font: u64,
    pub glyph_id: u16,
    /// Font size in quarter pixels
    pub size_q: u32,
}

impl GlyphKey {
    pub fn new(font_id: FontId, glyph_id: u16, font_size: f32) -> Self {
        let mut hasher = DefaultHasher::new();
        font_id.hash(&mut hasher);
        Self {
            font: hasher.finish(),
            glyph_id,
            size_q: (font_size * 4.0).round().max(0.0) as u32,
        }
    }
}

/// Bounded cache of rasterized glyphs
pub struct GlyphAtlas {
    cache: HashMap<GlyphKey, RasterizedGlyph>,
    max_entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl GlyphAtlas {
    pub fn new(max_entries: usize) -> Self {
        Self {
            cache: HashMap::with_capacity(max_entries.min(256)),
            max_entries: max_entries.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Cached glyph, rasterizing it on a miss
    pub fn get_or_insert_with<F>(&mut self, key: GlyphKey, f: F) -> &RasterizedGlyph
    where
        F: FnOnce() -> RasterizedGlyph,
    {
        if !self.cache.contains_key(&key) && self.cache.len() >= self.max_entries {
            tracing::trace!("Glyph atlas full ({} entries), clearing", self.cache.len());
            self.cache.clear();
        }

        match self.cache.entry(key) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.misses += 1;
                entry.insert(f())
            }
        }
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl Default for GlyphAtlas {
    fn default() -> Self {
        Self::new(1024)
    }
}
