//! Edge case tests for gradlabel-text
//!
//! Line breaking, glyph caching and missing-font behavior. None of these
//! need fonts installed on the system.

use gradlabel_text::*;

fn mono(s: &str) -> f32 {
    s.chars().count() as f32 * 10.0
}

// ============================================================================
// LINE BREAKING
// ============================================================================

#[test]
fn test_break_lines_empty() {
    assert!(LineBreaker::break_lines("", 100.0, mono).is_empty());
}

#[test]
fn test_break_lines_wraps_at_space() {
    let lines = LineBreaker::break_lines("hello world", 60.0, mono);
    assert_eq!(lines, vec![(0, 6), (6, 11)]);
}

#[test]
fn test_break_lines_fits_on_one_line() {
    let lines = LineBreaker::break_lines("hello world", 1000.0, mono);
    assert_eq!(lines, vec![(0, 11)]);
}

#[test]
fn test_long_word_keeps_its_own_line() {
    let text = "supercalifragilistic";
    let lines = LineBreaker::break_lines(text, 60.0, mono);
    assert_eq!(lines, vec![(0, text.len())]);
}

#[test]
fn test_hard_breaks() {
    assert_eq!(LineBreaker::break_lines("a\nb", 1000.0, mono), vec![(0, 2), (2, 3)]);
    assert_eq!(
        LineBreaker::break_opportunities("a\r\nb"),
        vec![(3, BreakOpportunity::MustBreak)]
    );
}

#[test]
fn test_multibyte_break_offsets_are_char_boundaries() {
    let text = "héllo wörld";
    for (pos, _) in LineBreaker::break_opportunities(text) {
        assert!(text.is_char_boundary(pos));
    }
}

// ============================================================================
// GLYPH CACHE
// ============================================================================

#[test]
fn test_glyph_key_quantizes_size() {
    let font = FontId(fontdb::ID::dummy());
    assert_eq!(GlyphKey::new(font, 7, 12.0), GlyphKey::new(font, 7, 12.1));
    assert_ne!(GlyphKey::new(font, 7, 12.0), GlyphKey::new(font, 7, 12.25));
    assert_ne!(GlyphKey::new(font, 7, 12.0), GlyphKey::new(font, 8, 12.0));
}

#[test]
fn test_atlas_hits_and_eviction() {
    let font = FontId(fontdb::ID::dummy());
    let mut atlas = GlyphAtlas::new(2);

    atlas.get_or_insert_with(GlyphKey::new(font, 1, 10.0), || RasterizedGlyph::empty(1));
    atlas.get_or_insert_with(GlyphKey::new(font, 1, 10.0), || RasterizedGlyph::empty(1));
    assert_eq!((atlas.hits, atlas.misses), (1, 1));
    assert!((atlas.hit_rate() - 0.5).abs() < f64::EPSILON);

    atlas.get_or_insert_with(GlyphKey::new(font, 2, 10.0), || RasterizedGlyph::empty(2));
    assert_eq!(atlas.len(), 2);

    // Full: a new key clears the cache first
    atlas.get_or_insert_with(GlyphKey::new(font, 3, 10.0), || RasterizedGlyph::empty(3));
    assert_eq!(atlas.len(), 1);
}

// ============================================================================
// MISSING FONTS
// ============================================================================

#[test]
fn test_empty_database() {
    let db = FontDatabase::new();
    assert!(db.is_empty());
    assert!(db.first_face().is_none());
    assert!(db.query(&FontQuery::new(&["sans-serif"])).is_none());
}

#[test]
fn test_shaping_unknown_font_fails() {
    let db = FontDatabase::new();
    let result = TextShaper::new().shape(&db, FontId(fontdb::ID::dummy()), "Hi", 16.0);
    assert!(matches!(result, Err(TextError::FontNotFound(_))));
}

#[test]
fn test_paragraph_layout_with_unknown_font() {
    let db = FontDatabase::new();
    let shaper = TextShaper::new();
    let font = FontId(fontdb::ID::dummy());
    let paragraph = ParagraphLayout::default().max_width(100.0);

    let empty = paragraph.layout("", &db, font, &shaper).unwrap();
    assert_eq!(empty.line_count(), 0);

    assert!(paragraph.layout("Hi", &db, font, &shaper).is_err());
}
