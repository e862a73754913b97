//! Exercises the fontdue backend against whatever system font is installed.
//!
//! Skips quietly on machines without any candidate font.

use spectra_text::{find_system_font, FontBackend, FontdueBackend, MemoryTextureStore, TextEngine};

#[test]
fn test_system_font_measures_and_caches() {
    let Some(path) = find_system_font() else {
        return;
    };
    let mut engine = TextEngine::new(MemoryTextureStore::new());
    engine.load_font_file(&path, 24).expect("candidate font should parse");

    let one = engine.measure("FPS", 1.0);
    let two = engine.measure("FPS", 2.0);
    assert!(one > 0.0);
    assert_eq!(two, one * 2.0);

    let uploads = engine.store().uploads();
    engine.render("FPS", 10.0, 40.0, 1.0, [1.0, 1.0, 1.0]);
    assert_eq!(engine.store().uploads(), uploads);
    assert_eq!(engine.quads().len(), 3);

    assert!(engine.line_height(1.0) > 0.0);
    assert!(engine.ascent(1.0) > engine.descent(1.0));
}

#[test]
fn test_system_font_latin_glyph_has_bitmap() {
    let Some(path) = find_system_font() else {
        return;
    };
    let mut font = FontdueBackend::from_file(&path, 32).expect("candidate font should parse");
    let glyph = font.rasterize('W').expect("W is in every candidate");
    assert!(glyph.width > 0 && glyph.height > 0);
    assert_eq!(glyph.coverage.len(), (glyph.width * glyph.height) as usize);
    assert!(glyph.advance > 0);
}
