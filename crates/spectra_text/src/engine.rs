//! # Text Engine
//!
//! Glyph cache plus measurement and layout of single lines.
//!
//! ```text
//! text bytes ──► Utf8Decoder ──► char ──► cache hit? ──► GlyphRecord
//!                                            │ miss
//!                                            ▼
//!                         FontBackend::rasterize ── fail ──► U+25A1 record
//!                                            │ ok
//!                                            ▼
//!                            GlyphTextureStore::upload (once per glyph)
//! ```
//!
//! `render` does not draw; it appends positioned [`GlyphQuad`]s that the
//! GPU pass consumes, so the engine stays testable without a device.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::backend::{FontBackend, FontMetrics, FontdueBackend};
use crate::error::TextResult;
use crate::store::{GlyphTextureStore, TextureHandle};
use crate::utf8::Utf8Decoder;

/// Substituted for code points the font cannot rasterize (WHITE SQUARE).
pub const FALLBACK_GLYPH: char = '\u{25A1}';

/// Per-character width estimate without a font, as a fraction of the pixel height.
const NO_FONT_EM: f32 = 0.6;
/// Pixel height assumed when no font has ever been loaded.
const DEFAULT_PIXEL_HEIGHT: u32 = 24;

/// Cached bitmap metrics of one code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRecord {
    /// Code point this record was rasterized for (the fallback's own code
    /// point when substituted).
    pub codepoint: char,
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub height: u32,
    /// Pen position to bitmap left edge.
    pub bearing_x: i32,
    /// Baseline to bitmap top edge.
    pub bearing_y: i32,
    /// Advance in 1/64 pixel.
    pub advance: i64,
    /// Uploaded bitmap; `None` for empty glyphs such as space.
    pub texture: Option<TextureHandle>,
}

impl GlyphRecord {
    /// Whole-pixel advance, truncated like 26.6 fixed point `>> 6`.
    #[must_use]
    pub const fn advance_px(&self) -> i64 {
        self.advance >> 6
    }
}

/// One textured quad in surface pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    /// Coverage texture.
    pub texture: TextureHandle,
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
    /// Text colour.
    pub color: [f32; 3],
}

/// Glyph cache and line layout over a pluggable font and texture store.
pub struct TextEngine<S: GlyphTextureStore> {
    store: S,
    font: Option<Box<dyn FontBackend>>,
    metrics: FontMetrics,
    pixel_height: u32,
    glyphs: HashMap<char, GlyphRecord>,
    owned: Vec<TextureHandle>,
    quads: Vec<GlyphQuad>,
}

impl<S: GlyphTextureStore> std::fmt::Debug for TextEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEngine")
            .field("has_font", &self.font.is_some())
            .field("pixel_height", &self.pixel_height)
            .field("cached_glyphs", &self.glyphs.len())
            .field("pending_quads", &self.quads.len())
            .finish_non_exhaustive()
    }
}

impl<S: GlyphTextureStore> TextEngine<S> {
    /// Engine with no font; measurement falls back to estimates.
    pub fn new(store: S) -> Self {
        Self {
            store,
            font: None,
            metrics: FontMetrics::estimate(DEFAULT_PIXEL_HEIGHT),
            pixel_height: 0,
            glyphs: HashMap::new(),
            owned: Vec::new(),
            quads: Vec::new(),
        }
    }

    /// Installs a font, dropping every cached glyph of the previous one.
    pub fn load_font(&mut self, font: Box<dyn FontBackend>) {
        self.clear_cache();
        self.pixel_height = font.pixel_height();
        self.metrics = font.metrics();
        self.font = Some(font);
        info!(pixel_height = self.pixel_height, "Font loaded");
    }

    /// Reads a font file and installs it at `pixel_height`.
    ///
    /// On failure text is disabled until the next successful load.
    ///
    /// # Errors
    ///
    /// Propagates read and parse failures from [`FontdueBackend::from_file`].
    pub fn load_font_file(&mut self, path: &Path, pixel_height: u32) -> TextResult<()> {
        match FontdueBackend::from_file(path, pixel_height) {
            Ok(font) => {
                self.load_font(Box::new(font));
                Ok(())
            }
            Err(err) => {
                self.unload_font();
                self.pixel_height = pixel_height;
                self.metrics = FontMetrics::estimate(pixel_height.max(1));
                Err(err)
            }
        }
    }

    /// Drops the font and every cached glyph.
    pub fn unload_font(&mut self) {
        self.clear_cache();
        self.font = None;
    }

    /// Whether a font is installed.
    #[must_use]
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Requested pixel height of the current or last attempted font.
    #[must_use]
    pub const fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    /// Number of cached code points.
    #[must_use]
    pub fn cached_glyphs(&self) -> usize {
        self.glyphs.len()
    }

    /// Cached record for `ch`, without rasterizing.
    #[must_use]
    pub fn glyph(&self, ch: char) -> Option<&GlyphRecord> {
        self.glyphs.get(&ch)
    }

    /// Backing texture store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Backing texture store, mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[allow(clippy::cast_precision_loss)]
    fn em(&self) -> f32 {
        if self.pixel_height > 0 {
            self.pixel_height as f32
        } else {
            DEFAULT_PIXEL_HEIGHT as f32
        }
    }

    /// Width of `text` in pixels at `scale`; caches glyphs as a side effect.
    pub fn measure<T: AsRef<[u8]> + ?Sized>(&mut self, text: &T, scale: f32) -> f32 {
        let chars = Utf8Decoder::new(text.as_ref());
        if self.font.is_none() {
            #[allow(clippy::cast_precision_loss)]
            let count = chars.count() as f32;
            return count * self.em() * NO_FONT_EM * scale;
        }
        let mut width = 0.0;
        for ch in chars {
            if let Some(glyph) = self.ensure_glyph(ch) {
                #[allow(clippy::cast_precision_loss)]
                let advance = glyph.advance_px() as f32;
                width += advance;
            }
        }
        width * scale
    }

    /// Lays out `text` with its baseline at `(x, y)`, queueing one quad per
    /// visible glyph.
    ///
    /// Without a font nothing is queued.
    pub fn render<T: AsRef<[u8]> + ?Sized>(
        &mut self,
        text: &T,
        x: f32,
        y: f32,
        scale: f32,
        color: [f32; 3],
    ) {
        if self.font.is_none() {
            return;
        }
        let mut pen_x = x;
        for ch in Utf8Decoder::new(text.as_ref()) {
            let Some(glyph) = self.ensure_glyph(ch) else {
                continue;
            };
            #[allow(clippy::cast_precision_loss)]
            {
                if let Some(texture) = glyph.texture {
                    self.quads.push(GlyphQuad {
                        texture,
                        x: pen_x + glyph.bearing_x as f32 * scale,
                        y: y - glyph.bearing_y as f32 * scale,
                        width: glyph.width as f32 * scale,
                        height: glyph.height as f32 * scale,
                        color,
                    });
                }
                pen_x += glyph.advance_px() as f32 * scale;
            }
        }
    }

    /// Quads queued by [`Self::render`] since the last call.
    pub fn drain_quads(&mut self) -> std::vec::Drain<'_, GlyphQuad> {
        self.quads.drain(..)
    }

    /// Quads queued so far.
    #[must_use]
    pub fn quads(&self) -> &[GlyphQuad] {
        &self.quads
    }

    /// Baseline-to-baseline distance at `scale`.
    #[must_use]
    pub fn line_height(&self, scale: f32) -> f32 {
        self.metrics.line_height * scale
    }

    /// Ascent at `scale`.
    #[must_use]
    pub fn ascent(&self, scale: f32) -> f32 {
        self.metrics.ascent * scale
    }

    /// Descent at `scale`, positive.
    #[must_use]
    pub fn descent(&self, scale: f32) -> f32 {
        self.metrics.descent * scale
    }

    /// Cached record for `ch`, rasterizing on first sight.
    ///
    /// A code point the font cannot produce is cached as a copy of the
    /// fallback glyph. If even the fallback fails, a blank half-em record
    /// is cached instead so the miss is paid once.
    fn ensure_glyph(&mut self, ch: char) -> Option<GlyphRecord> {
        if let Some(glyph) = self.glyphs.get(&ch) {
            return Some(*glyph);
        }
        let font = self.font.as_mut()?;
        let record = match font.rasterize(ch) {
            Some(raster) => {
                let texture = (raster.width > 0 && raster.height > 0).then(|| {
                    let handle = self
                        .store
                        .upload(raster.width, raster.height, &raster.coverage);
                    self.owned.push(handle);
                    handle
                });
                GlyphRecord {
                    codepoint: ch,
                    width: raster.width,
                    height: raster.height,
                    bearing_x: raster.bearing_x,
                    bearing_y: raster.bearing_y,
                    advance: raster.advance,
                    texture,
                }
            }
            None if ch != FALLBACK_GLYPH => {
                debug!(codepoint = %ch.escape_unicode(), "Glyph missing, using fallback");
                self.ensure_glyph(FALLBACK_GLYPH)?
            }
            None => self.blank_record(),
        };
        self.glyphs.insert(ch, record);
        Some(record)
    }

    fn blank_record(&self) -> GlyphRecord {
        #[allow(clippy::cast_possible_truncation)]
        let advance = (self.em() * 0.5 * 64.0).round() as i64;
        GlyphRecord {
            codepoint: FALLBACK_GLYPH,
            width: 0,
            height: 0,
            bearing_x: 0,
            bearing_y: 0,
            advance,
            texture: None,
        }
    }

    fn clear_cache(&mut self) {
        for handle in self.owned.drain(..) {
            self.store.release(handle);
        }
        self.glyphs.clear();
        self.quads.clear();
    }
}

impl<S: GlyphTextureStore> Drop for TextEngine<S> {
    fn drop(&mut self) {
        self.clear_cache();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RasterizedGlyph;
    use crate::store::MemoryTextureStore;

    /// Fixed-advance font that knows only ASCII letters.
    struct BlockFont {
        px: u32,
        knows_box: bool,
    }

    impl FontBackend for BlockFont {
        fn pixel_height(&self) -> u32 {
            self.px
        }

        fn metrics(&self) -> FontMetrics {
            FontMetrics {
                ascent: 16.0,
                descent: 4.0,
                line_height: 24.0,
            }
        }

        fn rasterize(&mut self, ch: char) -> Option<RasterizedGlyph> {
            if ch == ' ' {
                return Some(RasterizedGlyph {
                    width: 0,
                    height: 0,
                    bearing_x: 0,
                    bearing_y: 0,
                    advance: 6 * 64,
                    coverage: Vec::new(),
                });
            }
            if ch.is_ascii_alphabetic() || (ch == FALLBACK_GLYPH && self.knows_box) {
                return Some(RasterizedGlyph {
                    width: 8,
                    height: 12,
                    bearing_x: 1,
                    bearing_y: 12,
                    advance: 10 * 64 + 40,
                    coverage: vec![255; 96],
                });
            }
            None
        }
    }

    fn engine(knows_box: bool) -> TextEngine<MemoryTextureStore> {
        let mut engine = TextEngine::new(MemoryTextureStore::new());
        engine.load_font(Box::new(BlockFont { px: 20, knows_box }));
        engine
    }

    #[test]
    fn test_measure_empty_is_zero() {
        let mut with_font = engine(true);
        let mut without = TextEngine::new(MemoryTextureStore::new());
        for scale in [0.5, 1.0, 3.0] {
            assert_eq!(with_font.measure("", scale), 0.0);
            assert_eq!(without.measure("", scale), 0.0);
        }
    }

    #[test]
    fn test_measure_truncates_advance() {
        let mut engine = engine(true);
        // 10 + 40/64 px truncates to 10
        assert_eq!(engine.measure("ab", 1.0), 20.0);
        assert_eq!(engine.measure("a b", 2.0), 52.0);
    }

    #[test]
    fn test_measure_without_font_estimates() {
        let mut engine = TextEngine::new(MemoryTextureStore::new());
        assert_eq!(engine.measure("abcd", 1.0), 4.0 * 24.0 * 0.6);
        assert_eq!(engine.line_height(1.0), 24.0 * 1.2);
    }

    #[test]
    fn test_repeated_glyph_uploads_once() {
        let mut engine = engine(true);
        engine.render("a", 0.0, 0.0, 1.0, [1.0; 3]);
        engine.render("a", 50.0, 0.0, 1.0, [1.0; 3]);
        assert_eq!(engine.cached_glyphs(), 1);
        assert_eq!(engine.store().uploads(), 1);
        assert_eq!(engine.quads().len(), 2);
    }

    #[test]
    fn test_missing_glyph_uses_fallback_once() {
        let mut engine = engine(true);
        let first = engine.measure("帧", 1.0);
        let uploads = engine.store().uploads();
        let second = engine.measure("帧帧", 1.0);
        assert_eq!(second, first * 2.0);
        assert_eq!(engine.store().uploads(), uploads);
        let record = engine.glyph('帧').copied();
        assert_eq!(record.map(|g| g.codepoint), Some(FALLBACK_GLYPH));
        assert_eq!(record, engine.glyph(FALLBACK_GLYPH).copied());
    }

    #[test]
    fn test_fallback_failure_caches_blank() {
        let mut engine = engine(false);
        assert_eq!(engine.measure("帧", 1.0), 10.0);
        let record = engine.glyph('帧').copied();
        assert_eq!(record.and_then(|g| g.texture), None);
        assert_eq!(engine.store().uploads(), 0);
    }

    #[test]
    fn test_quad_placement_from_baseline() {
        let mut engine = engine(true);
        engine.render("ab", 100.0, 50.0, 2.0, [0.5, 0.5, 0.5]);
        let quads: Vec<_> = engine.drain_quads().collect();
        assert_eq!(quads.len(), 2);
        assert_eq!(quads[0].x, 102.0);
        assert_eq!(quads[0].y, 26.0);
        assert_eq!(quads[0].width, 16.0);
        assert_eq!(quads[0].height, 24.0);
        assert_eq!(quads[1].x, 122.0);
        assert!(engine.quads().is_empty());
    }

    #[test]
    fn test_space_advances_without_quad() {
        let mut engine = engine(true);
        engine.render("a a", 0.0, 0.0, 1.0, [1.0; 3]);
        let xs: Vec<f32> = engine.quads().iter().map(|q| q.x).collect();
        assert_eq!(xs, vec![1.0, 17.0]);
    }

    #[test]
    fn test_font_reload_releases_textures() {
        let mut engine = engine(true);
        engine.measure("abc", 1.0);
        assert_eq!(engine.store().live(), 3);
        engine.load_font(Box::new(BlockFont { px: 30, knows_box: true }));
        assert_eq!(engine.store().live(), 0);
        assert_eq!(engine.cached_glyphs(), 0);
        assert_eq!(engine.pixel_height(), 30);
    }

    #[test]
    fn test_metrics_scale() {
        let engine = engine(true);
        assert_eq!(engine.ascent(2.0), 32.0);
        assert_eq!(engine.descent(2.0), 8.0);
        assert_eq!(engine.line_height(0.5), 12.0);
    }

    #[test]
    fn test_failed_file_load_disables_text() {
        let mut engine = engine(true);
        let result = engine.load_font_file(Path::new("/nonexistent/font.ttf"), 18);
        assert!(result.is_err());
        assert!(!engine.has_font());
        assert_eq!(engine.measure("ab", 1.0), 2.0 * 18.0 * 0.6);
    }
}
