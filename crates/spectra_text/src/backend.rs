//! Font backends.
//!
//! A backend turns one code point into a coverage bitmap plus metrics at a
//! fixed pixel height. The engine never sees the font format.

use std::path::Path;

use fontdue::{Font, FontSettings};

use crate::error::{TextError, TextResult};

/// Font-wide vertical metrics at the backend's pixel height, unscaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Baseline to top of the tallest glyph.
    pub ascent: f32,
    /// Baseline to bottom of the lowest glyph, positive.
    pub descent: f32,
    /// Baseline-to-baseline distance.
    pub line_height: f32,
}

impl FontMetrics {
    /// Proportional estimate used when the font carries no line metrics.
    #[must_use]
    pub fn estimate(pixel_height: u32) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let px = pixel_height as f32;
        Self {
            ascent: px * 0.8,
            descent: px * 0.2,
            line_height: px * 1.2,
        }
    }
}

/// One rasterized glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterizedGlyph {
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub height: u32,
    /// Pen position to left edge of the bitmap.
    pub bearing_x: i32,
    /// Baseline to top edge of the bitmap, up positive.
    pub bearing_y: i32,
    /// Horizontal advance in 1/64 pixel.
    pub advance: i64,
    /// Row-major single-channel coverage, `width * height` bytes.
    pub coverage: Vec<u8>,
}

/// Source of glyph bitmaps at a fixed pixel height.
pub trait FontBackend {
    /// Requested pixel height.
    fn pixel_height(&self) -> u32;

    /// Font-wide metrics at [`Self::pixel_height`].
    fn metrics(&self) -> FontMetrics;

    /// Rasterizes `ch`, or `None` when the font cannot produce it.
    fn rasterize(&mut self, ch: char) -> Option<RasterizedGlyph>;
}

/// [`FontBackend`] over a parsed `fontdue` font.
pub struct FontdueBackend {
    font: Font,
    pixel_height: u32,
}

impl std::fmt::Debug for FontdueBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontdueBackend")
            .field("name", &self.font.name())
            .field("pixel_height", &self.pixel_height)
            .finish()
    }
}

impl FontdueBackend {
    /// Parses TrueType/OpenType bytes (first face of a collection).
    ///
    /// # Errors
    ///
    /// [`TextError::ZeroPixelHeight`] for `pixel_height == 0`,
    /// [`TextError::FontParse`] when the bytes are not a font.
    pub fn from_bytes(bytes: &[u8], pixel_height: u32) -> TextResult<Self> {
        if pixel_height == 0 {
            return Err(TextError::ZeroPixelHeight);
        }
        #[allow(clippy::cast_precision_loss)]
        let settings = FontSettings {
            scale: pixel_height as f32,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(bytes, settings)
            .map_err(|reason| TextError::FontParse(reason.to_string()))?;
        Ok(Self { font, pixel_height })
    }

    /// Reads and parses a font file.
    ///
    /// # Errors
    ///
    /// [`TextError::FontRead`] when the file cannot be read, otherwise as
    /// [`Self::from_bytes`].
    pub fn from_file(path: &Path, pixel_height: u32) -> TextResult<Self> {
        let bytes = std::fs::read(path).map_err(|source| TextError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes, pixel_height)
    }

    #[allow(clippy::cast_precision_loss)]
    fn px(&self) -> f32 {
        self.pixel_height as f32
    }
}

impl FontBackend for FontdueBackend {
    fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    fn metrics(&self) -> FontMetrics {
        match self.font.horizontal_line_metrics(self.px()) {
            Some(line) if line.new_line_size > 0.0 => FontMetrics {
                ascent: line.ascent,
                descent: line.descent.abs(),
                line_height: line.new_line_size,
            },
            _ => FontMetrics::estimate(self.pixel_height),
        }
    }

    fn rasterize(&mut self, ch: char) -> Option<RasterizedGlyph> {
        // glyph 0 is .notdef: the face has no outline for `ch`
        if self.font.lookup_glyph_index(ch) == 0 {
            return None;
        }
        let (metrics, coverage) = self.font.rasterize(ch, self.px());
        let width = u32::try_from(metrics.width).ok()?;
        let height = u32::try_from(metrics.height).ok()?;
        let rows = i32::try_from(metrics.height).ok()?;
        #[allow(clippy::cast_possible_truncation)]
        let advance = (metrics.advance_width * 64.0).round() as i64;
        Some(RasterizedGlyph {
            width,
            height,
            bearing_x: metrics.xmin,
            bearing_y: metrics.ymin + rows,
            advance,
            coverage,
        })
    }
}
