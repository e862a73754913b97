//! # Pattern Catalog
//!
//! `(uv, t, resolution, category, index) → colour` as a lookup table of pure
//! evaluator functions.
//!
//! ```text
//! index == -1 ──────────────────────────────► overlay background (0,0,0,0.7)
//! index wraps into 0..count(category) ──► table[category][index](input)
//! ```
//!
//! Raw table positions past the end resolve to [`NEUTRAL_PATTERN`] instead of
//! panicking.

use spectra_core::{Category, Language};

use crate::charts::{self, STATIC_PATTERNS};
use crate::entropy::DYNAMIC_PATTERNS;
use crate::motion::AUXILIARY_PATTERNS;
use crate::shading::{Rgb, Vec2};

/// Index reserved for the translucent overlay background.
pub const OVERLAY_SENTINEL: i64 = -1;

/// Opacity of the overlay background.
pub const OVERLAY_ALPHA: f32 = 0.7;

/// Evaluator signature shared by every table entry.
pub type PatternFn = fn(&PatternInput) -> Rgb;

/// Per-pixel inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternInput {
    /// Normalized surface coordinate, origin bottom-left.
    pub uv: Vec2,
    /// Pattern clock, seconds.
    pub time: f32,
    /// Surface size in pixels.
    pub resolution: Vec2,
}

impl PatternInput {
    /// Bundles the inputs.
    #[must_use]
    pub const fn new(uv: [f32; 2], time: f32, resolution: [f32; 2]) -> Self {
        Self {
            uv: Vec2::new(uv[0], uv[1]),
            time,
            resolution: Vec2::new(resolution[0], resolution[1]),
        }
    }

    /// Pixel-space position, `uv * resolution`.
    #[must_use]
    pub fn pixel(&self) -> Vec2 {
        self.uv.scale(self.resolution)
    }
}

/// One named evaluator.
#[derive(Debug, Clone, Copy)]
pub struct PatternEntry {
    /// English display name.
    pub name_en: &'static str,
    /// Chinese display name.
    pub name_zh: &'static str,
    /// The evaluator.
    pub eval: PatternFn,
}

impl PatternEntry {
    /// Table entry.
    #[must_use]
    pub const fn new(name_en: &'static str, name_zh: &'static str, eval: PatternFn) -> Self {
        Self {
            name_en,
            name_zh,
            eval,
        }
    }

    /// Display name in `language`.
    #[must_use]
    pub const fn name(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.name_en,
            Language::Zh => self.name_zh,
        }
    }
}

/// Fallback for lookups past the end of a table.
pub static NEUTRAL_PATTERN: PatternEntry = PatternEntry::new("Black", "纯黑", charts::black);

/// Colour plus coverage, as written to the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    /// Colour, each channel in `[0, 1]`.
    pub rgb: Rgb,
    /// Coverage; `1` for patterns, [`OVERLAY_ALPHA`] for the sentinel.
    pub alpha: f32,
}

impl Fragment {
    /// Opaque fragment.
    #[must_use]
    pub const fn opaque(rgb: Rgb) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    /// The overlay background.
    pub const OVERLAY: Self = Self {
        rgb: Rgb::BLACK,
        alpha: OVERLAY_ALPHA,
    };
}

/// Stateless access to the pattern tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternCatalog;

impl PatternCatalog {
    /// Every entry of `category` in index order.
    #[must_use]
    pub fn entries(category: Category) -> &'static [PatternEntry] {
        match category {
            Category::Static => &STATIC_PATTERNS,
            Category::Dynamic => &DYNAMIC_PATTERNS,
            Category::Auxiliary => &AUXILIARY_PATTERNS,
        }
    }

    /// Entry at a raw position; [`NEUTRAL_PATTERN`] when past the end.
    #[must_use]
    pub fn entry(category: Category, position: usize) -> &'static PatternEntry {
        Self::entries(category)
            .get(position)
            .unwrap_or(&NEUTRAL_PATTERN)
    }

    /// Entry for any integer index, wrapped into the category's range.
    #[must_use]
    pub fn lookup(category: Category, index: i64) -> &'static PatternEntry {
        let table = Self::entries(category);
        if table.is_empty() {
            return &NEUTRAL_PATTERN;
        }
        #[allow(clippy::cast_possible_wrap)]
        let count = table.len() as i64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let position = index.rem_euclid(count) as usize;
        Self::entry(category, position)
    }

    /// Evaluates one pixel.
    ///
    /// `index == OVERLAY_SENTINEL` returns the overlay background without
    /// consulting `category`. Any other index wraps into range.
    #[must_use]
    pub fn evaluate(
        uv: [f32; 2],
        time: f32,
        resolution: [f32; 2],
        category: Category,
        index: i64,
    ) -> Fragment {
        if index == OVERLAY_SENTINEL {
            return Fragment::OVERLAY;
        }
        let input = PatternInput::new(uv, time, resolution);
        let entry = Self::lookup(category, index);
        Fragment::opaque((entry.eval)(&input).saturate())
    }

    /// RGB shorthand for [`Self::evaluate`].
    #[must_use]
    pub fn evaluate_rgb(
        uv: [f32; 2],
        time: f32,
        resolution: [f32; 2],
        category: Category,
        index: i64,
    ) -> [f32; 3] {
        Self::evaluate(uv, time, resolution, category, index)
            .rgb
            .to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectra_core::{AUXILIARY_PATTERN_COUNT, DYNAMIC_PATTERN_COUNT, STATIC_PATTERN_COUNT};

    const RES: [f32; 2] = [1920.0, 1080.0];

    #[test]
    fn test_table_sizes() {
        assert_eq!(PatternCatalog::entries(Category::Static).len(), STATIC_PATTERN_COUNT);
        assert_eq!(PatternCatalog::entries(Category::Dynamic).len(), DYNAMIC_PATTERN_COUNT);
        assert_eq!(
            PatternCatalog::entries(Category::Auxiliary).len(),
            AUXILIARY_PATTERN_COUNT
        );
    }

    #[test]
    fn test_sentinel_ignores_category() {
        for category in Category::ALL {
            let frag = PatternCatalog::evaluate([0.3, 0.3], 1.0, RES, category, OVERLAY_SENTINEL);
            assert_eq!(frag, Fragment::OVERLAY);
        }
    }

    #[test]
    fn test_past_end_is_neutral() {
        let entry = PatternCatalog::entry(Category::Dynamic, 99);
        assert_eq!(entry.name_en, NEUTRAL_PATTERN.name_en);
    }

    #[test]
    fn test_out_of_range_wraps() {
        let wrapped = PatternCatalog::evaluate_rgb([0.2, 0.7], 0.5, RES, Category::Static, 21);
        let first = PatternCatalog::evaluate_rgb([0.2, 0.7], 0.5, RES, Category::Static, 0);
        assert_eq!(wrapped, first);
        let negative = PatternCatalog::lookup(Category::Static, -2);
        assert_eq!(negative.name_en, "Dot Grid");
    }

    #[test]
    fn test_names_in_both_languages() {
        for category in Category::ALL {
            for entry in PatternCatalog::entries(category) {
                assert!(!entry.name(Language::En).is_empty());
                assert!(!entry.name(Language::Zh).is_empty());
            }
        }
        let hash = PatternCatalog::entry(Category::Dynamic, 0);
        assert_eq!(hash.name(Language::En), "HE: Channel Hash");
    }
}
