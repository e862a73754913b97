//! Pattern category and index selection.
//!
//! Each category remembers its own index, so cycling S → D → A → S returns to
//! the pattern the operator last looked at in that group.

use serde::{Deserialize, Serialize};

/// Number of static calibration charts.
pub const STATIC_PATTERN_COUNT: usize = 21;
/// Number of high-entropy (quantized) animated patterns.
pub const DYNAMIC_PATTERN_COUNT: usize = 14;
/// Number of auxiliary motion / temporal patterns.
pub const AUXILIARY_PATTERN_COUNT: usize = 10;

/// Pattern group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Time-independent charts.
    Static,
    /// Animated, 10-bit quantized noise and gamut fields.
    #[default]
    Dynamic,
    /// Animated, unquantized motion and temporal tests.
    Auxiliary,
}

impl Category {
    /// All categories in cycle order.
    pub const ALL: [Self; 3] = [Self::Static, Self::Dynamic, Self::Auxiliary];

    /// Number of patterns in this category.
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Static => STATIC_PATTERN_COUNT,
            Self::Dynamic => DYNAMIC_PATTERN_COUNT,
            Self::Auxiliary => AUXILIARY_PATTERN_COUNT,
        }
    }

    /// Next category in the S → D → A cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Static => Self::Dynamic,
            Self::Dynamic => Self::Auxiliary,
            Self::Auxiliary => Self::Static,
        }
    }

    /// Stable numeric id shared with the GPU shader.
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::Static => 0,
            Self::Dynamic => 1,
            Self::Auxiliary => 2,
        }
    }

    /// One-letter tag shown in the overlay (`S`, `D`, `A`).
    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            Self::Static => 'S',
            Self::Dynamic => 'D',
            Self::Auxiliary => 'A',
        }
    }

    const fn slot(self) -> usize {
        self.id() as usize
    }
}

/// Current category plus one retained index per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternSelector {
    category: Category,
    indices: [usize; 3],
}

impl Default for PatternSelector {
    fn default() -> Self {
        Self::new(Category::default())
    }
}

impl PatternSelector {
    /// Starts in `category` with every index at 0.
    #[must_use]
    pub const fn new(category: Category) -> Self {
        Self {
            category,
            indices: [0; 3],
        }
    }

    /// Active category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Index within the active category, always `< category().count()`.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.indices[self.category.slot()]
    }

    /// Retained index for any category.
    #[must_use]
    pub const fn index_of(&self, category: Category) -> usize {
        self.indices[category.slot()]
    }

    /// Switches category, keeping each category's retained index.
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Advances S → D → A → S.
    pub fn cycle_category(&mut self) {
        self.category = self.category.next();
    }

    /// Sets the active index, wrapping any integer into range.
    pub fn select(&mut self, index: i64) {
        let count = self.category.count() as i64;
        // rem_euclid of a positive modulus is in [0, count)
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let wrapped = index.rem_euclid(count) as usize;
        self.indices[self.category.slot()] = wrapped;
    }

    /// Next pattern, wrapping to 0 after the last.
    pub fn next(&mut self) {
        self.step(1);
    }

    /// Previous pattern, wrapping to the last from 0.
    pub fn previous(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, delta: i64) {
        #[allow(clippy::cast_possible_wrap)]
        let current = self.index() as i64;
        self.select(current + delta);
    }
}
