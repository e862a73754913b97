//! Run configuration: pacing strategy, fps bounds and vsync.

use serde::{Deserialize, Serialize};

/// Lowest value the minimum fps bound may take.
pub const FPS_FLOOR: u32 = 10;
/// Highest value the maximum fps bound may take.
pub const FPS_CEILING: u32 = 360;

/// Default target for FIXED pacing.
pub const DEFAULT_TARGET_FPS: u32 = 120;
/// Default lower range bound.
pub const DEFAULT_MIN_FPS: u32 = 30;
/// Default upper range bound.
pub const DEFAULT_MAX_FPS: u32 = 144;

/// Frame pacing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacingMode {
    /// Sleep to hold `target_fps` (skipped under vsync).
    #[default]
    Fixed,
    /// Uniform random target in `[min_fps, max_fps]` every frame.
    Jitter,
    /// Sinusoidal target between the bounds.
    Oscillation,
}

impl PacingMode {
    /// True for the two range strategies.
    #[must_use]
    pub const fn is_range(self) -> bool {
        matches!(self, Self::Jitter | Self::Oscillation)
    }
}

/// Pacing and presentation settings mutated by operator controls.
///
/// Invariant: `FPS_FLOOR <= min_fps < max_fps <= FPS_CEILING`, held by the
/// bound adjusters below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Active pacing strategy.
    pub pacing_mode: PacingMode,
    /// Lower range bound.
    pub min_fps: u32,
    /// Upper range bound.
    pub max_fps: u32,
    /// Target for FIXED pacing.
    pub target_fps: u32,
    /// Present with vertical sync.
    pub vsync_enabled: bool,
    /// Pattern clock frozen.
    pub paused: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            pacing_mode: PacingMode::Fixed,
            min_fps: DEFAULT_MIN_FPS,
            max_fps: DEFAULT_MAX_FPS,
            target_fps: DEFAULT_TARGET_FPS,
            vsync_enabled: false,
            paused: false,
        }
    }
}

impl RunConfig {
    /// Lowers `min_fps` by one, never below [`FPS_FLOOR`].
    pub fn decrease_min(&mut self) {
        if self.min_fps > FPS_FLOOR {
            self.min_fps -= 1;
        }
        if self.min_fps >= self.max_fps {
            self.min_fps = self.max_fps.saturating_sub(1);
        }
    }

    /// Raises `min_fps` by one while it stays below `max_fps`.
    pub fn increase_min(&mut self) {
        if self.min_fps + 1 < self.max_fps {
            self.min_fps += 1;
        }
    }

    /// Lowers `max_fps` by one while it stays above `min_fps`.
    pub fn decrease_max(&mut self) {
        if self.max_fps > self.min_fps + 1 {
            self.max_fps -= 1;
        }
    }

    /// Raises `max_fps` by one, never above [`FPS_CEILING`].
    pub fn increase_max(&mut self) {
        if self.max_fps < FPS_CEILING {
            self.max_fps += 1;
        }
    }

    /// Whether the bounds satisfy the range invariant.
    #[must_use]
    pub const fn bounds_valid(&self) -> bool {
        self.min_fps >= FPS_FLOOR && self.min_fps < self.max_fps && self.max_fps <= FPS_CEILING
    }
}
