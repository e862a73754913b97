//! # Frame Pacer
//!
//! Computes the target frame interval for the active [`PacingMode`], enforces
//! the FIXED cadence, and keeps the rolling statistics shown in the overlay.
//!
//! ## Tick order
//!
//! ```text
//! update(now)          advance pattern clock, resample target
//! ... render + present ...
//! pacing_delay(now)    FIXED only: remainder of the interval, if early
//! mark_paced(now)      start of the next interval
//! end_frame(now)       frame-time EMA, frame count, 1 s fps window
//! ```
//!
//! Every method takes `now` explicitly; the pacer never reads the clock itself.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{PacingMode, RunConfig};

/// Angular rate of OSCILLATION pacing, rad/s.
pub const OSCILLATION_RATE: f64 = 0.5;
/// Weight of the newest sample in the frame-time EMA.
pub const SMOOTHING_ALPHA: f64 = 0.1;
/// Length of the fps counting window.
pub const REPORT_WINDOW: Duration = Duration::from_secs(1);

/// Read-only view of the loop's timing state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    /// Pattern clock in seconds; frozen while paused.
    pub elapsed_time: f64,
    /// Frames completed since start.
    pub frame_count: u64,
    /// Frames per second over the last completed window.
    pub measured_fps: f64,
    /// EMA of loop-to-loop wall time, milliseconds. Zero until the first sample.
    pub smoothed_frame_time_ms: f64,
    /// Current target, frames per second.
    pub target_fps: f64,
    /// `1 / target_fps`.
    pub target_frame_interval: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        let target_fps = f64::from(crate::config::DEFAULT_TARGET_FPS);
        Self {
            elapsed_time: 0.0,
            frame_count: 0,
            measured_fps: 0.0,
            smoothed_frame_time_ms: 0.0,
            target_fps,
            target_frame_interval: Duration::from_secs_f64(1.0 / target_fps),
        }
    }
}

/// Emitted when an fps window closes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsReport {
    /// Frames per second over the window.
    pub fps: f64,
    /// Frames counted in the window.
    pub frames: u32,
    /// Smoothed frame time at the end of the window.
    pub frame_time_ms: f64,
}

/// OSCILLATION target at pattern time `elapsed`.
#[must_use]
pub fn oscillation_target(min_fps: u32, max_fps: u32, elapsed: f64) -> f64 {
    let range = f64::from(max_fps.saturating_sub(min_fps)) * 0.5;
    let center = f64::from(min_fps) + range;
    center + range * (elapsed * OSCILLATION_RATE).sin()
}

/// Frame pacing controller.
#[derive(Debug)]
pub struct FramePacer<R = StdRng> {
    clock: FrameClock,
    rng: R,
    last_update: Instant,
    last_paced: Instant,
    last_frame_end: Option<Instant>,
    window_start: Instant,
    window_frames: u32,
}

impl FramePacer<StdRng> {
    /// Pacer seeded from OS entropy.
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self::with_rng(StdRng::from_entropy(), now)
    }
}

impl<R: Rng> FramePacer<R> {
    /// Pacer drawing JITTER targets from `rng`.
    pub fn with_rng(rng: R, now: Instant) -> Self {
        Self {
            clock: FrameClock::default(),
            rng,
            last_update: now,
            last_paced: now,
            last_frame_end: None,
            window_start: now,
            window_frames: 0,
        }
    }

    /// Current timing state.
    #[must_use]
    pub const fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Advances the pattern clock and resamples the target.
    ///
    /// While paused the clock holds still and the paused span is not added
    /// on resume; the target still follows config changes.
    pub fn update(&mut self, config: &RunConfig, now: Instant) {
        let delta = now.saturating_duration_since(self.last_update);
        self.last_update = now;
        if !config.paused {
            self.clock.elapsed_time += delta.as_secs_f64();
        }

        let target = self.sample_target(config).max(1.0);
        self.clock.target_fps = target;
        self.clock.target_frame_interval = Duration::from_secs_f64(1.0 / target);
    }

    /// Target fps for `config` at the current pattern time.
    ///
    /// JITTER draws a fresh value on every call.
    pub fn sample_target(&mut self, config: &RunConfig) -> f64 {
        match config.pacing_mode {
            PacingMode::Fixed => f64::from(config.target_fps),
            PacingMode::Jitter => {
                let low = config.min_fps.min(config.max_fps);
                f64::from(self.rng.gen_range(low..=config.max_fps))
            }
            PacingMode::Oscillation => {
                oscillation_target(config.min_fps, config.max_fps, self.clock.elapsed_time)
            }
        }
    }

    /// How long to sleep before starting the next interval.
    ///
    /// `None` outside FIXED mode, under vsync, or when already behind.
    #[must_use]
    pub fn pacing_delay(&self, config: &RunConfig, now: Instant) -> Option<Duration> {
        if config.pacing_mode != PacingMode::Fixed || config.vsync_enabled {
            return None;
        }
        let spent = now.saturating_duration_since(self.last_paced);
        self.clock
            .target_frame_interval
            .checked_sub(spent)
            .filter(|remaining| !remaining.is_zero())
    }

    /// Marks the start of the next pacing interval.
    pub fn mark_paced(&mut self, now: Instant) {
        self.last_paced = now;
    }

    /// Closes the frame: updates the frame-time EMA and the fps window.
    ///
    /// Returns a report when a window of at least [`REPORT_WINDOW`] closed.
    pub fn end_frame(&mut self, now: Instant) -> Option<FpsReport> {
        if let Some(previous) = self.last_frame_end {
            let sample_ms = now.saturating_duration_since(previous).as_secs_f64() * 1000.0;
            let smoothed = &mut self.clock.smoothed_frame_time_ms;
            *smoothed = if *smoothed <= 0.0 {
                sample_ms
            } else {
                *smoothed * (1.0 - SMOOTHING_ALPHA) + sample_ms * SMOOTHING_ALPHA
            };
        }
        self.last_frame_end = Some(now);
        self.clock.frame_count += 1;
        self.window_frames += 1;

        let window = now.saturating_duration_since(self.window_start);
        if window < REPORT_WINDOW {
            return None;
        }
        let fps = f64::from(self.window_frames) / window.as_secs_f64();
        let report = FpsReport {
            fps,
            frames: self.window_frames,
            frame_time_ms: self.clock.smoothed_frame_time_ms,
        };
        self.clock.measured_fps = fps;
        self.window_start = now;
        self.window_frames = 0;
        Some(report)
    }
}
