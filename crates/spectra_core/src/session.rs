//! The owned run state and the mutations operator actions perform on it.

use tracing::debug;

use crate::config::{PacingMode, RunConfig};
use crate::controls::Action;
use crate::locale::Language;
use crate::selector::{Category, PatternSelector};

/// Lower bound installed by the extreme preset.
pub const EXTREME_MIN_FPS: u32 = 30;
/// Upper bound installed by the extreme preset.
pub const EXTREME_MAX_FPS: u32 = 240;
/// DYNAMIC index selected by the extreme preset (multi-scale hash).
pub const EXTREME_PATTERN_INDEX: i64 = 1;

/// Side effect an action asks the loop to carry out outside the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// State only.
    None,
    /// Raise the close flag.
    Exit,
    /// Reconfigure presentation for the new vsync value.
    VsyncChanged(bool),
}

/// Everything the render loop mutates, in one place.
#[derive(Debug, Clone)]
pub struct Session {
    /// Pacing and presentation settings.
    pub config: RunConfig,
    /// Category and per-category indices.
    pub selector: PatternSelector,
    /// Overlay language.
    pub language: Language,
    /// Show only the FPS line.
    pub minimal_overlay: bool,
    /// Extreme preset flag.
    pub extreme: bool,
    /// Range strategy restored by [`Action::TogglePacing`].
    range_mode: PacingMode,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RunConfig::default(), PatternSelector::default(), Language::default())
    }
}

impl Session {
    /// Creates a session from its parts.
    #[must_use]
    pub fn new(config: RunConfig, selector: PatternSelector, language: Language) -> Self {
        let range_mode = if config.pacing_mode.is_range() {
            config.pacing_mode
        } else {
            PacingMode::Jitter
        };
        Self {
            config,
            selector,
            language,
            minimal_overlay: false,
            extreme: false,
            range_mode,
        }
    }

    /// Range strategy used when range pacing is (re)enabled.
    #[must_use]
    pub const fn range_mode(&self) -> PacingMode {
        self.range_mode
    }

    /// Applies one operator action.
    pub fn apply(&mut self, action: Action) -> Effect {
        let effect = match action {
            Action::Exit => return Effect::Exit,
            Action::TogglePause => {
                self.config.paused = !self.config.paused;
                Effect::None
            }
            Action::CycleCategory => {
                self.selector.cycle_category();
                Effect::None
            }
            Action::NextPattern => {
                self.selector.next();
                Effect::None
            }
            Action::PreviousPattern => {
                self.selector.previous();
                Effect::None
            }
            Action::ToggleVsync => self.set_vsync(!self.config.vsync_enabled),
            Action::ToggleMinimalOverlay => {
                self.minimal_overlay = !self.minimal_overlay;
                Effect::None
            }
            Action::TogglePacing => {
                self.config.pacing_mode = if self.config.pacing_mode.is_range() {
                    PacingMode::Fixed
                } else {
                    self.range_mode
                };
                Effect::None
            }
            Action::ToggleRangeKind => {
                self.range_mode = match self.range_mode {
                    PacingMode::Oscillation => PacingMode::Jitter,
                    _ => PacingMode::Oscillation,
                };
                if self.config.pacing_mode.is_range() {
                    self.config.pacing_mode = self.range_mode;
                }
                Effect::None
            }
            Action::ToggleExtreme => self.toggle_extreme(),
            Action::DecreaseMinFps => {
                self.config.decrease_min();
                Effect::None
            }
            Action::IncreaseMinFps => {
                self.config.increase_min();
                Effect::None
            }
            Action::DecreaseMaxFps => {
                self.config.decrease_max();
                Effect::None
            }
            Action::IncreaseMaxFps => {
                self.config.increase_max();
                Effect::None
            }
            Action::ToggleLanguage => {
                self.language = self.language.toggled();
                Effect::None
            }
        };
        debug!(?action, ?effect, config = ?self.config, "action applied");
        effect
    }

    fn set_vsync(&mut self, enabled: bool) -> Effect {
        if self.config.vsync_enabled == enabled {
            return Effect::None;
        }
        self.config.vsync_enabled = enabled;
        Effect::VsyncChanged(enabled)
    }

    fn toggle_extreme(&mut self) -> Effect {
        self.extreme = !self.extreme;
        if !self.extreme {
            return Effect::None;
        }
        self.minimal_overlay = true;
        self.range_mode = PacingMode::Jitter;
        self.config.pacing_mode = PacingMode::Jitter;
        self.config.min_fps = EXTREME_MIN_FPS;
        self.config.max_fps = EXTREME_MAX_FPS;
        self.selector.set_category(Category::Dynamic);
        self.selector.select(EXTREME_PATTERN_INDEX);
        self.set_vsync(false)
    }
}
