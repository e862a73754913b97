//! Optional TOML settings file.
//!
//! ```toml
//! [pacing]
//! mode = "oscillation"
//! min_fps = 48
//! max_fps = 165
//!
//! [overlay]
//! language = "en"
//! ```
//!
//! Every key is optional; missing keys keep the built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{
    PacingMode, RunConfig, DEFAULT_MAX_FPS, DEFAULT_MIN_FPS, DEFAULT_TARGET_FPS, FPS_CEILING,
    FPS_FLOOR,
};
use crate::error::{CoreError, CoreResult};
use crate::locale::Language;
use crate::selector::{Category, PatternSelector};
use crate::session::Session;

/// `[pacing]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingSettings {
    /// Initial strategy.
    pub mode: PacingMode,
    /// Lower range bound.
    pub min_fps: u32,
    /// Upper range bound.
    pub max_fps: u32,
    /// FIXED target.
    pub target_fps: u32,
    /// Start with vsync.
    pub vsync: bool,
}

impl Default for PacingSettings {
    fn default() -> Self {
        Self {
            mode: PacingMode::Fixed,
            min_fps: DEFAULT_MIN_FPS,
            max_fps: DEFAULT_MAX_FPS,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: false,
        }
    }
}

/// `[display]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Borderless fullscreen on the current monitor.
    pub fullscreen: bool,
    /// Window width when not fullscreen.
    pub width: u32,
    /// Window height when not fullscreen.
    pub height: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            fullscreen: true,
            width: 1280,
            height: 720,
        }
    }
}

/// `[overlay]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Start with the FPS-only overlay.
    pub minimal: bool,
    /// Fixed language; detected from the environment when absent.
    pub language: Option<Language>,
    /// Font file; system candidates are searched when absent.
    pub font_path: Option<PathBuf>,
    /// Font pixel height; derived from the window height when absent.
    pub font_px: Option<u32>,
}

/// `[start]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartSettings {
    /// Initial category.
    pub category: Category,
    /// Initial index, wrapped into the category's range.
    pub index: i64,
}

/// Whole settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pacing defaults.
    pub pacing: PacingSettings,
    /// Window defaults.
    pub display: DisplaySettings,
    /// Overlay defaults.
    pub overlay: OverlaySettings,
    /// Initial pattern.
    pub start: StartSettings,
}

impl Settings {
    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SettingsParse`] for malformed TOML and
    /// [`CoreError::InvalidSettings`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads `path`, or returns defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be read or is invalid.
    pub fn load_or_default(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        info!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Checks range rules.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSettings`] naming the first violation.
    pub fn validate(&self) -> CoreResult<()> {
        let pacing = &self.pacing;
        if pacing.min_fps < FPS_FLOOR || pacing.max_fps > FPS_CEILING {
            return Err(CoreError::InvalidSettings(format!(
                "fps bounds must lie within [{FPS_FLOOR}, {FPS_CEILING}], got {}..{}",
                pacing.min_fps, pacing.max_fps
            )));
        }
        if pacing.min_fps >= pacing.max_fps {
            return Err(CoreError::InvalidSettings(format!(
                "min_fps ({}) must be below max_fps ({})",
                pacing.min_fps, pacing.max_fps
            )));
        }
        if pacing.target_fps == 0 {
            return Err(CoreError::InvalidSettings("target_fps must be positive".into()));
        }
        if self.overlay.font_px == Some(0) {
            return Err(CoreError::InvalidSettings("font_px must be positive".into()));
        }
        Ok(())
    }

    /// Run configuration described by `[pacing]`.
    #[must_use]
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            pacing_mode: self.pacing.mode,
            min_fps: self.pacing.min_fps,
            max_fps: self.pacing.max_fps,
            target_fps: self.pacing.target_fps,
            vsync_enabled: self.pacing.vsync,
            paused: false,
        }
    }

    /// Builds the initial session; `language` is used when the file names none.
    #[must_use]
    pub fn session(&self, language: Language) -> Session {
        let mut selector = PatternSelector::new(self.start.category);
        selector.select(self.start.index);
        let mut session = Session::new(
            self.run_config(),
            selector,
            self.overlay.language.unwrap_or(language),
        );
        session.minimal_overlay = self.overlay.minimal;
        session
    }
}
