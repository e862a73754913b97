//! # Core Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating run settings.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings file {path}: {source}")]
    SettingsIo {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for [`crate::Settings`].
    #[error("failed to parse settings: {0}")]
    SettingsParse(#[from] toml::de::Error),

    /// Values parsed but violate a range rule.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
