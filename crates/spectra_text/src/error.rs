//! # Text Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a font.
#[derive(Error, Debug)]
pub enum TextError {
    /// The font file could not be read.
    #[error("failed to read font {path}: {source}")]
    FontRead {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a font the backend understands.
    #[error("failed to parse font: {0}")]
    FontParse(String),

    /// Zero is not a usable pixel height.
    #[error("font pixel height must be positive")]
    ZeroPixelHeight,
}

/// Result alias for text operations.
pub type TextResult<T> = Result<T, TextError>;
