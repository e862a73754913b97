//! # Rendering Error Types

use thiserror::Error;

/// Failures while bringing up or driving the GPU.
///
/// Shader and pipeline validation problems are not listed here: they are
/// caught by an error scope and logged, and the process keeps running.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The window could not back a presentable surface.
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    /// No adapter can present to the surface.
    #[error("no compatible GPU adapter found")]
    NoAdapter,

    /// The adapter refused to open a device.
    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    /// The adapter reports no formats for the surface.
    #[error("surface is not supported by adapter {adapter}")]
    SurfaceUnsupported {
        /// Adapter name as reported by the driver.
        adapter: String,
    },

    /// The surface ran out of memory while acquiring a frame.
    #[error("out of memory while acquiring a surface texture")]
    OutOfMemory,
}

/// Result alias for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
