//! # SPECTRA Rendering
//!
//! wgpu presentation for the display stress tester.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      GPU PIPELINE                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PatternParams (32 B uniform) → fs_pattern, every pixel      │
//! │       ↓                                                      │
//! │  Panel sub-viewports → fs_pattern with index -1 (blended)    │
//! │       ↓                                                      │
//! │  GlyphQuad → one R8 texture per glyph → fs_text (blended)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CPU never touches pixels. Shader validation failures are logged
//! through an error scope; the process keeps running.

#![warn(missing_docs)]
// bytemuck derives emit unsafe impls for the uniform and vertex structs
#![allow(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod context;
pub mod error;
pub mod glyphs;
pub mod pattern_pass;
pub mod renderer;
pub mod text_pass;

pub use context::{choose_format, choose_present_mode, vendor_name, GpuContext};
pub use error::{RenderError, RenderResult};
pub use glyphs::WgpuGlyphTextures;
pub use pattern_pass::{panel_viewport, PatternParams, PatternPass};
pub use renderer::{FrameContent, FrameStatus, Renderer};
pub use text_pass::{quad_vertices, TextPass, TextVertex};
