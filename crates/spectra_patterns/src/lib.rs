//! # SPECTRA Patterns
//!
//! Forty-five procedural test patterns in three categories, evaluated as pure
//! functions of `(uv, time, resolution, category, index)`.
//!
//! ## Layout
//!
//! ```text
//! ┌───────────────┬────────────────────────────────────────────────┐
//! │ charts        │ 21 static calibration charts (bars, checkers…) │
//! │ entropy       │ 14 high-entropy fields, 10-bit quantized       │
//! │ motion        │ 10 motion / temporal diagnostics               │
//! │ catalog       │ lookup, wrapping and the overlay sentinel      │
//! │ shading       │ GLSL-style scalar and vector helpers           │
//! │ wgsl          │ the same formulas as a fragment shader         │
//! └───────────────┴────────────────────────────────────────────────┘
//! ```
//!
//! The CPU tables are the reference the GPU twin is checked against; nothing
//! here owns state, so evaluation is deterministic for identical inputs.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod catalog;
pub mod charts;
pub mod entropy;
pub mod motion;
pub mod quantize;
pub mod shading;
pub mod wgsl;

pub use catalog::{
    Fragment, PatternCatalog, PatternEntry, PatternFn, PatternInput, NEUTRAL_PATTERN,
    OVERLAY_ALPHA, OVERLAY_SENTINEL,
};
pub use quantize::{quantize_10bit, quantize_rgb, TEN_BIT_MAX};
pub use shading::{Rgb, Vec2};
pub use wgsl::PATTERN_SHADER;
