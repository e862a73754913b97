//! # SPECTRA UI
//!
//! Diagnostic overlay: a status panel on the left, a controls panel on the
//! right, both sized from measured text every frame.
//!
//! Nothing here draws. [`OverlayLayout::layout`] returns rectangles and
//! positioned strings; the renderer fills the rectangles with the
//! translucent background and hands the strings to the text engine.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod geometry;
pub mod labels;
pub mod overlay;
pub mod style;

pub use geometry::Rect;
pub use overlay::{
    panel_height, OverlayFrame, OverlayLayout, OverlayLine, OverlayStatus, Panel, PlacedText,
    SystemInfo, TextMeasure,
};
pub use style::Color;
