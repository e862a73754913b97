//! # SPECTRA Text
//!
//! Overlay text without a pre-baked atlas.
//!
//! ## Pieces
//!
//! - [`utf8`]: lenient byte → code point decoding
//! - [`backend`]: the [`FontBackend`] seam and its `fontdue` implementation
//! - [`store`]: the [`GlyphTextureStore`] seam the GPU side implements
//! - [`engine`]: the growth-only glyph cache, measurement and line layout
//! - [`discovery`]: system font lookup and size selection
//!
//! Every glyph is rasterized and uploaded at most once per loaded font.
//! A missing font never fails measurement; widths degrade to an estimate.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod backend;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod store;
pub mod utf8;

pub use backend::{FontBackend, FontMetrics, FontdueBackend, RasterizedGlyph};
pub use discovery::{find_system_font, font_pixel_size};
pub use engine::{GlyphQuad, GlyphRecord, TextEngine, FALLBACK_GLYPH};
pub use error::{TextError, TextResult};
pub use store::{GlyphTextureStore, MemoryTextureStore, TextureHandle};
pub use utf8::{decode, Utf8Decoder, REPLACEMENT};
