//! # SPECTRA
//!
//! Full-screen display stress test: procedural calibration and high-entropy
//! patterns, three frame-pacing strategies and a live diagnostics overlay.
//!
//! This crate wires the library crates to a winit window:
//!
//! - [`input`]: physical key → [`spectra_core::Action`] bindings
//! - [`scene`]: pattern uniforms and overlay geometry per frame
//! - [`app`]: the render loop
//! - [`cli`] and [`logging`]: process bootstrap

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod app;
pub mod cli;
pub mod input;
pub mod logging;
pub mod scene;

pub use app::{App, TickOutcome};
pub use cli::Cli;
pub use scene::{FontChoice, OverlayScene};
