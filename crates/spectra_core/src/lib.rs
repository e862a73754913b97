//! # SPECTRA Core
//!
//! Headless state for the display stress tester.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        ONE LOOP TICK                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  EventQueue → ControlMap → Session::apply → FramePacer        │
//! │      ↓             ↓              ↓               ↓           │
//! │  key/resize    key → Action   state mutation   sleep/report   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`Session`] is the single owner of run state. Nothing here touches the
//! GPU or the window system; time and randomness are injected so every piece
//! is deterministic under test.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod controls;
pub mod error;
pub mod events;
pub mod locale;
pub mod pacer;
pub mod selector;
pub mod session;
pub mod settings;

pub use config::{PacingMode, RunConfig, FPS_CEILING, FPS_FLOOR};
pub use controls::{Action, ControlHint, ControlMap};
pub use error::{CoreError, CoreResult};
pub use events::{dispatch, EventQueue, InputEvent, TickInput};
pub use locale::Language;
pub use pacer::{FpsReport, FrameClock, FramePacer};
pub use selector::{
    Category, PatternSelector, AUXILIARY_PATTERN_COUNT, DYNAMIC_PATTERN_COUNT,
    STATIC_PATTERN_COUNT,
};
pub use session::{Effect, Session};
pub use settings::Settings;
