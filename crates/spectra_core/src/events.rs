//! Input events and the once-per-tick drain.
//!
//! The window layer pushes events as they arrive; the loop drains the queue at
//! a single point per iteration, so state never changes mid-frame.

use std::collections::VecDeque;
use std::hash::Hash;

use crate::controls::ControlMap;
use crate::session::{Effect, Session};

/// Event delivered by the window system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent<K> {
    /// A key was pressed (releases and repeats are filtered upstream).
    Key(K),
    /// The drawable area changed size, in physical pixels.
    Resized {
        /// New width.
        width: u32,
        /// New height.
        height: u32,
    },
    /// The window asked to close.
    CloseRequested,
}

/// FIFO of pending input events.
#[derive(Debug, Clone)]
pub struct EventQueue<K> {
    pending: VecDeque<InputEvent<K>>,
}

impl<K> Default for EventQueue<K> {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }
}

impl<K> EventQueue<K> {
    /// Empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues an event.
    pub fn push(&mut self, event: InputEvent<K>) {
        self.pending.push_back(event);
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and yields every pending event in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent<K>> + '_ {
        self.pending.drain(..)
    }
}

/// What one drain produced for the rest of the tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Close flag: leave the loop after this tick.
    pub exit_requested: bool,
    /// Last resize seen, if any.
    pub resized: Option<(u32, u32)>,
    /// Final vsync value if it changed during the drain.
    pub vsync_changed: Option<bool>,
}

/// Drains `queue`, applying bound actions to `session` in arrival order.
///
/// Unbound keys are ignored.
pub fn dispatch<K: Eq + Hash>(
    queue: &mut EventQueue<K>,
    controls: &ControlMap<K>,
    session: &mut Session,
) -> TickInput {
    let mut input = TickInput::default();
    for event in queue.drain() {
        match event {
            InputEvent::Key(key) => {
                let Some(action) = controls.action_for(&key) else {
                    continue;
                };
                match session.apply(action) {
                    Effect::None => {}
                    Effect::Exit => input.exit_requested = true,
                    Effect::VsyncChanged(enabled) => input.vsync_changed = Some(enabled),
                }
            }
            InputEvent::Resized { width, height } => input.resized = Some((width, height)),
            InputEvent::CloseRequested => input.exit_requested = true,
        }
    }
    input
}
