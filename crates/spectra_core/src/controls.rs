//! Operator actions and the key → action dispatch table.
//!
//! The table is generic over the key type so the window layer can bind its own
//! key codes while everything else stays headless.

use std::collections::HashMap;
use std::hash::Hash;

/// Everything the operator can do from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Leave the render loop.
    Exit,
    /// Freeze / unfreeze the pattern clock.
    TogglePause,
    /// Cycle S → D → A.
    CycleCategory,
    /// Next pattern in the active category.
    NextPattern,
    /// Previous pattern in the active category.
    PreviousPattern,
    /// Flip vertical sync.
    ToggleVsync,
    /// Flip the minimal (FPS-only) overlay.
    ToggleMinimalOverlay,
    /// FIXED ↔ range pacing.
    TogglePacing,
    /// JITTER ↔ OSCILLATION for range pacing.
    ToggleRangeKind,
    /// Apply / clear the extreme preset.
    ToggleExtreme,
    /// `min_fps - 1`.
    DecreaseMinFps,
    /// `min_fps + 1`.
    IncreaseMinFps,
    /// `max_fps - 1`.
    DecreaseMaxFps,
    /// `max_fps + 1`.
    IncreaseMaxFps,
    /// ZH ↔ EN.
    ToggleLanguage,
}

/// One row of the controls panel: a key label and the action it stands for.
///
/// Paired keys (`F5/F6`) use one hint whose action names the pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlHint {
    /// Key label as printed, e.g. `ESC` or `←/→`.
    pub keys: String,
    /// Representative action for the description column.
    pub action: Action,
}

/// Key → action dispatch table plus the hints shown to the operator.
#[derive(Debug, Clone)]
pub struct ControlMap<K> {
    bindings: HashMap<K, Action>,
    hints: Vec<ControlHint>,
}

impl<K> Default for ControlMap<K> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
            hints: Vec::new(),
        }
    }
}

impl<K: Eq + Hash> ControlMap<K> {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key` to `action`, replacing any previous binding of that key.
    pub fn bind(&mut self, key: K, action: Action) -> &mut Self {
        self.bindings.insert(key, action);
        self
    }

    /// Appends a row to the controls panel.
    pub fn hint(&mut self, keys: impl Into<String>, action: Action) -> &mut Self {
        self.hints.push(ControlHint {
            keys: keys.into(),
            action,
        });
        self
    }

    /// Action bound to `key`, if any.
    #[must_use]
    pub fn action_for(&self, key: &K) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Panel rows in insertion order.
    #[must_use]
    pub fn hints(&self) -> &[ControlHint] {
        &self.hints
    }

    /// Number of bound keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebinding_replaces() {
        let mut map = ControlMap::new();
        map.bind('p', Action::TogglePause).bind('p', Action::Exit);
        assert_eq!(map.action_for(&'p'), Some(Action::Exit));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_unbound_key() {
        let map: ControlMap<char> = ControlMap::new();
        assert!(map.is_empty());
        assert_eq!(map.action_for(&'x'), None);
    }

    #[test]
    fn test_hints_keep_order() {
        let mut map: ControlMap<char> = ControlMap::new();
        map.hint("ESC", Action::Exit).hint("P", Action::TogglePause);
        let keys: Vec<&str> = map.hints().iter().map(|h| h.keys.as_str()).collect();
        assert_eq!(keys, ["ESC", "P"]);
    }
}
