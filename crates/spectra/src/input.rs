//! Key bindings.
//!
//! Physical key codes, so the layout of the keyboard does not move them.

use spectra_core::{Action, ControlMap};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Default bindings, with control-panel hints in display order.
#[must_use]
pub fn default_controls() -> ControlMap<KeyCode> {
    let mut map = ControlMap::new();
    map.bind(KeyCode::Escape, Action::Exit)
        .bind(KeyCode::KeyP, Action::TogglePause)
        .bind(KeyCode::Space, Action::CycleCategory)
        .bind(KeyCode::ArrowLeft, Action::PreviousPattern)
        .bind(KeyCode::ArrowRight, Action::NextPattern)
        .bind(KeyCode::KeyV, Action::ToggleVsync)
        .bind(KeyCode::F1, Action::ToggleMinimalOverlay)
        .bind(KeyCode::F2, Action::TogglePacing)
        .bind(KeyCode::F3, Action::ToggleRangeKind)
        .bind(KeyCode::F12, Action::ToggleExtreme)
        .bind(KeyCode::F5, Action::DecreaseMinFps)
        .bind(KeyCode::F6, Action::IncreaseMinFps)
        .bind(KeyCode::F7, Action::DecreaseMaxFps)
        .bind(KeyCode::F8, Action::IncreaseMaxFps)
        .bind(KeyCode::KeyL, Action::ToggleLanguage);

    map.hint("ESC", Action::Exit)
        .hint("P", Action::TogglePause)
        .hint("SPACE", Action::CycleCategory)
        .hint("←/→", Action::NextPattern)
        .hint("V", Action::ToggleVsync)
        .hint("F1", Action::ToggleMinimalOverlay)
        .hint("F2", Action::TogglePacing)
        .hint("F3", Action::ToggleRangeKind)
        .hint("F12", Action::ToggleExtreme)
        .hint("F5/F6", Action::IncreaseMinFps)
        .hint("F7/F8", Action::IncreaseMaxFps)
        .hint("L", Action::ToggleLanguage);
    map
}

/// Key code of a fresh press; releases, auto-repeat and unidentified keys
/// give `None`.
#[must_use]
pub fn pressed_code(physical: PhysicalKey, state: ElementState, repeat: bool) -> Option<KeyCode> {
    match (physical, state, repeat) {
        (PhysicalKey::Code(code), ElementState::Pressed, false) => Some(code),
        _ => None,
    }
}

/// [`pressed_code`] for a winit key event.
#[must_use]
pub fn pressed_key(event: &KeyEvent) -> Option<KeyCode> {
    pressed_code(event.physical_key, event.state, event.repeat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_is_bound() {
        let map = default_controls();
        let bound: Vec<Action> = [
            KeyCode::Escape,
            KeyCode::KeyP,
            KeyCode::Space,
            KeyCode::ArrowLeft,
            KeyCode::ArrowRight,
            KeyCode::KeyV,
            KeyCode::F1,
            KeyCode::F2,
            KeyCode::F3,
            KeyCode::F12,
            KeyCode::F5,
            KeyCode::F6,
            KeyCode::F7,
            KeyCode::F8,
            KeyCode::KeyL,
        ]
        .iter()
        .filter_map(|key| map.action_for(key))
        .collect();
        assert_eq!(bound.len(), 15);
        assert_eq!(map.len(), 15);
        assert_eq!(map.action_for(&KeyCode::ArrowLeft), Some(Action::PreviousPattern));
        assert_eq!(map.action_for(&KeyCode::F12), Some(Action::ToggleExtreme));
        assert_eq!(map.action_for(&KeyCode::KeyQ), None);
    }

    #[test]
    fn test_hint_order() {
        let map = default_controls();
        let keys: Vec<&str> = map.hints().iter().map(|h| h.keys.as_str()).collect();
        assert_eq!(
            keys,
            ["ESC", "P", "SPACE", "←/→", "V", "F1", "F2", "F3", "F12", "F5/F6", "F7/F8", "L"]
        );
    }

    #[test]
    fn test_only_fresh_presses_count() {
        let esc = PhysicalKey::Code(KeyCode::Escape);
        assert_eq!(pressed_code(esc, ElementState::Pressed, false), Some(KeyCode::Escape));
        assert_eq!(pressed_code(esc, ElementState::Pressed, true), None);
        assert_eq!(pressed_code(esc, ElementState::Released, false), None);
    }
}
