//! Default key bindings driving a session through the event queue.

use spectra::input::default_controls;
use spectra_core::{dispatch, Category, EventQueue, InputEvent, PacingMode, Session};
use winit::keyboard::KeyCode;

fn press(session: &mut Session, keys: &[KeyCode]) -> spectra_core::TickInput {
    let controls = default_controls();
    let mut queue = EventQueue::new();
    for key in keys {
        queue.push(InputEvent::Key(*key));
    }
    dispatch(&mut queue, &controls, session)
}

#[test]
fn test_arrows_and_space_move_selection() {
    let mut session = Session::default();
    assert_eq!(session.selector.category(), Category::Dynamic);

    press(&mut session, &[KeyCode::ArrowLeft]);
    assert_eq!(session.selector.index(), 13);

    press(&mut session, &[KeyCode::Space, KeyCode::ArrowRight, KeyCode::ArrowRight]);
    assert_eq!(session.selector.category(), Category::Auxiliary);
    assert_eq!(session.selector.index(), 2);

    // dynamic kept its own index
    press(&mut session, &[KeyCode::Space, KeyCode::Space]);
    assert_eq!(session.selector.category(), Category::Dynamic);
    assert_eq!(session.selector.index(), 13);
}

#[test]
fn test_extreme_preset_reports_vsync_change() {
    let mut session = Session::default();
    press(&mut session, &[KeyCode::KeyV]);
    assert!(session.config.vsync_enabled);

    let input = press(&mut session, &[KeyCode::F12]);
    assert_eq!(input.vsync_changed, Some(false));
    assert!(session.extreme);
    assert!(session.minimal_overlay);
    assert_eq!(session.config.pacing_mode, PacingMode::Jitter);
    assert_eq!((session.config.min_fps, session.config.max_fps), (30, 240));
    assert_eq!(session.selector.category(), Category::Dynamic);
    assert_eq!(session.selector.index(), 1);
}

#[test]
fn test_pacing_keys() {
    let mut session = Session::default();
    press(&mut session, &[KeyCode::F2]);
    assert_eq!(session.config.pacing_mode, PacingMode::Jitter);
    press(&mut session, &[KeyCode::F3]);
    assert_eq!(session.config.pacing_mode, PacingMode::Oscillation);
    press(&mut session, &[KeyCode::F2]);
    assert_eq!(session.config.pacing_mode, PacingMode::Fixed);
    press(&mut session, &[KeyCode::F2]);
    assert_eq!(session.config.pacing_mode, PacingMode::Oscillation);
}

#[test]
fn test_escape_and_close_exit() {
    let mut session = Session::default();
    assert!(press(&mut session, &[KeyCode::Escape]).exit_requested);

    let controls = default_controls();
    let mut queue = EventQueue::new();
    queue.push(InputEvent::CloseRequested);
    assert!(dispatch(&mut queue, &controls, &mut session).exit_requested);
}

#[test]
fn test_unbound_keys_are_ignored() {
    let mut session = Session::default();
    let before = session.clone();
    let input = press(&mut session, &[KeyCode::KeyQ, KeyCode::Tab]);
    assert!(!input.exit_requested);
    assert_eq!(session.config, before.config);
    assert_eq!(session.selector.index(), before.selector.index());
}
