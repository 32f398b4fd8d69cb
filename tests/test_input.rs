use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

use cookies_for_cletus::clock::{FrameLimiter, PeriodicTimer};
use cookies_for_cletus::input::{GameEvent, InputSource, KeyTracker, TerminalInput};

fn key(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind,
        state: KeyEventState::NONE,
    })
}

fn press(code: KeyCode) -> Event {
    key(code, KeyEventKind::Press)
}

// ── KeyTracker ────────────────────────────────────────────────────────────────

#[test]
fn pressed_keys_are_held() {
    let mut keys = KeyTracker::new();
    keys.next_frame();
    keys.handle(&press(KeyCode::Up));
    keys.handle(&press(KeyCode::Char(' ')));
    let held = keys.held();
    assert!(held.up);
    assert!(!held.down);
    assert!(held.fire);
}

#[test]
fn wasd_aliases_work() {
    let mut keys = KeyTracker::new();
    keys.next_frame();
    keys.handle(&press(KeyCode::Char('s')));
    assert!(keys.held().down);
    keys.handle(&press(KeyCode::Char('W')));
    assert!(keys.held().up);
}

#[test]
fn keys_expire_without_repeats() {
    let mut keys = KeyTracker::new();
    keys.next_frame();
    keys.handle(&press(KeyCode::Down));
    for _ in 0..4 {
        keys.next_frame();
        assert!(keys.held().down);
    }
    keys.next_frame();
    assert!(!keys.held().down);
}

#[test]
fn repeats_refresh_and_release_drops() {
    let mut keys = KeyTracker::new();
    keys.next_frame();
    keys.handle(&press(KeyCode::Up));
    for _ in 0..10 {
        keys.next_frame();
        keys.handle(&key(KeyCode::Up, KeyEventKind::Repeat));
    }
    assert!(keys.held().up);
    keys.handle(&key(KeyCode::Up, KeyEventKind::Release));
    assert!(!keys.held().up);
}

#[test]
fn quit_keys() {
    let mut keys = KeyTracker::new();
    assert_eq!(keys.handle(&press(KeyCode::Char('q'))), Some(GameEvent::Quit));
    assert_eq!(keys.handle(&press(KeyCode::Esc)), Some(GameEvent::Quit));
    let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert_eq!(keys.handle(&ctrl_c), Some(GameEvent::Quit));
    assert_eq!(keys.handle(&press(KeyCode::Char('c'))), None);
    assert_eq!(keys.handle(&Event::FocusLost), None);
}

// ── TerminalInput ─────────────────────────────────────────────────────────────

#[test]
fn poll_drains_channel_and_emits_bonus_ticks() {
    let (tx, rx) = mpsc::channel();
    let mut input = TerminalInput::new(rx, Duration::from_millis(1000));

    tx.send(press(KeyCode::Char(' '))).unwrap();
    let frame = input.poll(Duration::from_millis(600));
    assert!(frame.held.fire);
    assert!(frame.events.is_empty());

    tx.send(press(KeyCode::Char('q'))).unwrap();
    let frame = input.poll(Duration::from_millis(600));
    assert_eq!(frame.events, vec![GameEvent::Quit, GameEvent::BonusTick]);
}

// ── Clock ─────────────────────────────────────────────────────────────────────

#[test]
fn periodic_timer_counts_whole_periods() {
    let mut timer = PeriodicTimer::new(Duration::from_millis(1000));
    assert_eq!(timer.advance(Duration::from_millis(999)), 0);
    assert_eq!(timer.advance(Duration::from_millis(1)), 1);
    assert_eq!(timer.advance(Duration::from_millis(2500)), 2);
    assert_eq!(timer.advance(Duration::from_millis(500)), 1);
}

#[test]
fn zero_period_never_fires() {
    let mut timer = PeriodicTimer::new(Duration::ZERO);
    assert_eq!(timer.advance(Duration::from_secs(5)), 0);
}

#[test]
fn frame_limiter_paces_ticks() {
    let mut clock = FrameLimiter::new(30);
    clock.tick();
    let dt = clock.tick();
    assert!(dt >= Duration::from_millis(33));
    assert_eq!(clock.frames(), 2);
}
