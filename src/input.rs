/// Input sampling.
///
/// Each frame the loop asks its `InputSource` for the keys currently held
/// and the discrete events that arrived since the last frame.

use std::collections::HashMap;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::clock::PeriodicTimer;

/// A key counts as held if its last press/repeat arrived within this many
/// frames.  Terminals without release events only send OS key-repeat
/// presses (≥ 15 Hz), which refresh the key well inside 4 frames at 30 FPS.
const HOLD_WINDOW: u64 = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Quit,
    /// The bonus timer completed a period.
    BonusTick,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub held: HeldKeys,
    pub events: Vec<GameEvent>,
}

pub trait InputSource {
    /// Sample input for one frame; `elapsed` is the wall-clock time since
    /// the previous frame and drives the bonus timer.
    fn poll(&mut self, elapsed: Duration) -> FrameInput;
}

/// Turns raw terminal events into per-frame held-key state.
///
/// Works with and without keyboard-enhancement support: release events
/// drop a key immediately, otherwise keys expire after `HOLD_WINDOW`
/// frames of silence.
#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Maps each held key to the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

impl KeyTracker {
    pub fn new() -> KeyTracker {
        KeyTracker::default()
    }

    /// Start a new frame.
    pub fn next_frame(&mut self) {
        self.frame += 1;
    }

    /// Record one terminal event; returns `Some(Quit)` for a quit request.
    pub fn handle(&mut self, event: &Event) -> Option<GameEvent> {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
            return None;
        };
        match kind {
            KeyEventKind::Press => {
                self.key_frame.insert(*code, self.frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(GameEvent::Quit),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        Some(GameEvent::Quit)
                    }
                    _ => None,
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(*code, self.frame);
                None
            }
            KeyEventKind::Release => {
                self.key_frame.remove(code);
                None
            }
        }
    }

    fn is_held(&self, key: KeyCode) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&k| self.is_held(k))
    }

    pub fn held(&self) -> HeldKeys {
        HeldKeys {
            up: self.any_held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
            down: self.any_held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
            fire: self.is_held(KeyCode::Char(' ')),
        }
    }
}

/// Terminal input fed by a reader thread over a channel, plus the bonus
/// timer.
pub struct TerminalInput {
    rx: mpsc::Receiver<Event>,
    keys: KeyTracker,
    bonus_timer: PeriodicTimer,
}

impl TerminalInput {
    pub fn new(rx: mpsc::Receiver<Event>, bonus_interval: Duration) -> TerminalInput {
        TerminalInput {
            rx,
            keys: KeyTracker::new(),
            bonus_timer: PeriodicTimer::new(bonus_interval),
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self, elapsed: Duration) -> FrameInput {
        self.keys.next_frame();

        // Drain all pending terminal events without blocking
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            if let Some(game_event) = self.keys.handle(&event) {
                events.push(game_event);
            }
        }

        for _ in 0..self.bonus_timer.advance(elapsed) {
            events.push(GameEvent::BonusTick);
        }

        FrameInput {
            held: self.keys.held(),
            events,
        }
    }
}
