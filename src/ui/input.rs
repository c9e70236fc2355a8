/// Input state tracker.
///
/// The simulation takes no steering input. The only keys that matter are
/// the ones that stop the run (Esc, Q, Ctrl+C) and "any key" to skip the
/// final-path pause. Polling never blocks, so the tick pacing stays with
/// the run loop.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const KEYS_ABORT: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];

pub struct InputState {
    /// Key presses collected during the most recent drain_events() call.
    pub raw_events: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { raw_events: Vec::with_capacity(8) }
    }

    /// Drain all pending terminal events without blocking.
    /// Call once per frame.
    pub fn drain_events(&mut self) {
        self.raw_events.clear();
        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if key.kind != KeyEventKind::Release {
                    self.raw_events.push(key);
                }
            }
        }
    }

    pub fn abort_requested(&self) -> bool {
        is_abort(&self.raw_events)
    }

    pub fn any_key(&self) -> bool {
        !self.raw_events.is_empty()
    }
}

fn is_abort(events: &[KeyEvent]) -> bool {
    events.iter().any(|k| {
        KEYS_ABORT.contains(&k.code)
            || (k.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(k.code, KeyCode::Char('c') | KeyCode::Char('C')))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn esc_and_q_abort() {
        assert!(is_abort(&[key(KeyCode::Esc, KeyModifiers::NONE)]));
        assert!(is_abort(&[key(KeyCode::Char('q'), KeyModifiers::NONE)]));
    }

    #[test]
    fn ctrl_c_aborts_but_plain_c_does_not() {
        assert!(is_abort(&[key(KeyCode::Char('c'), KeyModifiers::CONTROL)]));
        assert!(!is_abort(&[key(KeyCode::Char('c'), KeyModifiers::NONE)]));
    }

    #[test]
    fn no_events_no_abort() {
        assert!(!is_abort(&[]));
        assert!(!InputState::new().any_key());
    }
}
