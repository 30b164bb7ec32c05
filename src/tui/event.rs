//! Event handling module
//!
//! Uses crossterm for terminal event handling.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Event poll interval (milliseconds)
const TICK_RATE: u64 = 50;

/// Event type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Tab key
    Tab,
    /// Backspace key
    Backspace,
    /// Home key
    Home,
    /// End key
    End,
    /// Character input
    Char(char),
    /// Ctrl+C exit
    CtrlC,
    /// Window resize
    Resize(u16, u16),
    /// No event (timeout)
    None,
}

impl From<Event> for TuiEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key_event) => key_event.into(),
            Event::Resize(width, height) => TuiEvent::Resize(width, height),
            _ => TuiEvent::None,
        }
    }
}

impl From<KeyEvent> for TuiEvent {
    fn from(key: KeyEvent) -> Self {
        // Ignore non-press events
        if key.kind != KeyEventKind::Press {
            return TuiEvent::None;
        }

        // Handle Ctrl+C and Ctrl+D exit
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
        {
            return TuiEvent::CtrlC;
        }

        match key.code {
            KeyCode::Esc => TuiEvent::Escape,
            KeyCode::Enter => TuiEvent::Enter,
            KeyCode::Up => TuiEvent::Up,
            KeyCode::Down => TuiEvent::Down,
            KeyCode::Left => TuiEvent::Left,
            KeyCode::Right => TuiEvent::Right,
            KeyCode::Tab => TuiEvent::Tab,
            KeyCode::Backspace => TuiEvent::Backspace,
            KeyCode::Home => TuiEvent::Home,
            KeyCode::End => TuiEvent::End,
            KeyCode::Char(c) => TuiEvent::Char(c),
            _ => TuiEvent::None,
        }
    }
}

/// Event poller
#[derive(Debug)]
pub struct EventPoll {
    tick_rate: Duration,
}

impl EventPoll {
    /// Create new event poller
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Poll next event
    pub fn next(&self) -> TuiEvent {
        if event::poll(self.tick_rate).unwrap_or(false) {
            event::read()
                .unwrap_or_else(|_| Event::Key(KeyEvent::new(KeyCode::Null, KeyModifiers::empty())))
                .into()
        } else {
            TuiEvent::None
        }
    }
}

impl Default for EventPoll {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_c_maps_to_exit() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(TuiEvent::from(key), TuiEvent::CtrlC);
    }

    #[test]
    fn test_plain_keys() {
        let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::empty());
        assert_eq!(TuiEvent::from(key), TuiEvent::Char('r'));
        let key = KeyEvent::new(KeyCode::Backspace, KeyModifiers::empty());
        assert_eq!(TuiEvent::from(key), TuiEvent::Backspace);
    }
}
