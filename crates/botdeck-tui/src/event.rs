//! Terminal event polling

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};

use botdeck_app::message::Message;
use botdeck_app::InputKey;
use botdeck_core::prelude::*;

/// Convert crossterm KeyEvent to InputKey
pub fn key_event_to_input(key: crossterm::event::KeyEvent) -> Option<InputKey> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputKey::Ctrl(c))
        }
        KeyCode::Char(c) => Some(InputKey::Char(c)),
        KeyCode::Enter => Some(InputKey::Enter),
        KeyCode::Esc => Some(InputKey::Esc),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Some(InputKey::BackTab),
        KeyCode::Tab => Some(InputKey::Tab),
        KeyCode::BackTab => Some(InputKey::BackTab),
        KeyCode::Backspace => Some(InputKey::Backspace),
        KeyCode::Delete => Some(InputKey::Delete),
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Left => Some(InputKey::Left),
        KeyCode::Right => Some(InputKey::Right),
        KeyCode::Home => Some(InputKey::Home),
        KeyCode::End => Some(InputKey::End),
        KeyCode::PageUp => Some(InputKey::PageUp),
        KeyCode::PageDown => Some(InputKey::PageDown),
        _ => None, // Unsupported keys ignored
    }
}

/// Poll for terminal events with timeout
pub fn poll() -> Result<Option<Message>> {
    // Poll with 50ms timeout (20 FPS)
    if event::poll(Duration::from_millis(50))? {
        let event = event::read()?;
        match event {
            Event::Key(key) => {
                if key.kind == event::KeyEventKind::Press {
                    Ok(key_event_to_input(key).map(Message::Key))
                } else {
                    Ok(None)
                }
            }
            _ => Ok(None),
        }
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn test_char_conversion() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(key_event_to_input(key), Some(InputKey::Char('a')));
    }

    #[test]
    fn test_char_with_ctrl_conversion() {
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(key_event_to_input(key), Some(InputKey::Ctrl('s')));
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            key_event_to_input(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)),
            Some(InputKey::Up)
        );
        assert_eq!(
            key_event_to_input(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)),
            Some(InputKey::Down)
        );
    }

    #[test]
    fn test_backtab_with_shift() {
        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT);
        assert_eq!(key_event_to_input(key), Some(InputKey::BackTab));
    }

    #[test]
    fn test_unsupported_key_ignored() {
        let key = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(key_event_to_input(key), None);
    }
}
