use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::Button;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Press(Button),
    Release(Button),
    Quit,
    None,
}

/// Maps keys onto the two panel buttons
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        let button = match key.code {
            KeyCode::Left | KeyCode::Char('a' | 'A' | 'z' | 'Z') => Some(Button::Left),
            KeyCode::Right | KeyCode::Char('d' | 'D' | 'x' | 'X') => Some(Button::Right),
            _ => None,
        };

        match (key.kind, button) {
            (KeyEventKind::Press, Some(button)) => KeyAction::Press(button),
            (KeyEventKind::Release, Some(button)) => KeyAction::Release(button),
            (KeyEventKind::Press, None) => match key.code {
                KeyCode::Char('q' | 'Q') | KeyCode::Esc => KeyAction::Quit,
                _ => KeyAction::None,
            },
            // Auto-repeat of a held key is not a new press
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
