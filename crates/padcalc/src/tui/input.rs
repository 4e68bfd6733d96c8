//! Keyboard input handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::Operation;
use crate::session::ButtonEvent;

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Press a calculator button
    Press(ButtonEvent),
    /// Scroll history towards older entries
    ScrollUp,
    /// Scroll history towards newer entries
    ScrollDown,
    /// Scroll history a page towards older entries
    PageUp,
    /// Scroll history a page towards newer entries
    PageDown,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char(c) => Self::char_action(c),
            KeyCode::Enter => KeyAction::Press(ButtonEvent::Evaluate),
            KeyCode::Backspace => KeyAction::Press(ButtonEvent::Backspace),
            KeyCode::Esc => KeyAction::Press(ButtonEvent::Clear),
            KeyCode::Up => KeyAction::ScrollUp,
            KeyCode::Down => KeyAction::ScrollDown,
            KeyCode::PageUp => KeyAction::PageUp,
            KeyCode::PageDown => KeyAction::PageDown,
            _ => KeyAction::None,
        }
    }

    fn char_action(c: char) -> KeyAction {
        if let Some(d) = c.to_digit(10) {
            return KeyAction::Press(ButtonEvent::Digit(d as u8));
        }
        if let Some(op) = Operation::from_symbol(c) {
            return KeyAction::Press(ButtonEvent::Operator(op));
        }

        match c {
            '.' => KeyAction::Press(ButtonEvent::DecimalPoint),
            '=' => KeyAction::Press(ButtonEvent::Evaluate),
            '%' => KeyAction::Press(ButtonEvent::Percent),
            'c' | 'C' => KeyAction::Press(ButtonEvent::Clear),
            'r' | 'R' => KeyAction::Press(ButtonEvent::SquareRoot),
            'h' | 'H' => KeyAction::Press(ButtonEvent::ClearHistory),
            'q' | 'Q' => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key(KeyEvent::new(code, KeyModifiers::CONTROL))
    }

    fn press(event: ButtonEvent) -> KeyAction {
        KeyAction::Press(event)
    }

    #[test]
    fn test_digit_keys() {
        for d in 0..=9u8 {
            let c = char::from(b'0' + d);
            assert_eq!(key(KeyCode::Char(c)), press(ButtonEvent::Digit(d)));
        }
    }

    #[test]
    fn test_operator_keys() {
        for op in Operation::ALL {
            assert_eq!(key(KeyCode::Char(op.symbol())), press(ButtonEvent::Operator(op)));
        }
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(key(KeyCode::Char('.')), press(ButtonEvent::DecimalPoint));
        assert_eq!(key(KeyCode::Char('%')), press(ButtonEvent::Percent));
        assert_eq!(key(KeyCode::Char('r')), press(ButtonEvent::SquareRoot));
        assert_eq!(key(KeyCode::Char('h')), press(ButtonEvent::ClearHistory));
        assert_eq!(key(KeyCode::Char('c')), press(ButtonEvent::Clear));
    }

    #[test]
    fn test_evaluate_keys() {
        assert_eq!(key(KeyCode::Enter), press(ButtonEvent::Evaluate));
        assert_eq!(key(KeyCode::Char('=')), press(ButtonEvent::Evaluate));
    }

    #[test]
    fn test_edit_keys() {
        assert_eq!(key(KeyCode::Backspace), press(ButtonEvent::Backspace));
        assert_eq!(key(KeyCode::Esc), press(ButtonEvent::Clear));
    }

    #[test]
    fn test_scroll_keys() {
        assert_eq!(key(KeyCode::Up), KeyAction::ScrollUp);
        assert_eq!(key(KeyCode::Down), KeyAction::ScrollDown);
        assert_eq!(key(KeyCode::PageUp), KeyAction::PageUp);
        assert_eq!(key(KeyCode::PageDown), KeyAction::PageDown);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(key(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(ctrl(KeyCode::Char('c')), KeyAction::Quit);
        assert_eq!(ctrl(KeyCode::Char('q')), KeyAction::Quit);
    }

    #[test]
    fn test_ctrl_with_other_keys_ignored() {
        assert_eq!(ctrl(KeyCode::Char('5')), KeyAction::None);
        assert_eq!(ctrl(KeyCode::Enter), KeyAction::None);
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(key(KeyCode::Char('^')), KeyAction::None);
        assert_eq!(key(KeyCode::Char('(')), KeyAction::None);
        assert_eq!(key(KeyCode::Tab), KeyAction::None);
        assert_eq!(key(KeyCode::F(1)), KeyAction::None);
    }
}
