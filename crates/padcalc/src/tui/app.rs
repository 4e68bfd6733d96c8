//! TUI application state
//!
//! Wraps a [`CalculatorSession`] with the bits of state only the terminal
//! front end needs: keypad highlight, history scroll offset and the quit flag.

use ratatui::layout::Rect;
use tracing::debug;

use super::input::KeyAction;
use super::keypad::Keypad;
use crate::session::{ButtonEvent, CalculatorSession};

/// Number of history lines moved by PageUp/PageDown
pub const HISTORY_PAGE: usize = 5;

/// Calculator application state
#[derive(Debug, Default)]
pub struct CalculatorApp {
    session: CalculatorSession,
    keypad: Keypad,
    /// Entries scrolled back from the newest one (0 = newest visible)
    history_scroll: usize,
    should_quit: bool,
}

impl CalculatorApp {
    /// Creates a new calculator app
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying session
    #[must_use]
    pub fn session(&self) -> &CalculatorSession {
        &self.session
    }

    /// The keypad with its highlight state
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Input line text; `"0"` while nothing has been typed
    #[must_use]
    pub fn input_display(&self) -> &str {
        match self.session.current_input() {
            "" => "0",
            input => input,
        }
    }

    /// The most recently pressed button
    #[must_use]
    pub fn last_pressed(&self) -> Option<ButtonEvent> {
        self.keypad.pressed().map(|btn| btn.event)
    }

    /// Current history scroll offset
    #[must_use]
    pub fn history_scroll(&self) -> usize {
        self.history_scroll
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Presses a calculator button
    pub fn press(&mut self, event: ButtonEvent) {
        let before = self.session.history().len();
        self.session.handle(event);
        self.keypad.highlight(event);

        // Jump back to the newest entry when the log changes
        if self.session.history().len() != before {
            self.history_scroll = 0;
        }
    }

    /// Applies a keyboard action
    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Press(event) => self.press(event),
            KeyAction::ScrollUp => self.scroll_history_up(1),
            KeyAction::ScrollDown => self.scroll_history_down(1),
            KeyAction::PageUp => self.scroll_history_up(HISTORY_PAGE),
            KeyAction::PageDown => self.scroll_history_down(HISTORY_PAGE),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Presses the keypad button under a mouse click, if any
    pub fn click(&mut self, keypad_area: Rect, x: u16, y: u16) {
        match self.keypad.event_at(keypad_area, x, y) {
            Some(event) => self.press(event),
            None => debug!(x, y, "click outside keypad buttons"),
        }
    }

    /// Scrolls towards older entries
    pub fn scroll_history_up(&mut self, lines: usize) {
        let max = self.session.history().len().saturating_sub(1);
        self.history_scroll = (self.history_scroll + lines).min(max);
    }

    /// Scrolls towards newer entries
    pub fn scroll_history_down(&mut self, lines: usize) {
        self.history_scroll = self.history_scroll.saturating_sub(lines);
    }
}
