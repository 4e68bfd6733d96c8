//! Button-driven calculator session
//!
//! [`CalculatorSession`] is the only mutable state in the calculator. The UI
//! forwards each button press to [`CalculatorSession::handle`] and reads the
//! display back through the accessors. Input-building buttons only append
//! text; the expression is validated when `=` is pressed.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::evaluator;
use crate::core::history::{History, HistoryEntry};
use crate::core::{format_number, Operation, ERROR_DISPLAY};

/// Result text of a fresh or cleared session
pub const INITIAL_RESULT: &str = "0";

/// One keypad button press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonEvent {
    /// "C": reset input and result
    Clear,
    /// "⌫": drop the last input character
    Backspace,
    /// "%": divide the current result by 100
    Percent,
    /// "√": square root of the current result
    SquareRoot,
    /// "=": evaluate the input
    Evaluate,
    /// "Clear History": drop every history entry
    ClearHistory,
    /// A digit 0-9
    Digit(u8),
    /// One of `+ - * /`
    Operator(Operation),
    /// "."
    DecimalPoint,
}

impl ButtonEvent {
    /// Creates a digit event, or `None` outside `0..=9`
    #[must_use]
    pub fn digit(d: u8) -> Option<Self> {
        (d <= 9).then_some(Self::Digit(d))
    }

    /// The text this event appends to the input, if it is an input-building event
    #[must_use]
    pub fn input_char(&self) -> Option<char> {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(*d), 10),
            Self::Operator(op) => Some(op.symbol()),
            Self::DecimalPoint => Some('.'),
            _ => None,
        }
    }

    /// Canonical button label
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ButtonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clear => write!(f, "C"),
            Self::Backspace => write!(f, "⌫"),
            Self::Percent => write!(f, "%"),
            Self::SquareRoot => write!(f, "√"),
            Self::Evaluate => write!(f, "="),
            Self::ClearHistory => write!(f, "Clear History"),
            Self::Digit(d) => write!(f, "{d}"),
            Self::Operator(op) => write!(f, "{}", op.symbol()),
            Self::DecimalPoint => write!(f, "."),
        }
    }
}

/// A label that does not name any button
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown button '{label}'")]
pub struct ButtonParseError {
    /// The rejected label
    pub label: String,
}

impl FromStr for ButtonEvent {
    type Err = ButtonParseError;

    /// Accepts the keypad labels plus ASCII spellings for the symbols that
    /// are awkward to type (`bs`, `sqrt`, `ch`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        let mut chars = label.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if let Some(event) = ch.to_digit(10).and_then(|d| Self::digit(d as u8)) {
                return Ok(event);
            }
            if let Some(op) = Operation::from_symbol(ch) {
                return Ok(Self::Operator(op));
            }
        }

        match label.to_ascii_lowercase().as_str() {
            "c" => Ok(Self::Clear),
            "⌫" | "bs" | "backspace" => Ok(Self::Backspace),
            "%" => Ok(Self::Percent),
            "√" | "sqrt" => Ok(Self::SquareRoot),
            "=" => Ok(Self::Evaluate),
            "clear history" | "ch" => Ok(Self::ClearHistory),
            "." => Ok(Self::DecimalPoint),
            _ => Err(ButtonParseError {
                label: s.to_string(),
            }),
        }
    }
}

/// Calculator state: input text, result text and history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorSession {
    input: String,
    result: String,
    history: History,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorSession {
    /// Creates a session with empty input, result `"0"` and no history
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: String::new(),
            result: INITIAL_RESULT.to_string(),
            history: History::new(),
        }
    }

    /// Applies one button press. Never fails; bad input shows as `"Error"`.
    pub fn handle(&mut self, event: ButtonEvent) {
        debug!(%event, input = %self.input, result = %self.result, "button pressed");

        match event {
            ButtonEvent::Clear => {
                self.input.clear();
                self.result = INITIAL_RESULT.to_string();
            }
            ButtonEvent::Backspace => {
                self.input.pop();
            }
            ButtonEvent::Percent => self.apply_percent(),
            ButtonEvent::SquareRoot => self.apply_square_root(),
            ButtonEvent::Evaluate => self.evaluate_input(),
            ButtonEvent::ClearHistory => self.history.clear(),
            ButtonEvent::Digit(_) | ButtonEvent::Operator(_) | ButtonEvent::DecimalPoint => {
                match event.input_char() {
                    Some(ch) => self.input.push(ch),
                    None => warn!(%event, "ignoring digit outside 0-9"),
                }
            }
        }
    }

    /// Applies a sequence of button presses in order
    pub fn handle_all<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = ButtonEvent>,
    {
        for event in events {
            self.handle(event);
        }
    }

    /// The expression typed so far (may be empty)
    #[must_use]
    pub fn current_input(&self) -> &str {
        &self.input
    }

    /// The display result: `"0"`, a number, or `"Error"`
    #[must_use]
    pub fn current_result(&self) -> &str {
        &self.result
    }

    /// History entries, oldest first
    #[must_use]
    pub fn history_entries(&self) -> &[HistoryEntry] {
        self.history.as_slice()
    }

    /// The history log
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns true if the result shows a failure
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.result == ERROR_DISPLAY
    }

    /// Borrowed view of the whole state, for serialization
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            input: &self.input,
            result: &self.result,
            history: &self.history,
        }
    }

    fn evaluate_input(&mut self) {
        match evaluator::evaluate(&self.input) {
            Ok(value) => {
                self.result = format_number(value);
                self.history.record(&self.input, &self.result);
            }
            Err(err) => {
                warn!(input = %self.input, error = %err, "evaluation failed");
                self.result = ERROR_DISPLAY.to_string();
            }
        }
    }

    fn apply_percent(&mut self) {
        self.result = match parse_display(&self.result) {
            Some(value) => format_number(value / 100.0),
            None => ERROR_DISPLAY.to_string(),
        };
    }

    fn apply_square_root(&mut self) {
        let value = parse_display(&self.result).unwrap_or(0.0);
        self.result = if value < 0.0 {
            warn!(value, "square root of a negative number");
            ERROR_DISPLAY.to_string()
        } else {
            format_number(value.sqrt())
        };
    }
}

/// Serializable view of a [`CalculatorSession`]
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SessionSnapshot<'a> {
    /// Current input text
    pub input: &'a str,
    /// Current result text
    pub result: &'a str,
    /// History, oldest first
    pub history: &'a History,
}

/// Reads a result display back as a number; `"Error"` and non-finite text yield `None`
fn parse_display(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
