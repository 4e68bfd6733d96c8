//! Terminal front end: keypad, key mapping and layout

mod app;
mod input;
mod keypad;
mod terminal;
mod ui;

pub use app::{CalculatorApp, HISTORY_PAGE};
pub use input::{InputHandler, KeyAction};
pub use keypad::{ButtonKind, Keypad, KeypadButton, KeypadWidget};
pub use terminal::TerminalGuard;
pub use ui::{keypad_area, render, CalculatorUI};
