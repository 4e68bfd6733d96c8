//! On-screen keypad
//!
//! Mirrors the button grid of the phone layout plus a full-width
//! "Clear History" button underneath. Buttons can be clicked with the mouse
//! and the last pressed one is highlighted.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::core::Operation;
use crate::session::ButtonEvent;

/// Colour group of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// `C`, `⌫` and `=`
    Control,
    /// `+ - * /`
    Operator,
    /// Digits, `.`, `%`, `√` and Clear History
    Standard,
}

impl ButtonKind {
    /// Classifies a button event
    #[must_use]
    pub const fn of(event: ButtonEvent) -> Self {
        match event {
            ButtonEvent::Clear | ButtonEvent::Backspace | ButtonEvent::Evaluate => Self::Control,
            ButtonEvent::Operator(_) => Self::Operator,
            _ => Self::Standard,
        }
    }

    /// Foreground colour of an idle button
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Control => Color::Red,
            Self::Operator => Color::Green,
            Self::Standard => Color::Gray,
        }
    }
}

/// Narrowest cell that still shows `[x]`
const MIN_CELL_WIDTH: u16 = 3;

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The event this button sends
    pub event: ButtonEvent,
    /// Whether the button is currently highlighted
    pub pressed: bool,
}

impl KeypadButton {
    /// Creates an idle button
    #[must_use]
    pub const fn new(event: ButtonEvent) -> Self {
        Self {
            event,
            pressed: false,
        }
    }

    /// Text shown on the button
    #[must_use]
    pub fn label(&self) -> String {
        self.event.label()
    }

    /// Colour group of the button
    #[must_use]
    pub const fn kind(&self) -> ButtonKind {
        ButtonKind::of(self.event)
    }

    /// Sets the pressed state
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }
}

/// The keypad layout
/// ```text
/// [ C ] [ ⌫ ] [ % ] [ √ ]
/// [ 7 ] [ 8 ] [ 9 ] [ / ]
/// [ 4 ] [ 5 ] [ 6 ] [ * ]
/// [ 1 ] [ 2 ] [ 3 ] [ - ]
/// [ 0 ] [ = ] [ . ] [ + ]
/// [    Clear History    ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Grid buttons in row-major order, then the Clear History button
    buttons: Vec<KeypadButton>,
    cols: usize,
    grid_rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard calculator keypad
    #[must_use]
    pub fn new() -> Self {
        use ButtonEvent::{Backspace, Clear, ClearHistory, DecimalPoint, Digit, Evaluate, Percent, SquareRoot};
        use Operation::{Add, Divide, Multiply, Subtract};

        let events = [
            Clear,
            Backspace,
            Percent,
            SquareRoot,
            Digit(7),
            Digit(8),
            Digit(9),
            ButtonEvent::Operator(Divide),
            Digit(4),
            Digit(5),
            Digit(6),
            ButtonEvent::Operator(Multiply),
            Digit(1),
            Digit(2),
            Digit(3),
            ButtonEvent::Operator(Subtract),
            Digit(0),
            Evaluate,
            DecimalPoint,
            ButtonEvent::Operator(Add),
            ClearHistory,
        ];

        Self {
            buttons: events.into_iter().map(KeypadButton::new).collect(),
            cols: 4,
            grid_rows: 5,
        }
    }

    /// Total rendered rows, Clear History included
    fn total_rows(&self) -> usize {
        self.grid_rows + 1
    }

    fn grid_len(&self) -> usize {
        self.grid_rows * self.cols
    }

    /// Cell size (width, height) for the area inside the border, or `None`
    /// when the buttons would not fit
    fn cell_size(&self, inner: Rect) -> Option<(u16, u16)> {
        let rows = self.total_rows() as u16;
        let width = inner.width / self.cols as u16;
        if width < MIN_CELL_WIDTH || inner.height < rows {
            return None;
        }
        Some((width, inner.height / rows))
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Finds the button that sends `event`
    #[must_use]
    pub fn find_button(&self, event: ButtonEvent) -> Option<usize> {
        self.buttons.iter().position(|b| b.event == event)
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.set_pressed(false);
        }
    }

    /// Highlights the button for `event`, releasing every other one
    pub fn highlight(&mut self, event: ButtonEvent) {
        self.release_all();
        if let Some(btn) = self
            .find_button(event)
            .and_then(|idx| self.buttons.get_mut(idx))
        {
            btn.set_pressed(true);
        }
    }

    /// The currently highlighted button, if any
    #[must_use]
    pub fn pressed(&self) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.pressed)
    }

    /// Returns an iterator over all buttons
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Returns an iterator over the grid buttons with their (row, col) positions
    pub fn buttons_with_positions(&self) -> impl Iterator<Item = ((usize, usize), &KeypadButton)> {
        self.buttons
            .iter()
            .take(self.grid_len())
            .enumerate()
            .map(move |(i, btn)| ((i / self.cols, i % self.cols), btn))
    }

    /// Converts a click position inside the bordered `area` to a button index
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // Border
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let inner_x = rel_x - 1;
        let inner_y = rel_y - 1;

        let (btn_width, btn_height) = self.cell_size(inner_area(area))?;

        let col = (inner_x / btn_width) as usize;
        let row = (inner_y / btn_height) as usize;

        if row == self.grid_rows {
            Some(self.grid_len())
        } else if row < self.grid_rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    /// Like [`Self::hit_test`] but returns the button's event
    #[must_use]
    pub fn event_at(&self, area: Rect, x: u16, y: u16) -> Option<ButtonEvent> {
        self.hit_test(area, x, y)
            .and_then(|idx| self.get_button(idx))
            .map(|btn| btn.event)
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self { keypad }
    }
}

fn inner_area(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

fn button_style(btn: &KeypadButton) -> Style {
    if btn.pressed {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(btn.kind().color())
    }
}

/// Writes `[label]` centred in a cell that starts at `x` and is `width` wide
fn render_label(buf: &mut Buffer, x: u16, y: u16, width: u16, btn: &KeypadButton) {
    let label = format!("[{}]", btn.label());
    let label_width = label.chars().count() as u16;
    let label_x = x + width.saturating_sub(label_width) / 2;
    buf.set_span(label_x, y, &Span::styled(label, button_style(btn)), width);
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let inner = inner_area(area);
        let Some((btn_width, btn_height)) = self.keypad.cell_size(inner) else {
            return; // Too small to render
        };

        for ((row, col), btn) in self.keypad.buttons_with_positions() {
            let x = inner.x + (col as u16 * btn_width);
            let y = inner.y + (row as u16 * btn_height) + btn_height / 2;
            render_label(buf, x, y, btn_width, btn);
        }

        if let Some(btn) = self.keypad.get_button(self.keypad.grid_len()) {
            let y = inner.y + (self.keypad.grid_rows as u16 * btn_height) + btn_height / 2;
            render_label(buf, inner.x, y, inner.width, btn);
        }
    }
}
