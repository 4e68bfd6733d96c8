//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;

/// Title shown on the outer border
pub const TITLE: &str = " padcalc ";

/// One-line key help shown under the history
pub const HELP_LINE: &str = "Enter eval | Esc C | r √ | h hist | q quit";

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    frame.render_widget(CalculatorUI::new(app), frame.area());
}

/// Where the keypad lands for a given terminal size; used for mouse hit testing
#[must_use]
pub fn keypad_area(area: Rect) -> Rect {
    horizontal_layout(area)[1]
}

/// Main column + keypad column
fn horizontal_layout(area: Rect) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Min(24), Constraint::Length(30)])
        .split(area);
    [chunks[0], chunks[1]]
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    /// Input, result, history, help
    fn create_layout(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area)
            .to_vec()
    }

    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Span::styled(
            self.app.input_display(),
            Style::default().fg(Color::White),
        ))
        .block(
            Block::default()
                .title(" Input ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .render(area, buf);
    }

    fn render_result(&self, area: Rect, buf: &mut Buffer) {
        let session = self.app.session();
        let color = if session.is_error() {
            Color::Red
        } else {
            Color::Green
        };

        Paragraph::new(Span::styled(
            session.current_result(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .block(
            Block::default()
                .title(" Result ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .render(area, buf);
    }

    /// Newest entry at the bottom; scrolling moves the window towards older ones
    fn render_history(&self, area: Rect, buf: &mut Buffer) {
        let history = self.app.session().history();
        let visible = area.height.saturating_sub(2) as usize;
        let end = history.len().saturating_sub(self.app.history_scroll());
        let start = end.saturating_sub(visible);

        let items: Vec<ListItem> = history.as_slice()[start..end]
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(entry.input.as_str(), Style::default().fg(Color::Gray)),
                    Span::raw(" = "),
                    Span::styled(entry.result.as_str(), Style::default().fg(Color::Cyan)),
                ]))
            })
            .collect();

        let title = if self.app.history_scroll() > 0 {
            format!(" History ({} more below) ", self.app.history_scroll())
        } else {
            " History ".to_string()
        };

        List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .render(area, buf);
    }

    fn render_help(area: Rect, buf: &mut Buffer) {
        Paragraph::new(Span::styled(HELP_LINE, Style::default().fg(Color::DarkGray)))
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let [main_area, keypad_area] = horizontal_layout(area);
        let chunks = Self::create_layout(main_area);

        self.render_input(chunks[0], buf);
        self.render_result(chunks[1], buf);
        self.render_history(chunks[2], buf);
        Self::render_help(chunks[3], buf);

        KeypadWidget::new(self.app.keypad()).render(keypad_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ButtonEvent;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn type_keys(app: &mut CalculatorApp, keys: &str) {
        for ch in keys.chars() {
            app.press(ch.to_string().parse().unwrap());
        }
    }

    fn rendered(app: &CalculatorApp) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
    }

    fn content(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_create_layout() {
        let chunks = CalculatorUI::create_layout(Rect::new(0, 0, 48, 22));
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].height, 3);
        assert_eq!(chunks[3].height, 1);
    }

    #[test]
    fn test_render_initial_state() {
        let app = CalculatorApp::new();
        let text = content(&rendered(&app));
        assert!(text.contains("padcalc"));
        assert!(text.contains(" Input "));
        assert!(text.contains(" Result "));
        assert!(text.contains(" History "));
        assert!(text.contains("[Clear History]"));
        assert!(text.contains("q quit"));
    }

    #[test]
    fn test_render_input_and_result() {
        let mut app = CalculatorApp::new();
        type_keys(&mut app, "12+8");
        assert!(content(&rendered(&app)).contains("12+8"));

        type_keys(&mut app, "=");
        let text = content(&rendered(&app));
        assert!(text.contains("12+8 = 20"));
    }

    #[test]
    fn test_render_error_in_red() {
        let mut app = CalculatorApp::new();
        type_keys(&mut app, "5/0=");
        let terminal = rendered(&app);
        assert!(content(&terminal).contains("Error"));

        let buffer = terminal.backend().buffer();
        let cell = buffer
            .content()
            .iter()
            .find(|c| c.symbol() == "E" && c.fg == Color::Red)
            .map(|c| c.modifier);
        assert_eq!(cell, Some(Modifier::BOLD));
    }

    #[test]
    fn test_render_history_scrolled() {
        let mut app = CalculatorApp::new();
        for keys in ["C1+1=", "C2+2=", "C3+3="] {
            type_keys(&mut app, keys);
        }
        app.scroll_history_up(1);
        let text = content(&rendered(&app));
        assert!(text.contains("2+2 = 4"));
        assert!(!text.contains("3+3 = 6"));
        assert!(text.contains("1 more below"));
    }

    #[test]
    fn test_render_highlighted_button() {
        let mut app = CalculatorApp::new();
        app.press(ButtonEvent::SquareRoot);
        let terminal = rendered(&app);
        let highlighted = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .any(|c| c.symbol() == "√" && c.bg == Color::Yellow);
        assert!(highlighted);
    }

    #[test]
    fn test_keypad_area_matches_render() {
        let mut app = CalculatorApp::new();
        let area = keypad_area(Rect::new(0, 0, 80, 24));
        assert_eq!(area.width, 30);
        // First cell of the grid is "C"
        app.click(area, area.x + 1, area.y + 1);
        assert_eq!(app.last_pressed(), Some(ButtonEvent::Clear));
    }

    #[test]
    fn test_render_small_terminal_does_not_panic() {
        let app = CalculatorApp::new();
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();
    }
}
