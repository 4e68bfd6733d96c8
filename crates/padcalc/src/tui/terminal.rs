//! Terminal mode handling for the interactive calculator

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

/// Raw mode, alternate screen and mouse capture for as long as the guard lives
///
/// Dropping the guard restores the terminal, including when setup fails
/// halfway through.
#[derive(Debug)]
pub struct TerminalGuard<W: Write> {
    out: W,
    raw_mode: bool,
}

impl<W: Write> TerminalGuard<W> {
    /// Switches the terminal behind `out` into calculator mode
    pub fn enter(out: W) -> io::Result<Self> {
        Self::setup(out, true)
    }

    fn setup(out: W, raw_mode: bool) -> io::Result<Self> {
        if raw_mode {
            enable_raw_mode()?;
        }
        let mut guard = Self { out, raw_mode };
        execute!(guard.out, EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        );
        if self.raw_mode {
            let _ = disable_raw_mode();
        }
    }
}
