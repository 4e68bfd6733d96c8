//! Unified calculator driver
//!
//! Scenario checks are written once against [`CalculatorDriver`] and run
//! against both the bare [`CalculatorSession`] and the terminal application.

use crate::core::history::HistoryEntry;
use crate::session::{ButtonEvent, ButtonParseError, CalculatorSession};

/// Anything that can be operated by pressing calculator buttons
///
/// # Example
///
/// ```rust
/// use padcalc::driver::{verify_basic_arithmetic, CalculatorDriver};
/// use padcalc::session::CalculatorSession;
///
/// let mut session = CalculatorSession::new();
/// verify_basic_arithmetic(&mut session).unwrap();
/// ```
pub trait CalculatorDriver {
    /// Presses a single button
    fn press(&mut self, event: ButtonEvent);

    /// Current input text
    fn input(&self) -> String;

    /// Current result text
    fn result(&self) -> String;

    /// History entries, oldest first
    fn history(&self) -> Vec<HistoryEntry>;

    /// Presses several buttons in order
    fn press_all(&mut self, events: &[ButtonEvent]) {
        for event in events {
            self.press(*event);
        }
    }

    /// Presses one button per character of `keys` (e.g. `"12+8="`)
    fn type_keys(&mut self, keys: &str) -> Result<(), ButtonParseError> {
        for ch in keys.chars() {
            let mut buf = [0u8; 4];
            self.press(ch.encode_utf8(&mut buf).parse()?);
        }
        Ok(())
    }
}

impl CalculatorDriver for CalculatorSession {
    fn press(&mut self, event: ButtonEvent) {
        self.handle(event);
    }

    fn input(&self) -> String {
        self.current_input().to_string()
    }

    fn result(&self) -> String {
        self.current_result().to_string()
    }

    fn history(&self) -> Vec<HistoryEntry> {
        self.history_entries().to_vec()
    }
}

/// TUI driver
#[cfg(feature = "tui")]
pub mod tui_driver {
    use super::{ButtonEvent, CalculatorDriver, HistoryEntry};
    use crate::tui::CalculatorApp;

    /// Drives the terminal application through its button handling
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, event: ButtonEvent) {
            self.app.press(event);
        }

        fn input(&self) -> String {
            self.app.session().current_input().to_string()
        }

        fn result(&self) -> String {
            self.app.session().current_result().to_string()
        }

        fn history(&self) -> Vec<HistoryEntry> {
            self.app.session().history_entries().to_vec()
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified scenario checks =====
// These work with ANY CalculatorDriver implementation

/// Verifies the four operators on a cleared calculator
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) -> Result<(), ButtonParseError> {
    for (keys, expected) in [("C2+3=", "5"), ("C10-4=", "6"), ("C6*7=", "42"), ("C20/4=", "5")] {
        driver.type_keys(keys)?;
        assert_eq!(driver.result(), expected, "after {keys}");
    }
    driver.type_keys("C4+4=")?;
    assert_eq!(driver.result(), "8");
    driver.type_keys("C5/2=")?;
    assert_eq!(driver.result(), "2.5");
    Ok(())
}

/// Verifies that `*` and `/` bind tighter and equal precedence groups left
pub fn verify_precedence<D: CalculatorDriver>(driver: &mut D) -> Result<(), ButtonParseError> {
    driver.type_keys("C2+3*4=")?;
    assert_eq!(driver.result(), "14");
    driver.type_keys("C8-4-2=")?;
    assert_eq!(driver.result(), "2");
    driver.type_keys("C8/4/2=")?;
    assert_eq!(driver.result(), "1");
    Ok(())
}

/// Verifies that failures show `Error` and leave the history alone
pub fn verify_error_handling<D: CalculatorDriver>(driver: &mut D) -> Result<(), ButtonParseError> {
    let before = driver.history().len();

    for keys in ["C5/0=", "C=", "C9-=", "C1++2="] {
        driver.type_keys(keys)?;
        assert_eq!(driver.result(), "Error", "after {keys}");
    }

    assert_eq!(driver.history().len(), before);
    Ok(())
}

/// Verifies the `12+8` scenario and the history it records
pub fn verify_history<D: CalculatorDriver>(driver: &mut D) -> Result<(), ButtonParseError> {
    driver.press(ButtonEvent::ClearHistory);
    driver.type_keys("C12+8=")?;
    assert_eq!(driver.result(), "20");
    driver.type_keys("C3*3=")?;

    let history = driver.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0], HistoryEntry::new("12+8", "20"));
    assert_eq!(history[1], HistoryEntry::new("3*3", "9"));

    driver.press(ButtonEvent::ClearHistory);
    assert!(driver.history().is_empty());
    Ok(())
}

/// Verifies Clear, Backspace, percent and square root
pub fn verify_editing<D: CalculatorDriver>(driver: &mut D) -> Result<(), ButtonParseError> {
    driver.type_keys("C")?;
    driver.press(ButtonEvent::Backspace);
    assert_eq!(driver.input(), "");

    driver.type_keys("123")?;
    driver.press(ButtonEvent::Backspace);
    assert_eq!(driver.input(), "12");

    driver.type_keys("*5=%")?;
    assert_eq!(driver.result(), "0.6");

    driver.type_keys("C81=")?;
    driver.press(ButtonEvent::SquareRoot);
    assert_eq!(driver.result(), "9");

    driver.type_keys("C0-9=")?;
    driver.press(ButtonEvent::SquareRoot);
    assert_eq!(driver.result(), "Error");

    driver.type_keys("CC")?;
    assert_eq!(driver.input(), "");
    assert_eq!(driver.result(), "0");
    Ok(())
}

/// Runs every scenario check
pub fn run_all_scenarios<D: CalculatorDriver>(driver: &mut D) -> Result<(), ButtonParseError> {
    verify_basic_arithmetic(driver)?;
    verify_precedence(driver)?;
    verify_error_handling(driver)?;
    verify_history(driver)?;
    verify_editing(driver)
}
