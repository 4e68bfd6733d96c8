//! padcalc - keypad calculator core with a terminal front end
//!
//! The crate is split the way the calculator is used:
//!
//! - [`core`]: tokenizer, recursive descent parser and evaluator for
//!   `+ - * /` expressions with the usual precedence, plus the history log
//! - [`session`]: the button-driven state machine (`input`, `result`,
//!   `history`) that turns every failure into the display text `"Error"`
//! - [`driver`]: scenario checks written once and run against any front end
//! - `tui` (feature `tui`): keypad widget, key mapping and layout
//!
//! # Example
//!
//! ```rust
//! use padcalc::prelude::*;
//!
//! assert_eq!(evaluate("2+3*4"), Ok(14.0));
//! assert_eq!(evaluate("5/0"), Err(CalcError::DivisionByZero));
//!
//! let mut session = CalculatorSession::new();
//! for label in ["1", "2", "+", "8", "="] {
//!     session.handle(label.parse().unwrap());
//! }
//! assert_eq!(session.current_result(), "20");
//! assert_eq!(session.history_entries()[0].display(), "12+8 = 20");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod cli;
pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod logging;
pub mod session;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::evaluator::{evaluate, evaluate_display, Evaluator};
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{format_number, CalcError, CalcResult, Operation, ERROR_DISPLAY};
    pub use crate::driver::CalculatorDriver;
    pub use crate::session::{ButtonEvent, ButtonParseError, CalculatorSession};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}
