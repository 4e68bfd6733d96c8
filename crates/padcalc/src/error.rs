//! Error types for the command line front end

use thiserror::Error;

use crate::core::CalcError;
use crate::session::ButtonParseError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error (terminal setup, log file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A `press` label that names no button
    #[error("Invalid button: {0}")]
    Button(#[from] ButtonParseError),

    /// An `eval` expression that did not evaluate
    #[error("Evaluation failed: {0}")]
    Evaluation(#[from] CalcError),

    /// JSON output could not be produced
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Logging could not be initialized
    #[error("Logging setup failed: {message}")]
    Logging {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create a logging setup error
    #[must_use]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}
