//! Structured logging setup
//!
//! The TUI owns stdout/stderr, so while it runs logs only go to a file.
//! Other commands log to stderr unless a file is configured.

use std::fs::{File, OpenOptions};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt::MakeWriter, EnvFilter};

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// Standard error
    Stderr,
    /// Append to a file
    File(&'a Path),
    /// No subscriber installed
    Disabled,
}

impl<'a> LogTarget<'a> {
    /// Picks the target for a configuration; `interactive` is true while the TUI runs
    #[must_use]
    pub fn select(config: &'a AppConfig, interactive: bool) -> Self {
        match (&config.log_file, interactive) {
            (Some(path), _) => Self::File(path),
            (None, true) => Self::Disabled,
            (None, false) => Self::Stderr,
        }
    }

    /// Colour codes only on a stderr that is a terminal
    #[must_use]
    pub const fn use_ansi(self, stderr_is_terminal: bool) -> bool {
        matches!(self, Self::Stderr) && stderr_is_terminal
    }
}

/// `RUST_LOG` if set, otherwise the configured verbosity
#[must_use]
pub fn build_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.filter_directive()))
}

/// Builds a formatting subscriber over any writer
pub fn build_subscriber<W>(
    filter: EnvFilter,
    writer: W,
    ansi: bool,
) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .finish()
}

/// Opens (or creates) a log file for appending
pub fn open_log_file(path: &Path) -> CliResult<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Installs the global subscriber
pub fn init(config: &AppConfig, interactive: bool) -> CliResult<()> {
    let filter = build_filter(config);
    let target = LogTarget::select(config, interactive);
    let ansi = target.use_ansi(std::io::stderr().is_terminal());

    let result = match target {
        LogTarget::Disabled => return Ok(()),
        LogTarget::Stderr => {
            tracing::subscriber::set_global_default(build_subscriber(filter, std::io::stderr, ansi))
        }
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            tracing::subscriber::set_global_default(build_subscriber(filter, Mutex::new(file), ansi))
        }
    };

    result.map_err(|e| CliError::logging(e.to_string()))
}
