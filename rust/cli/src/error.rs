//! Error types for the CLI application.

use neonmines_ai::AiError;
use neonmines_engine::errors::GameError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors a command handler can return; each maps to an exit code in [`crate::run`].
#[derive(Debug, Error)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid user input or command-line arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejected engine operation
    #[error("Engine error: {0}")]
    Engine(#[from] GameError),

    /// Run stopped before completing
    #[error("Interrupted: {0}")]
    Interrupted(String),
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<AiError> for CliError {
    fn from(e: AiError) -> Self {
        CliError::InvalidInput(e.to_string())
    }
}

/// An I/O error for `path` that keeps the path in its message.
pub(crate) fn read_failure(path: &str, e: std::io::Error) -> CliError {
    CliError::Io(std::io::Error::new(
        e.kind(),
        format!("failed to read {}: {}", path, e),
    ))
}
