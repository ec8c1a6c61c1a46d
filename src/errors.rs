use apg_config::ConfigError;
use apg_core::ValidationFailure;
use apg_domain::FieldAccessError;
use apg_storage_json::StorageError;
use thiserror::Error;

use crate::clipboard::ClipboardError;

/// Error type shared by the session and its collaborators.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    #[error(transparent)]
    Field(#[from] FieldAccessError),
    #[error("Invalid input: {0}")]
    Input(String),
}

/// Errors that end the shell loop.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] AppError),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}
