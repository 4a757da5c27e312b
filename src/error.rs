// src/error.rs
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ValidationError {
    #[error("Website cannot be empty")]
    MissingWebsite,
    #[error("Username cannot be empty")]
    MissingUsername,
    #[error("Password cannot be empty")]
    MissingPassword,
    #[error("Select a saved site")]
    NoSiteSelected,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("TUI error: {0}")]
    Tui(#[from] TuiError),
    #[error("CLI error: {0}")]
    Cli(String),
}

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String), // from serde_json
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

pub type AppResult<T> = Result<T, AppError>;
pub type StoreResult<T> = Result<T, StoreError>;
