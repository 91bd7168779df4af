//! Error types for the checkout CLI.

use std::path::PathBuf;

use checkout_core::CheckoutError;

/// Everything that can stop the CLI.
///
/// Checkout errors are the caller's fault (bad request) and map to exit
/// status 1; the rest are environment problems and map to 2.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Checkout(#[from] CheckoutError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Usage: {0}")]
    Usage(String),
}

impl AppError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Checkout(_) => 1,
            _ => 2,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
