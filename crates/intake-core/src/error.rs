//! Error types module
//!
//! All failures surfaced by the intake pipeline converge on [`AppError`].
//! Only two kinds reach the caller: validation failures (client error,
//! detected before any remote call) and backend failures (server error,
//! raw message, possibly after partial side effects).

use thiserror::Error;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// One or more required submission fields were absent (or the terms
    /// checkbox was not literally "true"). Display renders the exact
    /// client-facing message.
    #[error("Missing required fields: [{}]", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Spreadsheet error: {0}")]
    Sheets(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code to return for this error
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::MissingFields(_) | AppError::InvalidInput(_) => 400,
            AppError::Credential(_)
            | AppError::Storage(_)
            | AppError::Sheets(_)
            | AppError::Internal(_) => 500,
        }
    }

    /// Error type name for structured logging
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MissingFields(_) => "MissingFields",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Credential(_) => "Credential",
            AppError::Storage(_) => "Storage",
            AppError::Sheets(_) => "Sheets",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Log level for this error. Validation failures are expected traffic
    /// and stay at debug; backend failures are logged as errors.
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::MissingFields(_) | AppError::InvalidInput(_) => LogLevel::Debug,
            _ => LogLevel::Error,
        }
    }
}
