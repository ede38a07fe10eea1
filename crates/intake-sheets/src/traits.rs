//! Record-sink abstraction trait

use async_trait::async_trait;
use intake_core::AppError;
use thiserror::Error;

/// Record sink operation errors
#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("Append failed: {0}")]
    AppendFailed(String),

    #[error("Credential error: {0}")]
    Auth(String),

    #[error("Sheets backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for record-sink operations
pub type SheetsResult<T> = Result<T, SheetsError>;

impl From<SheetsError> for AppError {
    fn from(err: SheetsError) -> Self {
        AppError::Sheets(err.to_string())
    }
}

impl From<intake_gauth::AuthError> for SheetsError {
    fn from(err: intake_gauth::AuthError) -> Self {
        SheetsError::Auth(err.to_string())
    }
}

/// Append-only sink for submission records. Rows are never updated or
/// reordered; insertion order is arrival order.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Append one row of string cells.
    async fn append(&self, cells: &[String]) -> SheetsResult<()>;

    /// Backend name for logs and the health endpoint.
    fn backend_name(&self) -> &'static str;
}
