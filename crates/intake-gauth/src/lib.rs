//! Google service-account credentials and access tokens
//!
//! Loads a service-account key file, signs an RS256 JWT grant scoped to the
//! Drive and Sheets APIs, and exchanges it for a bearer token. Tokens are
//! cached until shortly before expiry so concurrent requests share one grant.

mod credentials;
mod token;

pub use credentials::{ServiceAccountKey, DRIVE_SCOPE, SHEETS_SCOPE};
pub use token::TokenProvider;

use intake_core::AppError;
use thiserror::Error;

/// Credential and token-exchange errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to read service account key {path}: {source}")]
    KeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed service account key: {0}")]
    KeyParse(String),

    #[error("Failed to sign token grant: {0}")]
    Sign(String),

    #[error("Token exchange failed: {0}")]
    Exchange(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Credential(err.to_string())
    }
}
