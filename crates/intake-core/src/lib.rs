//! Intake Core Library
//!
//! This crate provides the domain models, validation rules, configuration,
//! and error types shared across all intake components.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, SheetsBackend, StorageBackend};
pub use error::{AppError, LogLevel};
