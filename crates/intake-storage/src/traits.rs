//! Storage abstraction trait
//!
//! This module defines the FolderStore trait every storage backend must
//! implement. Identifiers are opaque backend strings: Drive file ids for the
//! Google backend, relative paths for the local one.

use async_trait::async_trait;
use bytes::Bytes;
use intake_core::AppError;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Folder lookup failed: {0}")]
    FindFailed(String),

    #[error("Folder create failed: {0}")]
    CreateFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Credential error: {0}")]
    Auth(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<intake_gauth::AuthError> for StorageError {
    fn from(err: intake_gauth::AuthError) -> Self {
        StorageError::Auth(err.to_string())
    }
}

/// Storage abstraction trait
///
/// Folders live directly under a fixed root container; files live inside
/// exactly one folder. Lookup-then-create and find-then-delete sequences are
/// not atomic here; callers own whatever serialization they need.
#[async_trait]
pub trait FolderStore: Send + Sync {
    /// Id of the non-trashed folder with this exact name under `parent_id`,
    /// if one exists.
    async fn find_folder(&self, name: &str, parent_id: &str) -> StorageResult<Option<String>>;

    /// Create a folder under `parent_id` and return its id.
    async fn create_folder(&self, name: &str, parent_id: &str) -> StorageResult<String>;

    /// Id of the non-trashed file with this exact name inside `folder_id`,
    /// if one exists.
    async fn find_child_file(&self, name: &str, folder_id: &str) -> StorageResult<Option<String>>;

    /// Delete a file by id.
    async fn delete_file(&self, file_id: &str) -> StorageResult<()>;

    /// Upload file bytes under `name` into `folder_id` and return the new
    /// object's id.
    async fn upload_file(
        &self,
        name: &str,
        content_type: &str,
        data: Bytes,
        folder_id: &str,
    ) -> StorageResult<String>;

    /// Publicly-viewable link for an uploaded object.
    fn public_link(&self, file_id: &str) -> String;

    /// Backend name for logs and the health endpoint.
    fn backend_name(&self) -> &'static str;
}
