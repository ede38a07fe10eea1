//! Local filesystem backend for development and tests.
//!
//! Folders are directories under a base path; identifiers are relative
//! paths. Links are served from a configured base URL.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;

use crate::traits::{FolderStore, StorageError, StorageResult};

#[derive(Clone)]
pub struct LocalFolderStore {
    base_path: PathBuf,
    base_url: String,
}

impl LocalFolderStore {
    /// Create the store, ensuring the base directory exists.
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::Config(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;
        Ok(LocalFolderStore {
            base_path,
            base_url,
        })
    }

    /// Resolve an identifier to a filesystem path, rejecting identifiers
    /// that could escape the base directory.
    fn id_to_path(&self, id: &str) -> StorageResult<PathBuf> {
        if id.contains("..") || id.starts_with('/') {
            return Err(StorageError::Config(format!(
                "Invalid storage identifier: {}",
                id
            )));
        }
        Ok(self.base_path.join(id))
    }

    fn join_id(parent: &str, name: &str) -> String {
        if parent.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", parent, name)
        }
    }

    async fn ensure_parent_dir(path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl FolderStore for LocalFolderStore {
    async fn find_folder(&self, name: &str, parent_id: &str) -> StorageResult<Option<String>> {
        let id = Self::join_id(parent_id, name);
        let path = self.id_to_path(&id)?;
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => Ok(Some(id)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::FindFailed(e.to_string())),
        }
    }

    async fn create_folder(&self, name: &str, parent_id: &str) -> StorageResult<String> {
        let id = Self::join_id(parent_id, name);
        let path = self.id_to_path(&id)?;
        fs::create_dir_all(&path)
            .await
            .map_err(|e| StorageError::CreateFailed(e.to_string()))?;
        Ok(id)
    }

    async fn find_child_file(&self, name: &str, folder_id: &str) -> StorageResult<Option<String>> {
        let id = Self::join_id(folder_id, name);
        let path = self.id_to_path(&id)?;
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(Some(id)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::FindFailed(e.to_string())),
        }
    }

    async fn delete_file(&self, file_id: &str) -> StorageResult<()> {
        let path = self.id_to_path(file_id)?;
        fs::remove_file(&path)
            .await
            .map_err(|e| StorageError::DeleteFailed(e.to_string()))
    }

    async fn upload_file(
        &self,
        name: &str,
        content_type: &str,
        data: Bytes,
        folder_id: &str,
    ) -> StorageResult<String> {
        let id = Self::join_id(folder_id, name);
        let path = self.id_to_path(&id)?;
        Self::ensure_parent_dir(&path).await?;
        fs::write(&path, &data)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        tracing::debug!(
            id = %id,
            content_type = %content_type,
            size = data.len(),
            "Stored file locally"
        );
        Ok(id)
    }

    fn public_link(&self, file_id: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), file_id)
    }

    fn backend_name(&self) -> &'static str {
        "local-fs"
    }
}
