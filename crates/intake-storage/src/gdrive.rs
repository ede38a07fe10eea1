//! Google Drive v3 backend.
//!
//! Folders are Drive files with the folder MIME type; lookups use
//! `files.list` queries, uploads use the multipart upload endpoint with a
//! `multipart/related` body (metadata part + media part).

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use intake_gauth::TokenProvider;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::traits::{FolderStore, StorageError, StorageResult};

const FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files";
const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileRef>,
}

#[derive(Debug, Deserialize)]
struct FileRef {
    id: String,
}

pub struct GoogleDriveStore {
    client: reqwest::Client,
    tokens: Arc<TokenProvider>,
}

impl GoogleDriveStore {
    pub fn new(tokens: Arc<TokenProvider>) -> Self {
        Self {
            client: reqwest::Client::new(),
            tokens,
        }
    }

    /// Escape a value embedded in a files.list query string. Drive queries
    /// delimit strings with single quotes and use backslash escapes.
    fn escape_query_value(value: &str) -> String {
        value.replace('\\', "\\\\").replace('\'', "\\'")
    }

    fn folder_query(name: &str, parent_id: &str) -> String {
        format!(
            "name='{}' and mimeType='{}' and '{}' in parents and trashed=false",
            Self::escape_query_value(name),
            FOLDER_MIME_TYPE,
            Self::escape_query_value(parent_id),
        )
    }

    fn child_file_query(name: &str, folder_id: &str) -> String {
        format!(
            "name='{}' and '{}' in parents and trashed=false",
            Self::escape_query_value(name),
            Self::escape_query_value(folder_id),
        )
    }

    /// `multipart/related` body for the Drive multipart upload endpoint:
    /// a JSON metadata part followed by the media part.
    fn multipart_related_body(
        metadata: &serde_json::Value,
        content_type: &str,
        data: &[u8],
        boundary: &str,
    ) -> Vec<u8> {
        let mut body = Vec::with_capacity(data.len() + 512);
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
        body.extend_from_slice(metadata.to_string().as_bytes());
        body.extend_from_slice(format!("\r\n--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
        body
    }

    /// Run a files.list query and return the first matching id.
    async fn first_match(&self, query: &str) -> Result<Option<String>, String> {
        let token = self
            .tokens
            .bearer_token()
            .await
            .map_err(|e| e.to_string())?;
        let response = self
            .client
            .get(FILES_URL)
            .bearer_auth(token)
            .query(&[("q", query), ("spaces", "drive"), ("fields", "files(id)")])
            .send()
            .await
            .map_err(|e| format!("Drive request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("Drive files.list {}: {}", status, body));
        }

        let list: FileList = response
            .json()
            .await
            .map_err(|e| format!("Invalid files.list response: {}", e))?;
        Ok(list.files.into_iter().next().map(|f| f.id))
    }
}

#[async_trait]
impl FolderStore for GoogleDriveStore {
    async fn find_folder(&self, name: &str, parent_id: &str) -> StorageResult<Option<String>> {
        self.first_match(&Self::folder_query(name, parent_id))
            .await
            .map_err(StorageError::FindFailed)
    }

    async fn create_folder(&self, name: &str, parent_id: &str) -> StorageResult<String> {
        let token = self.tokens.bearer_token().await?;
        let response = self
            .client
            .post(FILES_URL)
            .bearer_auth(token)
            .query(&[("supportsAllDrives", "true"), ("fields", "id")])
            .json(&json!({
                "name": name,
                "mimeType": FOLDER_MIME_TYPE,
                "parents": [parent_id],
            }))
            .send()
            .await
            .map_err(|e| StorageError::CreateFailed(format!("Drive request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::CreateFailed(format!(
                "Drive files.create {}: {}",
                status, body
            )));
        }

        let file: FileRef = response
            .json()
            .await
            .map_err(|e| StorageError::CreateFailed(format!("Invalid create response: {}", e)))?;
        Ok(file.id)
    }

    async fn find_child_file(&self, name: &str, folder_id: &str) -> StorageResult<Option<String>> {
        self.first_match(&Self::child_file_query(name, folder_id))
            .await
            .map_err(StorageError::FindFailed)
    }

    async fn delete_file(&self, file_id: &str) -> StorageResult<()> {
        let token = self.tokens.bearer_token().await?;
        let response = self
            .client
            .delete(format!("{}/{}", FILES_URL, file_id))
            .bearer_auth(token)
            .query(&[("supportsAllDrives", "true")])
            .send()
            .await
            .map_err(|e| StorageError::DeleteFailed(format!("Drive request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::DeleteFailed(format!(
                "Drive files.delete {}: {}",
                status, body
            )));
        }
        Ok(())
    }

    async fn upload_file(
        &self,
        name: &str,
        content_type: &str,
        data: Bytes,
        folder_id: &str,
    ) -> StorageResult<String> {
        let token = self.tokens.bearer_token().await?;
        let metadata = json!({ "name": name, "parents": [folder_id] });
        let boundary = format!("intake-{}", Uuid::new_v4());
        let body = Self::multipart_related_body(&metadata, content_type, &data, &boundary);

        let response = self
            .client
            .post(UPLOAD_URL)
            .bearer_auth(token)
            .query(&[
                ("uploadType", "multipart"),
                ("supportsAllDrives", "true"),
                ("fields", "id"),
            ])
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", boundary),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(format!("Drive request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::UploadFailed(format!(
                "Drive upload {}: {}",
                status, body
            )));
        }

        let file: FileRef = response
            .json()
            .await
            .map_err(|e| StorageError::UploadFailed(format!("Invalid upload response: {}", e)))?;
        tracing::debug!(file_id = %file.id, filename = %name, "Uploaded file to Drive");
        Ok(file.id)
    }

    fn public_link(&self, file_id: &str) -> String {
        // Viewable by anyone the parent folder is shared with.
        format!("https://drive.google.com/file/d/{}/view?usp=sharing", file_id)
    }

    fn backend_name(&self) -> &'static str {
        "google-drive"
    }
}
