//! Submission pipeline
//!
//! Linear workflow per request: validate → resolve folder → upload each
//! present slot (replacing any file of the same name) → append the record
//! row. No rollback: a backend failure aborts the request and leaves prior
//! side effects in place.

use std::sync::Arc;

use chrono::Utc;
use intake_core::models::{
    target_filename, DocumentSlot, FolderKey, Submission, SubmissionLinks, SubmissionRecord,
    UploadedFile,
};
use intake_core::{validation, AppError};

use crate::state::AppState;

pub struct SubmissionService {
    state: Arc<AppState>,
}

impl SubmissionService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Process one submission and return the per-slot links.
    pub async fn handle(&self, submission: Submission) -> Result<SubmissionLinks, AppError> {
        validation::validate(&submission)?;

        let folder_key = FolderKey::derive(&submission.fields);
        // Held across resolution and uploads so identical keys in flight
        // cannot create duplicate folders within this process.
        let _guard = self.state.folder_locks.acquire(folder_key.as_str()).await;

        let folder_id = self.resolve_folder(&folder_key).await?;

        let mut links = SubmissionLinks::default();
        for slot in DocumentSlot::ALL {
            let Some(file) = submission.file(slot) else {
                continue;
            };
            let target = target_filename(
                &folder_key,
                slot,
                submission.filename_override(slot),
                &file.original_filename,
            );
            let url = self.upload_slot(slot, file, &target, &folder_id).await?;
            links.set(slot, url);
        }

        let record = SubmissionRecord::from_parts(&submission, &links, Utc::now());
        self.state.record_sink.append(record.cells()).await?;

        tracing::info!(folder_key = %folder_key, "Submission recorded");
        Ok(links)
    }

    /// Reuse the folder named by the key, creating it when absent.
    async fn resolve_folder(&self, key: &FolderKey) -> Result<String, AppError> {
        let store = &self.state.folder_store;
        let root = &self.state.config.drive_root_folder_id;

        if let Some(id) = store.find_folder(key.as_str(), root).await? {
            tracing::debug!(folder_key = %key, folder_id = %id, "Reusing existing folder");
            return Ok(id);
        }
        let id = store.create_folder(key.as_str(), root).await?;
        tracing::info!(folder_key = %key, folder_id = %id, "Created folder");
        Ok(id)
    }

    /// Upload one document, deleting any previous file of the same name
    /// first (last write wins, no versioning).
    async fn upload_slot(
        &self,
        slot: DocumentSlot,
        file: &UploadedFile,
        target: &str,
        folder_id: &str,
    ) -> Result<String, AppError> {
        let store = &self.state.folder_store;

        if let Some(existing) = store.find_child_file(target, folder_id).await? {
            tracing::debug!(filename = %target, file_id = %existing, "Replacing existing file");
            store.delete_file(&existing).await?;
        }

        let file_id = store
            .upload_file(target, &file.content_type, file.data.clone(), folder_id)
            .await?;
        tracing::info!(
            slot = %slot,
            filename = %target,
            file_id = %file_id,
            size = file.data.len(),
            "Uploaded document"
        );
        Ok(store.public_link(&file_id))
    }
}
