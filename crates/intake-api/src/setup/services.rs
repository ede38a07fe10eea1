//! Backend and state construction.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use intake_core::{Config, SheetsBackend, StorageBackend};
use intake_gauth::{TokenProvider, DRIVE_SCOPE, SHEETS_SCOPE};
use intake_sheets::{GoogleSheetsSink, JsonlRecordSink, RecordSink};
use intake_storage::{FolderStore, GoogleDriveStore, LocalFolderStore};

use crate::services::FolderLocks;
use crate::state::AppState;

/// Build the application state: one shared token provider (when any Google
/// backend is selected) plus the configured folder store and record sink.
pub async fn build_state(config: Config) -> Result<Arc<AppState>> {
    let tokens = if config.storage_backend == StorageBackend::GoogleDrive
        || config.sheets_backend == SheetsBackend::GoogleSheets
    {
        let provider =
            TokenProvider::from_key_file(&config.service_account_file, &[DRIVE_SCOPE, SHEETS_SCOPE])?;
        Some(Arc::new(provider))
    } else {
        None
    };

    let folder_store: Arc<dyn FolderStore> = match config.storage_backend {
        StorageBackend::GoogleDrive => {
            let tokens = tokens
                .clone()
                .ok_or_else(|| anyhow!("Google Drive backend requires credentials"))?;
            Arc::new(GoogleDriveStore::new(tokens))
        }
        StorageBackend::Local => Arc::new(
            LocalFolderStore::new(
                config.local_storage_path.clone(),
                config.local_storage_base_url.clone(),
            )
            .await?,
        ),
    };

    let record_sink: Arc<dyn RecordSink> = match config.sheets_backend {
        SheetsBackend::GoogleSheets => {
            let tokens = tokens
                .ok_or_else(|| anyhow!("Google Sheets backend requires credentials"))?;
            Arc::new(GoogleSheetsSink::new(
                tokens,
                config.spreadsheet_id.clone(),
                config.sheet_range(),
            ))
        }
        SheetsBackend::Local => Arc::new(JsonlRecordSink::new(config.local_sheet_path.clone())),
    };

    tracing::info!(
        storage = folder_store.backend_name(),
        sheets = record_sink.backend_name(),
        "Backends initialized"
    );

    Ok(Arc::new(AppState {
        config,
        folder_store,
        record_sink,
        folder_locks: FolderLocks::new(),
    }))
}
