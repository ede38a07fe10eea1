//! Application state shared across handlers.

use std::sync::Arc;

use intake_core::Config;
use intake_sheets::RecordSink;
use intake_storage::FolderStore;

use crate::services::FolderLocks;

pub struct AppState {
    pub config: Config,
    pub folder_store: Arc<dyn FolderStore>,
    pub record_sink: Arc<dyn RecordSink>,
    /// Process-local serialization of folder resolution per folder key.
    pub folder_locks: FolderLocks,
}
