//! In-memory fake backends that record every call.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use intake_sheets::{RecordSink, SheetsError, SheetsResult};
use intake_storage::{FolderStore, StorageError, StorageResult};

#[derive(Debug, Clone)]
pub struct StoredFolder {
    pub id: String,
    pub name: String,
    pub parent_id: String,
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub id: String,
    pub folder_id: String,
    pub name: String,
    pub data: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
struct StoreInner {
    next_id: usize,
    folders: Vec<StoredFolder>,
    files: Vec<StoredFile>,
}

/// Fake folder store counting every remote-style call.
#[derive(Default)]
pub struct MemoryFolderStore {
    inner: Mutex<StoreInner>,
    calls: AtomicUsize,
    fail_uploads: AtomicBool,
}

impl MemoryFolderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent upload fail with a backend error.
    pub fn fail_uploads(&self) {
        self.fail_uploads.store(true, Ordering::SeqCst);
    }

    pub fn folder_count(&self, name: &str) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.folders.iter().filter(|f| f.name == name).count()
    }

    /// Files inside the named folder, in creation order.
    pub fn files_in(&self, folder_name: &str) -> Vec<StoredFile> {
        let inner = self.inner.lock().unwrap();
        let folder_ids: Vec<String> = inner
            .folders
            .iter()
            .filter(|f| f.name == folder_name)
            .map(|f| f.id.clone())
            .collect();
        inner
            .files
            .iter()
            .filter(|f| folder_ids.contains(&f.folder_id))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl FolderStore for MemoryFolderStore {
    async fn find_folder(&self, name: &str, parent_id: &str) -> StorageResult<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .folders
            .iter()
            .find(|f| f.name == name && f.parent_id == parent_id)
            .map(|f| f.id.clone()))
    }

    async fn create_folder(&self, name: &str, parent_id: &str) -> StorageResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = format!("folder-{}", inner.next_id);
        inner.folders.push(StoredFolder {
            id: id.clone(),
            name: name.to_string(),
            parent_id: parent_id.to_string(),
        });
        Ok(id)
    }

    async fn find_child_file(&self, name: &str, folder_id: &str) -> StorageResult<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .files
            .iter()
            .find(|f| f.name == name && f.folder_id == folder_id)
            .map(|f| f.id.clone()))
    }

    async fn delete_file(&self, file_id: &str) -> StorageResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.inner.lock().unwrap();
        let before = inner.files.len();
        inner.files.retain(|f| f.id != file_id);
        if inner.files.len() == before {
            return Err(StorageError::DeleteFailed(format!(
                "no such file: {}",
                file_id
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
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("injected upload failure".into()));
        }
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = format!("file-{}", inner.next_id);
        inner.files.push(StoredFile {
            id: id.clone(),
            folder_id: folder_id.to_string(),
            name: name.to_string(),
            data: data.to_vec(),
            content_type: content_type.to_string(),
        });
        Ok(id)
    }

    fn public_link(&self, file_id: &str) -> String {
        format!("https://files.test/{}/view", file_id)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Fake record sink capturing appended rows.
#[derive(Default)]
pub struct MemoryRecordSink {
    rows: Mutex<Vec<Vec<String>>>,
    calls: AtomicUsize,
    fail_appends: AtomicBool,
}

impl MemoryRecordSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_appends(&self) {
        self.fail_appends.store(true, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordSink for MemoryRecordSink {
    async fn append(&self, cells: &[String]) -> SheetsResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(SheetsError::AppendFailed("injected append failure".into()));
        }
        self.rows.lock().unwrap().push(cells.to_vec());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
