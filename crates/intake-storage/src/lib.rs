//! Folder-store abstraction and backends
//!
//! The submission pipeline talks to remote document storage through the
//! [`FolderStore`] trait. Two backends exist: Google Drive (production) and
//! the local filesystem (development and tests).

mod gdrive;
mod local;
mod traits;

pub use gdrive::GoogleDriveStore;
pub use local::LocalFolderStore;
pub use traits::{FolderStore, StorageError, StorageResult};
