//! Per-folder-key locks around the non-atomic lookup-then-create sequence.
//!
//! Serializes folder resolution within this process only; separate
//! instances sharing one Drive root can still race and create duplicate
//! folders. Entries are never evicted: key cardinality is bounded by the
//! number of distinct students seen by this process.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub struct FolderLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl FolderLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the lock for one folder key, creating it on first use. The
    /// returned guard is held for the duration of folder resolution and
    /// the uploads into that folder.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
