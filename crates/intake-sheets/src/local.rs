//! Local JSON-lines backend for development and tests.
//!
//! Each appended row becomes one JSON array per line, preserving arrival
//! order the same way the sheet does.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::traits::{RecordSink, SheetsError, SheetsResult};

pub struct JsonlRecordSink {
    path: PathBuf,
}

impl JsonlRecordSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSink for JsonlRecordSink {
    async fn append(&self, cells: &[String]) -> SheetsResult<()> {
        let mut line = serde_json::to_string(cells)
            .map_err(|e| SheetsError::Backend(format!("Failed to serialize row: {}", e)))?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "local-jsonl"
    }
}
