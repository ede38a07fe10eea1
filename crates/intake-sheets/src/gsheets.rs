//! Google Sheets v4 backend.
//!
//! Rows are appended with `values.append` using RAW input (cells are taken
//! verbatim, no formula parsing) and INSERT_ROWS so existing data below the
//! range is pushed down rather than overwritten.

use std::sync::Arc;

use async_trait::async_trait;
use intake_gauth::TokenProvider;
use serde_json::json;

use crate::traits::{RecordSink, SheetsError, SheetsResult};

const SPREADSHEETS_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

pub struct GoogleSheetsSink {
    client: reqwest::Client,
    tokens: Arc<TokenProvider>,
    spreadsheet_id: String,
    range: String,
}

impl GoogleSheetsSink {
    pub fn new(tokens: Arc<TokenProvider>, spreadsheet_id: String, range: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            tokens,
            spreadsheet_id,
            range,
        }
    }

    fn append_url(&self) -> String {
        format!(
            "{}/{}/values/{}:append",
            SPREADSHEETS_URL,
            self.spreadsheet_id,
            urlencoding::encode(&self.range)
        )
    }
}

#[async_trait]
impl RecordSink for GoogleSheetsSink {
    async fn append(&self, cells: &[String]) -> SheetsResult<()> {
        let token = self.tokens.bearer_token().await?;
        let response = self
            .client
            .post(self.append_url())
            .bearer_auth(token)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": [cells] }))
            .send()
            .await
            .map_err(|e| SheetsError::AppendFailed(format!("Sheets request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::AppendFailed(format!(
                "Sheets values.append {}: {}",
                status, body
            )));
        }

        tracing::debug!(range = %self.range, cells = cells.len(), "Appended row");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "google-sheets"
    }
}
