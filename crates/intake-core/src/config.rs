//! Configuration module
//!
//! Environment-driven configuration for the intake service: HTTP server
//! settings, backend selection, and the Google Drive / Sheets destinations.

use std::env;

use anyhow::anyhow;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_MB: usize = 25;
const DEFAULT_SHEET_NAME: &str = "Transcripts";
const DEFAULT_SERVICE_ACCOUNT_FILE: &str = "service_account.json";
const DEFAULT_LOCAL_STORAGE_PATH: &str = "./data/documents";
const DEFAULT_LOCAL_STORAGE_BASE_URL: &str = "http://localhost:8080/files";
const DEFAULT_LOCAL_SHEET_PATH: &str = "./data/submissions.jsonl";

/// Document storage backend selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    GoogleDrive,
    Local,
}

impl StorageBackend {
    pub fn parse(value: &str) -> Result<Self, anyhow::Error> {
        match value.to_lowercase().as_str() {
            "gdrive" | "google-drive" | "drive" => Ok(StorageBackend::GoogleDrive),
            "local" => Ok(StorageBackend::Local),
            other => Err(anyhow!(
                "Unknown STORAGE_BACKEND '{}' (expected 'gdrive' or 'local')",
                other
            )),
        }
    }
}

/// Record sink backend selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetsBackend {
    GoogleSheets,
    Local,
}

impl SheetsBackend {
    pub fn parse(value: &str) -> Result<Self, anyhow::Error> {
        match value.to_lowercase().as_str() {
            "gsheets" | "google-sheets" | "sheets" => Ok(SheetsBackend::GoogleSheets),
            "local" => Ok(SheetsBackend::Local),
            other => Err(anyhow!(
                "Unknown SHEETS_BACKEND '{}' (expected 'gsheets' or 'local')",
                other
            )),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub max_upload_size_bytes: usize,
    pub storage_backend: StorageBackend,
    pub sheets_backend: SheetsBackend,
    /// Path to the Google service-account key file, loaded at startup.
    pub service_account_file: String,
    /// Fixed root container all per-student folders live under.
    pub drive_root_folder_id: String,
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub local_storage_path: String,
    pub local_storage_base_url: String,
    pub local_sheet_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_UPLOAD_MB);

        let storage_backend = StorageBackend::parse(
            &env::var("STORAGE_BACKEND").unwrap_or_else(|_| "gdrive".to_string()),
        )?;
        let sheets_backend = SheetsBackend::parse(
            &env::var("SHEETS_BACKEND").unwrap_or_else(|_| "gsheets".to_string()),
        )?;

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            storage_backend,
            sheets_backend,
            service_account_file: env::var("GOOGLE_SERVICE_ACCOUNT_FILE")
                .unwrap_or_else(|_| DEFAULT_SERVICE_ACCOUNT_FILE.to_string()),
            drive_root_folder_id: env::var("DRIVE_ROOT_FOLDER_ID").unwrap_or_default(),
            spreadsheet_id: env::var("SPREADSHEET_ID").unwrap_or_default(),
            sheet_name: env::var("SHEET_NAME").unwrap_or_else(|_| DEFAULT_SHEET_NAME.to_string()),
            local_storage_path: env::var("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|_| DEFAULT_LOCAL_STORAGE_PATH.to_string()),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_LOCAL_STORAGE_BASE_URL.to_string()),
            local_sheet_path: env::var("LOCAL_SHEET_PATH")
                .unwrap_or_else(|_| DEFAULT_LOCAL_SHEET_PATH.to_string()),
        };

        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Sheet range rows are appended to. Row 1 is the header row.
    pub fn sheet_range(&self) -> String {
        format!("{}!A2", self.sheet_name)
    }

    /// Fail fast on misconfiguration before any backend is constructed.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o.trim() == "*") {
            return Err(anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        if self.storage_backend == StorageBackend::GoogleDrive
            && self.drive_root_folder_id.is_empty()
        {
            return Err(anyhow!(
                "DRIVE_ROOT_FOLDER_ID must be set when STORAGE_BACKEND is 'gdrive'"
            ));
        }
        if self.sheets_backend == SheetsBackend::GoogleSheets && self.spreadsheet_id.is_empty() {
            return Err(anyhow!(
                "SPREADSHEET_ID must be set when SHEETS_BACKEND is 'gsheets'"
            ));
        }
        Ok(())
    }
}
