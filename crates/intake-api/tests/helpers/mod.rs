//! Test helpers: build AppState and router with in-memory backends.
//!
//! Run from workspace root: `cargo test -p intake-api`.

pub mod backends;

use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use intake_api::services::FolderLocks;
use intake_api::setup::routes;
use intake_api::state::AppState;
use intake_core::{Config, SheetsBackend, StorageBackend};

use self::backends::{MemoryFolderStore, MemoryRecordSink};

/// Test application: server plus handles on the fake backends.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<MemoryFolderStore>,
    pub sink: Arc<MemoryRecordSink>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn test_config() -> Config {
    Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        max_upload_size_bytes: 25 * 1024 * 1024,
        storage_backend: StorageBackend::Local,
        sheets_backend: SheetsBackend::Local,
        service_account_file: String::new(),
        drive_root_folder_id: "root".to_string(),
        spreadsheet_id: String::new(),
        sheet_name: "Transcripts".to_string(),
        local_storage_path: String::new(),
        local_storage_base_url: String::new(),
        local_sheet_path: String::new(),
    }
}

pub fn setup_test_app() -> TestApp {
    let storage = Arc::new(MemoryFolderStore::new());
    let sink = Arc::new(MemoryRecordSink::new());
    let state = Arc::new(AppState {
        config: test_config(),
        folder_store: storage.clone(),
        record_sink: sink.clone(),
        folder_locks: FolderLocks::new(),
    });
    let router = routes::build_router(state).expect("router");
    TestApp {
        server: TestServer::new(router).expect("test server"),
        storage,
        sink,
    }
}

/// All required text fields for the canonical test student, terms accepted.
pub fn required_text_fields(form: MultipartForm) -> MultipartForm {
    form.add_text("firstName", "Denise")
        .add_text("lastName", "Nelson")
        .add_text("studentType", "MSOHQ")
        .add_text("degreeLevel", "MBA")
        .add_text("gender", "F")
        .add_text("birthDate", "1990-04-12")
        .add_text("personalEmail", "denise.nelson@example.com")
        .add_text("nationalCountry", "US")
        .add_text("t1Country", "US")
        .add_text("termsConditions", "true")
}

pub fn pdf_part(data: &[u8], filename: &str) -> Part {
    Part::bytes(data.to_vec())
        .file_name(filename.to_string())
        .mime_type("application/pdf")
}

/// Complete valid submission: required fields plus nationalID and
/// transcript1 uploads.
pub fn complete_form() -> MultipartForm {
    required_text_fields(MultipartForm::new())
        .add_part("nationalID", pdf_part(b"%PDF-1.4 national id", "id.pdf"))
        .add_part(
            "transcript1",
            pdf_part(b"%PDF-1.4 transcript one", "t1.pdf"),
        )
}

/// Folder key derived from the canonical test student's fields.
pub const TEST_FOLDER_KEY: &str = "Nelson_Denise_MBA_MSOHQ";
