//! Submission endpoint integration tests.
//!
//! Run with: `cargo test -p intake-api --test submit_test`

mod helpers;

use axum_test::multipart::MultipartForm;
use helpers::{
    complete_form, pdf_part, required_text_fields, setup_test_app, TEST_FOLDER_KEY,
};
use serde_json::Value;

#[tokio::test]
async fn missing_fields_return_400_and_touch_no_backend() {
    let app = setup_test_app();

    let form = MultipartForm::new()
        .add_text("firstName", "Denise")
        .add_text("termsConditions", "true");
    let res = app.client().post("/submit").multipart(form).await;

    assert_eq!(res.status_code(), 400);
    let body: Value = res.json();
    let error = body["error"].as_str().expect("error message");
    assert!(error.starts_with("Missing required fields: ["), "{error}");
    for name in [
        "lastName",
        "studentType",
        "degreeLevel",
        "gender",
        "birthDate",
        "personalEmail",
        "nationalCountry",
        "t1Country",
        "nationalID",
        "transcript1",
    ] {
        assert!(error.contains(name), "{error} should list {name}");
    }
    assert!(!error.contains("firstName"));

    assert_eq!(app.storage.call_count(), 0, "no storage calls on validation failure");
    assert_eq!(app.sink.call_count(), 0, "no sheet calls on validation failure");
}

#[tokio::test]
async fn terms_conditions_must_be_literally_true() {
    let app = setup_test_app();

    let form = required_text_fields(MultipartForm::new())
        .add_text("termsConditions", "TRUE")
        .add_part("nationalID", pdf_part(b"id", "id.pdf"))
        .add_part("transcript1", pdf_part(b"t1", "t1.pdf"));
    let res = app.client().post("/submit").multipart(form).await;

    assert_eq!(res.status_code(), 400);
    let body: Value = res.json();
    assert_eq!(
        body["error"].as_str(),
        Some("Missing required fields: [termsConditions]")
    );
    assert_eq!(app.storage.call_count(), 0);
}

#[tokio::test]
async fn complete_submission_uploads_and_records() {
    let app = setup_test_app();

    let res = app.client().post("/submit").multipart(complete_form()).await;
    assert_eq!(res.status_code(), 200);

    let body: Value = res.json();
    assert_eq!(body["success"], Value::Bool(true));
    let links = body["links"].as_object().expect("links object");
    assert_eq!(links.len(), 5);
    let national_id_link = links["nationalID"].as_str().unwrap();
    let transcript1_link = links["transcript1"].as_str().unwrap();
    assert!(national_id_link.starts_with("https://files.test/"));
    assert!(transcript1_link.starts_with("https://files.test/"));
    // Absent slots are empty strings, never missing keys.
    for slot in ["transcript2", "transcript3", "transcript4"] {
        assert_eq!(links[slot].as_str(), Some(""), "slot {slot}");
    }

    // Documents land in the derived folder under their fallback names.
    assert_eq!(app.storage.folder_count(TEST_FOLDER_KEY), 1);
    let files = app.storage.files_in(TEST_FOLDER_KEY);
    let mut names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec![
            "Nelson_Denise_MBA_MSOHQ-nationalID.pdf",
            "Nelson_Denise_MBA_MSOHQ-transcript1.pdf",
        ]
    );
    assert!(files.iter().all(|f| f.content_type == "application/pdf"));

    // Exactly one row, 22 cells, fixed layout, links mirrored.
    let rows = app.sink.rows();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.len(), 22);
    assert_eq!(row[0], "Denise");
    assert_eq!(row[1], ""); // middleName not supplied
    assert_eq!(row[2], "Nelson");
    assert_eq!(row[4], "MSOHQ");
    assert_eq!(row[5], "MBA");
    assert_eq!(row[10], national_id_link);
    assert_eq!(row[11], "US");
    assert_eq!(row[12], transcript1_link);
    assert_eq!(row[14], ""); // transcript2 link
    assert_eq!(row[20], "true");
    chrono::DateTime::parse_from_rfc3339(&row[21]).expect("timestamp cell is RFC 3339");
}

#[tokio::test]
async fn resubmission_reuses_the_folder_and_replaces_files() {
    let app = setup_test_app();

    let first = app.client().post("/submit").multipart(complete_form()).await;
    assert_eq!(first.status_code(), 200);

    let form = required_text_fields(MultipartForm::new())
        .add_part("nationalID", pdf_part(b"id v2", "id.pdf"))
        .add_part("transcript1", pdf_part(b"t1 v2", "t1.pdf"));
    let second = app.client().post("/submit").multipart(form).await;
    assert_eq!(second.status_code(), 200);

    // Same folder key routes into the same folder, no duplicate.
    assert_eq!(app.storage.folder_count(TEST_FOLDER_KEY), 1);

    // Old content was deleted, not duplicated: one file per name, latest bytes.
    let files = app.storage.files_in(TEST_FOLDER_KEY);
    assert_eq!(files.len(), 2);
    let transcript = files
        .iter()
        .find(|f| f.name == "Nelson_Denise_MBA_MSOHQ-transcript1.pdf")
        .expect("transcript file");
    assert_eq!(transcript.data, b"t1 v2");

    // Rows append per arrival, never update.
    assert_eq!(app.sink.rows().len(), 2);
}

#[tokio::test]
async fn caller_supplied_filename_overrides_fallback() {
    let app = setup_test_app();

    let form = required_text_fields(MultipartForm::new())
        .add_text("transcript1Filename", "Nelson_Denise_MBA_MSOHQ_ARM-T1")
        .add_part("nationalID", pdf_part(b"id", "id.pdf"))
        .add_part("transcript1", pdf_part(b"t1", "t1.pdf"));
    let res = app.client().post("/submit").multipart(form).await;
    assert_eq!(res.status_code(), 200);

    let files = app.storage.files_in(TEST_FOLDER_KEY);
    // Extension appended because the override has no dot.
    assert!(files
        .iter()
        .any(|f| f.name == "Nelson_Denise_MBA_MSOHQ_ARM-T1.pdf"));
}

#[tokio::test]
async fn required_document_accepted_as_form_field() {
    let app = setup_test_app();

    // nationalID arrives as a plain text field; only transcript1 is a file.
    let form = required_text_fields(MultipartForm::new())
        .add_text("nationalID", "AB123456")
        .add_part("transcript1", pdf_part(b"t1", "t1.pdf"));
    let res = app.client().post("/submit").multipart(form).await;
    assert_eq!(res.status_code(), 200);

    let body: Value = res.json();
    // No nationalID upload happened, so its link stays empty.
    assert_eq!(body["links"]["nationalID"].as_str(), Some(""));
    assert!(body["links"]["transcript1"].as_str().unwrap().starts_with("https://"));
    let row = &app.sink.rows()[0];
    assert_eq!(row[10], "");
}

#[tokio::test]
async fn upload_failure_returns_500_and_keeps_partial_state() {
    let app = setup_test_app();
    app.storage.fail_uploads();

    let res = app.client().post("/submit").multipart(complete_form()).await;
    assert_eq!(res.status_code(), 500);
    let body: Value = res.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("injected upload failure"));

    // The folder created before the failing upload is not rolled back.
    assert_eq!(app.storage.folder_count(TEST_FOLDER_KEY), 1);
    // No row is appended for a failed submission.
    assert_eq!(app.sink.rows().len(), 0);
}

#[tokio::test]
async fn sheet_failure_returns_500_after_uploads_succeeded() {
    let app = setup_test_app();
    app.sink.fail_appends();

    let res = app.client().post("/submit").multipart(complete_form()).await;
    assert_eq!(res.status_code(), 500);
    let body: Value = res.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("injected append failure"));

    // Uploads stay in place: the operation is not transactional.
    assert_eq!(app.storage.files_in(TEST_FOLDER_KEY).len(), 2);
}
