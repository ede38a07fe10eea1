//! POST /submit handler: multipart extraction and the submission pipeline.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use intake_core::models::{DocumentSlot, Submission, SubmissionLinks, UploadedFile};
use intake_core::AppError;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::SubmissionService;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitResponse {
    pub success: bool,
    pub links: SubmissionLinks,
}

#[utoipa::path(
    post,
    path = "/submit",
    tag = "submissions",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Documents stored and record appended", body = SubmitResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 500, description = "Storage or spreadsheet failure", body = ErrorResponse)
    )
)]
pub async fn submit(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<SubmitResponse>, HttpAppError> {
    let submission = read_submission(multipart).await?;
    let links = SubmissionService::new(&state).handle(submission).await?;
    Ok(Json(SubmitResponse {
        success: true,
        links,
    }))
}

/// Collect form fields and slot files from the multipart stream. File parts
/// under unknown names are ignored; file parts without a filename (an empty
/// file input) count as absent.
async fn read_submission(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match field.file_name().map(str::to_string) {
            Some(original_filename) => {
                if original_filename.is_empty() {
                    continue;
                }
                let Some(slot) = DocumentSlot::from_field_name(&name) else {
                    tracing::debug!(field = %name, "Ignoring file under unknown field");
                    continue;
                };
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;
                submission.files.insert(
                    slot,
                    UploadedFile {
                        data,
                        original_filename,
                        content_type,
                    },
                );
            }
            None => {
                let value = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read field value: {}", e))
                })?;
                submission.fields.insert(name, value);
            }
        }
    }

    Ok(submission)
}
