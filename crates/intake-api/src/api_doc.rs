//! OpenAPI document for the intake service.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Transcript Intake API",
        description = "Accepts student document submissions, stores them in \
                       per-student folders, and records each submission in a \
                       shared spreadsheet."
    ),
    paths(crate::handlers::submit::submit, crate::handlers::health::health),
    components(schemas(
        crate::handlers::submit::SubmitResponse,
        crate::handlers::health::HealthResponse,
        crate::error::ErrorResponse,
        intake_core::models::SubmissionLinks,
    )),
    tags(
        (name = "submissions", description = "Student document submission"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
