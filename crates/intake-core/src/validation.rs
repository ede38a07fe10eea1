//! Submission validation: the fixed required-field set and the terms check.
//!
//! Validation runs before any remote call; a failure means zero backend
//! side effects.

use crate::error::AppError;
use crate::models::Submission;

/// Names that must be present as a non-empty form field or a file slot.
pub const REQUIRED_FIELDS: [&str; 11] = [
    "firstName",
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
];

/// Must literally equal "true"; any other value counts as missing.
pub const TERMS_FIELD: &str = "termsConditions";

/// Names of every required item the submission fails to satisfy, in the
/// fixed required-field order with the terms check last.
pub fn missing_fields(submission: &Submission) -> Vec<String> {
    let mut missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|name| !submission.satisfies(name))
        .map(|name| name.to_string())
        .collect();
    if submission.field(TERMS_FIELD) != Some("true") {
        missing.push(TERMS_FIELD.to_string());
    }
    missing
}

pub fn validate(submission: &Submission) -> Result<(), AppError> {
    let missing = missing_fields(submission);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::MissingFields(missing))
    }
}
