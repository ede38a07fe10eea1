//! Spreadsheet record model: the per-slot link set and the fixed 22-column
//! row appended for every accepted submission.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{DocumentSlot, Submission};

/// Public links for the five document slots. Slots absent from the
/// submission keep an empty string so the response and row layout stay
/// positionally stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmissionLinks {
    #[serde(rename = "nationalID")]
    pub national_id: String,
    pub transcript1: String,
    pub transcript2: String,
    pub transcript3: String,
    pub transcript4: String,
}

impl SubmissionLinks {
    pub fn set(&mut self, slot: DocumentSlot, url: String) {
        *self.slot_mut(slot) = url;
    }

    pub fn get(&self, slot: DocumentSlot) -> &str {
        match slot {
            DocumentSlot::NationalId => &self.national_id,
            DocumentSlot::Transcript1 => &self.transcript1,
            DocumentSlot::Transcript2 => &self.transcript2,
            DocumentSlot::Transcript3 => &self.transcript3,
            DocumentSlot::Transcript4 => &self.transcript4,
        }
    }

    fn slot_mut(&mut self, slot: DocumentSlot) -> &mut String {
        match slot {
            DocumentSlot::NationalId => &mut self.national_id,
            DocumentSlot::Transcript1 => &mut self.transcript1,
            DocumentSlot::Transcript2 => &mut self.transcript2,
            DocumentSlot::Transcript3 => &mut self.transcript3,
            DocumentSlot::Transcript4 => &mut self.transcript4,
        }
    }
}

/// Number of cells in every appended row.
pub const RECORD_COLUMNS: usize = 22;

/// One appended spreadsheet row. Cell order is fixed; missing optional
/// fields serialize as empty strings so column alignment never shifts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord(Vec<String>);

impl SubmissionRecord {
    pub fn from_parts(
        submission: &Submission,
        links: &SubmissionLinks,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let field = |name: &str| submission.fields.get(name).cloned().unwrap_or_default();
        let cells = vec![
            field("firstName"),
            field("middleName"),
            field("lastName"),
            field("additionalName"),
            field("studentType"),
            field("degreeLevel"),
            field("gender"),
            field("birthDate"),
            field("personalEmail"),
            field("notes"),
            links.national_id.clone(),
            field("nationalCountry"),
            links.transcript1.clone(),
            field("t1Country"),
            links.transcript2.clone(),
            field("t2Country"),
            links.transcript3.clone(),
            field("t3Country"),
            links.transcript4.clone(),
            field("t4Country"),
            field("termsConditions"),
            submitted_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        ];
        debug_assert_eq!(cells.len(), RECORD_COLUMNS);
        SubmissionRecord(cells)
    }

    pub fn cells(&self) -> &[String] {
        &self.0
    }

    pub fn into_cells(self) -> Vec<String> {
        self.0
    }
}
