//! Request-scoped submission model: identity fields, document slots, and the
//! deterministic folder/file naming rules.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;

/// The five fixed document categories accepted per submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentSlot {
    NationalId,
    Transcript1,
    Transcript2,
    Transcript3,
    Transcript4,
}

impl DocumentSlot {
    /// Slots in the fixed processing (and spreadsheet column) order.
    pub const ALL: [DocumentSlot; 5] = [
        DocumentSlot::NationalId,
        DocumentSlot::Transcript1,
        DocumentSlot::Transcript2,
        DocumentSlot::Transcript3,
        DocumentSlot::Transcript4,
    ];

    /// Multipart field name this slot's file arrives under.
    pub fn field_name(self) -> &'static str {
        match self {
            DocumentSlot::NationalId => "nationalID",
            DocumentSlot::Transcript1 => "transcript1",
            DocumentSlot::Transcript2 => "transcript2",
            DocumentSlot::Transcript3 => "transcript3",
            DocumentSlot::Transcript4 => "transcript4",
        }
    }

    /// Form field carrying the caller-supplied target filename override.
    pub fn filename_field(self) -> &'static str {
        match self {
            DocumentSlot::NationalId => "nationalIDFilename",
            DocumentSlot::Transcript1 => "transcript1Filename",
            DocumentSlot::Transcript2 => "transcript2Filename",
            DocumentSlot::Transcript3 => "transcript3Filename",
            DocumentSlot::Transcript4 => "transcript4Filename",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        DocumentSlot::ALL
            .into_iter()
            .find(|slot| slot.field_name() == name)
    }
}

impl fmt::Display for DocumentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// One uploaded document as received from the multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub data: Bytes,
    pub original_filename: String,
    pub content_type: String,
}

impl UploadedFile {
    /// Extension of the original filename, including the leading dot.
    /// Empty when the filename has none.
    pub fn extension(&self) -> &str {
        file_extension(&self.original_filename)
    }
}

/// Extension of `name` including the leading dot (`".pdf"`), or `""` when the
/// name has no extension. A lone leading dot (`".bashrc"`) does not count.
pub fn file_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[idx..],
        _ => "",
    }
}

/// An inbound submission: string fields plus up to five uploaded documents.
/// Exists only for the duration of one request.
#[derive(Debug, Default)]
pub struct Submission {
    pub fields: HashMap<String, String>,
    pub files: HashMap<DocumentSlot, UploadedFile>,
}

impl Submission {
    /// A field value, treating empty strings as absent.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn file(&self, slot: DocumentSlot) -> Option<&UploadedFile> {
        self.files.get(&slot)
    }

    /// Whether a required name is satisfied, either by a non-empty form field
    /// or by a file in the slot of the same name.
    pub fn satisfies(&self, name: &str) -> bool {
        if self.field(name).is_some() {
            return true;
        }
        DocumentSlot::from_field_name(name)
            .map(|slot| self.files.contains_key(&slot))
            .unwrap_or(false)
    }

    /// Caller-supplied target filename for a slot, if any.
    pub fn filename_override(&self, slot: DocumentSlot) -> Option<&str> {
        self.field(slot.filename_field())
    }
}

/// Deterministic name of a student's destination folder:
/// `lastName_firstName_degreeLevel_studentType` with spaces and slashes
/// replaced by underscores. Not unique across students sharing all four
/// fields; that collision risk is accepted by design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderKey(String);

impl FolderKey {
    pub fn derive(fields: &HashMap<String, String>) -> Self {
        let part = |name: &str, default: &str| {
            fields
                .get(name)
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };
        let joined = [
            part("lastName", "Unknown"),
            part("firstName", ""),
            part("degreeLevel", ""),
            part("studentType", ""),
        ]
        .join("_");
        FolderKey(joined.replace(' ', "_").replace('/', "_"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Target filename for one slot: the caller-supplied override when present,
/// otherwise the legacy `<folderKey>-<slot><ext>` fallback. Either way the
/// original file's extension is appended when the chosen name has no dot.
pub fn target_filename(
    folder_key: &FolderKey,
    slot: DocumentSlot,
    override_name: Option<&str>,
    original_filename: &str,
) -> String {
    let mut name = match override_name {
        Some(n) => n.to_string(),
        None => format!(
            "{}-{}{}",
            folder_key,
            slot,
            file_extension(original_filename)
        ),
    };
    if !name.contains('.') {
        name.push_str(file_extension(original_filename));
    }
    name
}
