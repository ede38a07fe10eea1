//! Record-sink abstraction and backends
//!
//! The submission pipeline appends one row per accepted submission through
//! the [`RecordSink`] trait. Two backends exist: Google Sheets (production)
//! and a local JSON-lines file (development and tests).

mod gsheets;
mod local;
mod traits;

pub use gsheets::GoogleSheetsSink;
pub use local::JsonlRecordSink;
pub use traits::{RecordSink, SheetsError, SheetsResult};
