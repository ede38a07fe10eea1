//! Request-processing services.

mod folder_locks;
pub mod submission;

pub use folder_locks::FolderLocks;
pub use submission::SubmissionService;
