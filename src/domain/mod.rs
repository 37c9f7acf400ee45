pub mod models;
pub mod progress;

pub use models::{normalize_usn, MarkInput, MarksForm, MarksRow, Semester, SheetRow, StudentIdentity};
pub use progress::{IngestProgress, RowOutcome};
