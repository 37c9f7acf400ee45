pub mod entry;
pub mod ingestion;
pub mod reporting;
pub mod server;

pub use entry::{MarksEntryService, SubmitOutcome};
pub use ingestion::{IngestionReport, IngestionService};
pub use reporting::ReportingService;
pub use server::ServerService;
