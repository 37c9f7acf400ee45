use crate::api::error::ApiError;
use crate::config::AppConfig;
use crate::database::SemesterStores;
use crate::domain::Semester;
use crate::grading::WeightingScheme;
use crate::services::entry::MarksEntryService;
use crate::services::ingestion::IngestionService;
use crate::services::reporting::ReportingService;

pub mod semesters;
pub mod students;
pub mod subjects;
pub mod toppers;

pub struct AppState {
    pub stores: SemesterStores,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(stores: SemesterStores, config: AppConfig) -> Self {
        Self { stores, config }
    }

    pub fn reporting(&self) -> ReportingService {
        ReportingService::new(self.stores.clone(), self.config.grading.clone())
    }

    pub fn entry(&self) -> MarksEntryService {
        MarksEntryService::new(self.stores.clone(), self.config.grading.weighting_scheme)
    }

    pub fn ingestion(&self, scheme: WeightingScheme) -> IngestionService {
        IngestionService::new(self.stores.clone(), scheme)
    }
}

/// Semester path segment, `1` to `4`.
pub fn parse_semester(raw: &str) -> Result<Semester, ApiError> {
    Ok(raw.parse::<Semester>()?)
}

pub async fn health() -> &'static str {
    "ok"
}
