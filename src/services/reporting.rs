use anyhow::Result;
use log::info;

use crate::analytics::{
    subject_list, topper_comparison, SemesterDashboard, SemesterRecords, StudentReport,
    SubjectDashboard, TopperComparison,
};
use crate::config::{GradingSettings, TopperScope};
use crate::database::{SemesterStores, StudentSubjectRecord};
use crate::domain::Semester;

/// Read-side views over the semester stores.
pub struct ReportingService {
    stores: SemesterStores,
    settings: GradingSettings,
}

impl ReportingService {
    pub fn new(stores: SemesterStores, settings: GradingSettings) -> Self {
        Self { stores, settings }
    }

    pub fn records(&self, semester: Semester) -> Result<Vec<StudentSubjectRecord>> {
        self.stores.get_all(semester)
    }

    pub fn semester_dashboard(&self, semester: Semester) -> Result<SemesterDashboard> {
        let records = self.stores.get_all(semester)?;
        Ok(SemesterDashboard::build(semester, records, &self.settings))
    }

    pub fn subjects(&self, semester: Semester) -> Result<Vec<String>> {
        Ok(subject_list(&self.stores.get_all(semester)?))
    }

    pub fn subject_dashboard(&self, semester: Semester, subject: &str) -> Result<SubjectDashboard> {
        let records = self.stores.get_by_subject(semester, subject)?;
        Ok(SubjectDashboard::build(semester, subject, records, &self.settings))
    }

    pub fn student_records(&self, semester: Semester, usn: &str) -> Result<StudentReport> {
        let records = self.stores.get(semester, usn)?;
        Ok(StudentReport::build(semester, usn, records)?)
    }

    pub fn toppers(&self, scope: TopperScope) -> Result<TopperComparison> {
        let config = scope.config();
        let loaded = config
            .semesters
            .iter()
            .map(|&semester| {
                Ok(SemesterRecords {
                    semester,
                    records: self.stores.get_all(semester)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let comparison = topper_comparison(&config, &loaded, self.settings.topper_count);
        info!("Computed {} for {} students", config.title, comparison.toppers.len());
        Ok(comparison)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageSettings;
    use crate::domain::StudentIdentity;
    use crate::errors::MarksError;
    use crate::database::NewStudentRecord;
    use crate::grading::{normalize, RawMarks, WeightingScheme};

    fn reporting() -> (tempfile::TempDir, SemesterStores, ReportingService) {
        let dir = tempfile::tempdir().unwrap();
        let settings = StorageSettings {
            data_dir: dir.path().to_path_buf(),
            ..StorageSettings::default()
        };
        let stores = SemesterStores::open(&settings).unwrap();
        let service = ReportingService::new(stores.clone(), GradingSettings::default());
        (dir, stores, service)
    }

    fn store(stores: &SemesterStores, semester: Semester, usn: &str, subject: &str, exam: f64) {
        let identity = StudentIdentity::new(Some(usn), Some("Asha"), Some(subject)).unwrap();
        let marks = RawMarks {
            internal1: 40.0,
            internal2: 40.0,
            assignment1: 40.0,
            assignment2: 40.0,
            exam_score: exam,
        };
        let scores = normalize(&marks, WeightingScheme::QuarterWeighted).unwrap();
        stores
            .insert_if_absent(semester, &NewStudentRecord::new(identity, marks, scores))
            .unwrap();
    }

    #[test]
    fn test_student_lookup_and_not_found() {
        let (_dir, stores, service) = reporting();
        store(&stores, Semester::Sem1, "1AB01", "Maths", 80.0);

        let report = service.student_records(Semester::Sem1, "1ab01").unwrap();
        assert_eq!(report.records.len(), 1);

        let err = service.student_records(Semester::Sem2, "1ab01").unwrap_err();
        assert!(matches!(err.downcast_ref::<MarksError>(), Some(MarksError::NotFound(_))));
    }

    #[test]
    fn test_toppers_read_every_semester_in_scope() {
        let (_dir, stores, service) = reporting();
        store(&stores, Semester::Sem1, "1AB01", "Maths", 60.0);
        store(&stores, Semester::Sem2, "1AB01", "Maths", 100.0);
        store(&stores, Semester::Sem3, "1AB02", "Maths", 100.0);

        let comparison = service.toppers(TopperScope::Year1).unwrap();

        assert_eq!(comparison.toppers.len(), 1);
        assert_eq!(comparison.toppers[0].difference_display, "+20.00");
    }

    #[test]
    fn test_subject_views() {
        let (_dir, stores, service) = reporting();
        store(&stores, Semester::Sem2, "1AB01", "Physics", 80.0);
        store(&stores, Semester::Sem2, "1AB02", "Maths", 0.0);

        assert_eq!(service.subjects(Semester::Sem2).unwrap(), vec!["Maths", "Physics"]);
        let maths = service.subject_dashboard(Semester::Sem2, "Maths").unwrap();
        assert_eq!(maths.fail_counts.len(), 1);
        assert!(maths.top_students.is_empty());
    }
}
