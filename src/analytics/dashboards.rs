use serde::Serialize;

use super::subjects::{fail_analysis, top_students, FailCount};
use super::totals::{bottom_n, rank_totals, student_totals, subject_list, top_n, RankedTotal};
use crate::config::GradingSettings;
use crate::database::StudentSubjectRecord;
use crate::domain::{normalize_usn, Semester};
use crate::errors::MarksError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterDashboard {
    pub semester: Semester,
    pub records: Vec<StudentSubjectRecord>,
    pub top: Vec<RankedTotal>,
    pub bottom: Vec<RankedTotal>,
    pub subjects: Vec<String>,
}

impl SemesterDashboard {
    pub fn build(
        semester: Semester,
        records: Vec<StudentSubjectRecord>,
        settings: &GradingSettings,
    ) -> Self {
        let ranked = rank_totals(student_totals(&records));
        let count = settings.dashboard_rank_count;

        Self {
            semester,
            top: top_n(&ranked, count),
            bottom: bottom_n(&ranked, count),
            subjects: subject_list(&records),
            records,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDashboard {
    pub semester: Semester,
    pub subject: String,
    pub records: Vec<StudentSubjectRecord>,
    pub fail_counts: Vec<FailCount>,
    pub top_students: Vec<StudentSubjectRecord>,
}

impl SubjectDashboard {
    pub fn build(
        semester: Semester,
        subject: &str,
        records: Vec<StudentSubjectRecord>,
        settings: &GradingSettings,
    ) -> Self {
        Self {
            semester,
            subject: subject.trim().to_string(),
            fail_counts: fail_analysis(&records, settings.pass_threshold),
            top_students: top_students(&records, settings.pass_threshold, settings.subject_top_count),
            records,
        }
    }
}

/// One student's marks sheet for a semester.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentReport {
    pub semester: Semester,
    pub student_id: String,
    pub student_name: String,
    pub records: Vec<StudentSubjectRecord>,
}

impl StudentReport {
    pub fn build(
        semester: Semester,
        usn: &str,
        records: Vec<StudentSubjectRecord>,
    ) -> Result<Self, MarksError> {
        let student_id = normalize_usn(usn);
        let Some(first) = records.first() else {
            return Err(MarksError::NotFound(format!(
                "No records for student {} in semester {}",
                student_id, semester
            )));
        };

        Ok(Self {
            semester,
            student_name: first.student_name.clone(),
            student_id,
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::record;

    #[test]
    fn test_semester_dashboard_collects_rankings_and_subjects() {
        let records = vec![
            record(1, "A", "Maths", 90.0),
            record(2, "A", "Physics", 80.0),
            record(3, "B", "Maths", 95.0),
            record(4, "C", "Chemistry", 40.0),
        ];
        let settings = GradingSettings {
            dashboard_rank_count: 2,
            ..GradingSettings::default()
        };

        let dashboard = SemesterDashboard::build(Semester::Sem1, records, &settings);

        assert_eq!(dashboard.records.len(), 4);
        assert_eq!(dashboard.top[0].student.student_id, "A");
        assert_eq!(dashboard.top[1].student.student_id, "B");
        assert_eq!(dashboard.bottom[1].student.student_id, "C");
        assert_eq!(dashboard.bottom[1].rank, 3);
        assert_eq!(dashboard.subjects, vec!["Chemistry", "Maths", "Physics"]);
    }

    #[test]
    fn test_subject_dashboard_splits_passing_and_failing() {
        let records = vec![
            record(1, "A", "Maths", 92.0),
            record(2, "B", "Maths", 55.0),
            record(3, "C", "Maths", 61.0),
        ];

        let dashboard =
            SubjectDashboard::build(Semester::Sem2, " Maths ", records, &GradingSettings::default());

        assert_eq!(dashboard.subject, "Maths");
        assert_eq!(dashboard.fail_counts.len(), 1);
        assert_eq!(dashboard.fail_counts[0].student_id, "B");
        let top: Vec<&str> = dashboard.top_students.iter().map(|r| r.student_id.as_str()).collect();
        assert_eq!(top, vec!["A", "C"]);
    }

    #[test]
    fn test_student_report_uses_normalized_usn() {
        let records = vec![record(1, "1AB01", "Maths", 70.0)];

        let report = StudentReport::build(Semester::Sem3, " 1ab01 ", records).unwrap();

        assert_eq!(report.student_id, "1AB01");
        assert_eq!(report.student_name, "Student 1AB01");
    }

    #[test]
    fn test_student_report_without_records_is_not_found() {
        let err = StudentReport::build(Semester::Sem1, "1ab99", Vec::new()).unwrap_err();

        assert_eq!(err.code(), "NOT_FOUND");
        assert!(err.to_string().contains("1AB99"));
    }
}
