use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::StudentIdentity;
use crate::grading::{RawMarks, ScoreBreakdown, SubjectGrade};

/// One stored row: a student's marks in one subject for one semester.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSubjectRecord {
    pub id: i64,
    pub student_id: String,
    pub student_name: String,
    pub subject: String,
    pub internal1: f64,
    pub internal2: f64,
    pub internal_subtotal: f64,
    pub assignment1: f64,
    pub assignment2: f64,
    pub assignment_subtotal: f64,
    pub exam_score: f64,
    pub exam_subtotal: f64,
    pub final_percentage: f64,
    pub grade: SubjectGrade,
    pub created_at: Option<NaiveDateTime>,
}

/// A normalized, graded record that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudentRecord {
    pub identity: StudentIdentity,
    pub marks: RawMarks,
    pub scores: ScoreBreakdown,
}

impl NewStudentRecord {
    pub fn new(identity: StudentIdentity, marks: RawMarks, scores: ScoreBreakdown) -> Self {
        Self {
            identity,
            marks,
            scores,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    Inserted(StudentSubjectRecord),
    /// A record for the same (student, subject) pair already exists.
    Skipped,
}
