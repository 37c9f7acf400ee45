use anyhow::Result;
use log::info;

use crate::database::{InsertOutcome, NewStudentRecord, SemesterStores, StudentSubjectRecord};
use crate::domain::{MarksForm, Semester};
use crate::grading::{normalize, WeightingScheme};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(StudentSubjectRecord),
    /// The student already has marks for this subject; nothing was written.
    Duplicate,
}

/// Single-record marks entry.
pub struct MarksEntryService {
    stores: SemesterStores,
    scheme: WeightingScheme,
}

impl MarksEntryService {
    pub fn new(stores: SemesterStores, scheme: WeightingScheme) -> Self {
        Self { stores, scheme }
    }

    /// Parse, grade and store one form. Rejected forms surface as
    /// `MarksError` inside the returned error.
    pub fn submit(&self, semester: Semester, form: &MarksForm) -> Result<SubmitOutcome> {
        let row = form.to_row()?;
        let scores = normalize(&row.marks, self.scheme)?;
        let record = NewStudentRecord::new(row.identity, row.marks, scores);

        match self.stores.insert_if_absent(semester, &record)? {
            InsertOutcome::Inserted(stored) => {
                info!(
                    "Stored {} / {} in semester {} ({:.2}%, {})",
                    stored.student_id, stored.subject, semester, stored.final_percentage, stored.grade
                );
                Ok(SubmitOutcome::Created(stored))
            }
            InsertOutcome::Skipped => {
                info!(
                    "Duplicate submission for {} / {} in semester {}",
                    record.identity.student_id, record.identity.subject, semester
                );
                Ok(SubmitOutcome::Duplicate)
            }
        }
    }
}
