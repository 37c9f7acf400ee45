use serde::Serialize;
use std::collections::HashMap;

use crate::database::StudentSubjectRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailCount {
    pub student_id: String,
    pub student_name: String,
    pub fail_count: usize,
}

/// A record fails the subject view when graded F or when it falls under
/// `pass_threshold`, which is stricter than the F cutoff.
pub fn is_failing(record: &StudentSubjectRecord, pass_threshold: f64) -> bool {
    record.grade.is_fail() || record.final_percentage < pass_threshold
}

/// Failing records counted per student, most failures first.
pub fn fail_analysis(records: &[StudentSubjectRecord], pass_threshold: f64) -> Vec<FailCount> {
    let mut counts: Vec<FailCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records.iter().filter(|r| is_failing(r, pass_threshold)) {
        match index.get(record.student_id.as_str()) {
            Some(&idx) => counts[idx].fail_count += 1,
            None => {
                index.insert(record.student_id.as_str(), counts.len());
                counts.push(FailCount {
                    student_id: record.student_id.clone(),
                    student_name: record.student_name.clone(),
                    fail_count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.fail_count.cmp(&a.fail_count));
    counts
}

/// Best passing records, highest percentage first.
pub fn top_students(
    records: &[StudentSubjectRecord],
    pass_threshold: f64,
    limit: usize,
) -> Vec<StudentSubjectRecord> {
    let mut passing: Vec<&StudentSubjectRecord> = records
        .iter()
        .filter(|r| !is_failing(r, pass_threshold))
        .collect();

    passing.sort_by(|a, b| b.final_percentage.total_cmp(&a.final_percentage));
    passing.into_iter().take(limit).cloned().collect()
}
