use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

use super::round2;
use crate::database::StudentSubjectRecord;
use crate::grading::{OverallGrade, SubjectGrade};

/// A student's semester roll-up across all subjects taken.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentTotal {
    pub student_id: String,
    pub student_name: String,
    /// Sum of `final_percentage` over the student's subjects.
    pub total: f64,
    pub subject_count: usize,
    pub overall_percentage: f64,
    pub overall_grade: OverallGrade,
    pub grades: Vec<SubjectGrade>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedTotal {
    pub rank: usize,
    #[serde(flatten)]
    pub student: StudentTotal,
}

/// Group records by student, in the order students first appear.
pub fn student_totals(records: &[StudentSubjectRecord]) -> Vec<StudentTotal> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&StudentSubjectRecord>> = HashMap::new();

    for record in records {
        let key = record.student_id.as_str();
        groups
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(record);
    }

    order
        .into_iter()
        .map(|key| summarize_student(&groups[key]))
        .collect()
}

fn summarize_student(records: &[&StudentSubjectRecord]) -> StudentTotal {
    let first = records[0];
    let total: f64 = records.iter().map(|r| r.final_percentage).sum();
    let subject_count = records
        .iter()
        .map(|r| r.subject.as_str())
        .collect::<HashSet<_>>()
        .len();
    let overall_percentage = round2(total / (subject_count as f64 * 100.0) * 100.0);

    StudentTotal {
        student_id: first.student_id.clone(),
        student_name: first.student_name.clone(),
        total,
        subject_count,
        overall_percentage,
        overall_grade: OverallGrade::from_percentage(overall_percentage),
        grades: records.iter().map(|r| r.grade).collect(),
    }
}

/// Rank by summed percentage, highest first. Ties keep their input order.
pub fn rank_totals(mut totals: Vec<StudentTotal>) -> Vec<RankedTotal> {
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));

    totals
        .into_iter()
        .enumerate()
        .map(|(idx, student)| RankedTotal { rank: idx + 1, student })
        .collect()
}

pub fn top_n(ranked: &[RankedTotal], n: usize) -> Vec<RankedTotal> {
    ranked.iter().take(n).cloned().collect()
}

/// The last `n` of the ranking, still in ranking order. May overlap `top_n`.
pub fn bottom_n(ranked: &[RankedTotal], n: usize) -> Vec<RankedTotal> {
    let start = ranked.len().saturating_sub(n);
    ranked[start..].to_vec()
}

/// Distinct non-blank subjects, sorted.
pub fn subject_list(records: &[StudentSubjectRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.subject.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
