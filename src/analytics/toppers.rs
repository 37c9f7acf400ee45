use serde::Serialize;
use std::collections::HashMap;

use super::round2;
use crate::config::{ScopeConfig, TopperScope};
use crate::database::StudentSubjectRecord;
use crate::domain::Semester;

/// Records loaded from one semester store.
#[derive(Debug, Clone)]
pub struct SemesterRecords {
    pub semester: Semester,
    pub records: Vec<StudentSubjectRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    High,
    Low,
    Same,
}

impl Trend {
    pub fn from_difference(difference: f64) -> Self {
        if difference > 0.0 {
            Trend::High
        } else if difference < 0.0 {
            Trend::Low
        } else {
            Trend::Same
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterPercentage {
    pub semester: Semester,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopperEntry {
    pub rank: usize,
    pub student_id: String,
    pub student_name: String,
    /// Mean over every (semester, subject) record in scope.
    pub average_percentage: f64,
    pub semesters: Vec<SemesterPercentage>,
    pub difference: f64,
    pub difference_display: String,
    pub comparison: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopperComparison {
    pub scope: TopperScope,
    pub title: String,
    pub first_semester: Semester,
    pub last_semester: Semester,
    pub toppers: Vec<TopperEntry>,
}

struct StudentAccumulator<'a> {
    student_id: &'a str,
    student_name: &'a str,
    sum: f64,
    count: usize,
    per_semester: HashMap<Semester, (f64, usize)>,
}

impl<'a> StudentAccumulator<'a> {
    fn new(record: &'a StudentSubjectRecord) -> Self {
        Self {
            student_id: &record.student_id,
            student_name: &record.student_name,
            sum: 0.0,
            count: 0,
            per_semester: HashMap::new(),
        }
    }

    fn add(&mut self, semester: Semester, percentage: f64) {
        self.sum += percentage;
        self.count += 1;
        let entry = self.per_semester.entry(semester).or_insert((0.0, 0));
        entry.0 += percentage;
        entry.1 += 1;
    }

    fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    fn semester_average(&self, semester: Semester) -> f64 {
        match self.per_semester.get(&semester) {
            Some(&(sum, count)) if count > 0 => sum / count as f64,
            _ => 0.0,
        }
    }
}

/// Rank students across the scope's semesters and compare the first and
/// last semester of each of the top `limit`.
pub fn topper_comparison(
    scope: &ScopeConfig,
    loaded: &[SemesterRecords],
    limit: usize,
) -> TopperComparison {
    let first_semester = scope.semesters[0];
    let last_semester = scope.semesters[scope.semesters.len() - 1];

    let mut students = accumulate(scope, loaded);
    students.sort_by(|a, b| b.average().total_cmp(&a.average()));

    let toppers = students
        .iter()
        .take(limit)
        .enumerate()
        .map(|(idx, student)| {
            let first = student.semester_average(first_semester);
            let last = student.semester_average(last_semester);
            let difference = last - first;

            TopperEntry {
                rank: idx + 1,
                student_id: student.student_id.to_string(),
                student_name: student.student_name.to_string(),
                average_percentage: round2(student.average()),
                semesters: scope
                    .semesters
                    .iter()
                    .map(|&semester| SemesterPercentage {
                        semester,
                        percentage: round2(student.semester_average(semester)),
                    })
                    .collect(),
                difference: round2(difference),
                difference_display: format_difference(difference),
                comparison: Trend::from_difference(difference),
            }
        })
        .collect();

    TopperComparison {
        scope: scope.scope,
        title: scope.title.to_string(),
        first_semester,
        last_semester,
        toppers,
    }
}

// Students in first-seen order across the scope's semesters.
fn accumulate<'a>(scope: &ScopeConfig, loaded: &'a [SemesterRecords]) -> Vec<StudentAccumulator<'a>> {
    let mut students: Vec<StudentAccumulator<'a>> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    let in_scope = loaded.iter().filter(|l| scope.semesters.contains(&l.semester));
    for semester_records in in_scope {
        for record in &semester_records.records {
            let idx = *index.entry(record.student_id.as_str()).or_insert_with(|| {
                students.push(StudentAccumulator::new(record));
                students.len() - 1
            });
            students[idx].add(semester_records.semester, record.final_percentage);
        }
    }

    students
}

fn format_difference(difference: f64) -> String {
    match Trend::from_difference(difference) {
        Trend::High => format!("+{:.2}", difference),
        Trend::Low => format!("{:.2}", difference),
        Trend::Same => "0.00".to_string(),
    }
}
