pub mod dashboards;
pub mod subjects;
pub mod toppers;
pub mod totals;

pub use dashboards::{SemesterDashboard, StudentReport, SubjectDashboard};
pub use subjects::{fail_analysis, is_failing, top_students, FailCount};
pub use toppers::{topper_comparison, SemesterRecords, TopperComparison, TopperEntry, Trend};
pub use totals::{bottom_n, rank_totals, student_totals, subject_list, top_n, RankedTotal, StudentTotal};

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
