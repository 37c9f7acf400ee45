pub mod grades;
pub mod normalizer;
pub mod types;

pub use grades::{OverallGrade, SubjectGrade};
pub use normalizer::normalize;
pub use types::{RawMarks, ScoreBreakdown, WeightingScheme};
