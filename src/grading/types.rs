use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::grades::SubjectGrade;
use crate::errors::MarksError;

pub const MAX_INTERNAL: f64 = 50.0;
pub const MAX_ASSIGNMENT: f64 = 50.0;
pub const MAX_EXAM: f64 = 100.0;

/// How raw component marks are folded into subtotals.
///
/// `QuarterWeighted` scales the internals and assignments to 25 each and the
/// exam to 50, giving a final out of 100. `HalfWeighted` halves every
/// component pair, the formula historically used by per-subject uploads,
/// which yields a final out of 150.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingScheme {
    #[default]
    QuarterWeighted,
    HalfWeighted,
}

impl WeightingScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightingScheme::QuarterWeighted => "quarter_weighted",
            WeightingScheme::HalfWeighted => "half_weighted",
        }
    }
}

impl fmt::Display for WeightingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightingScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "quarter_weighted" | "quarter" => Ok(WeightingScheme::QuarterWeighted),
            "half_weighted" | "half" => Ok(WeightingScheme::HalfWeighted),
            other => Err(format!(
                "unknown weighting scheme '{}' (expected quarter_weighted or half_weighted)",
                other
            )),
        }
    }
}

/// The five raw component marks of one student in one subject.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawMarks {
    pub internal1: f64,
    pub internal2: f64,
    pub assignment1: f64,
    pub assignment2: f64,
    pub exam_score: f64,
}

impl RawMarks {
    /// Parse marks from text cells. Blank or absent cells read as zero.
    pub fn from_text(
        internal1: Option<&str>,
        internal2: Option<&str>,
        assignment1: Option<&str>,
        assignment2: Option<&str>,
        exam_score: Option<&str>,
    ) -> Result<Self, MarksError> {
        Ok(Self {
            internal1: parse_mark("cie1", internal1)?,
            internal2: parse_mark("cie2", internal2)?,
            assignment1: parse_mark("assignment1marks", assignment1)?,
            assignment2: parse_mark("assignment2marks", assignment2)?,
            exam_score: parse_mark("see", exam_score)?,
        })
    }
}

fn parse_mark(field: &str, value: Option<&str>) -> Result<f64, MarksError> {
    let text = value.map(str::trim).unwrap_or("");
    if text.is_empty() {
        return Ok(0.0);
    }

    match text.parse::<f64>() {
        Ok(mark) if mark.is_finite() => Ok(mark),
        _ => Err(MarksError::parse(field, text)),
    }
}

/// Derived subtotals, final percentage and grade for one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub internal_subtotal: f64,
    pub assignment_subtotal: f64,
    pub exam_subtotal: f64,
    pub final_percentage: f64,
    pub grade: SubjectGrade,
}
