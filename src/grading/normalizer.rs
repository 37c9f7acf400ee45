use super::grades::SubjectGrade;
use super::types::{MAX_ASSIGNMENT, MAX_EXAM, MAX_INTERNAL, RawMarks, ScoreBreakdown, WeightingScheme};
use crate::errors::MarksError;

/// Validate raw marks and fold them into subtotals, a final percentage and
/// a subject grade.
pub fn normalize(marks: &RawMarks, scheme: WeightingScheme) -> Result<ScoreBreakdown, MarksError> {
    validate(marks)?;

    let (internal_subtotal, assignment_subtotal, exam_subtotal) = match scheme {
        WeightingScheme::QuarterWeighted => quarter_weighted(marks),
        WeightingScheme::HalfWeighted => half_weighted(marks),
    };
    let final_percentage = internal_subtotal + assignment_subtotal + exam_subtotal;

    Ok(ScoreBreakdown {
        internal_subtotal,
        assignment_subtotal,
        exam_subtotal,
        final_percentage,
        grade: SubjectGrade::from_percentage(final_percentage),
    })
}

pub fn validate(marks: &RawMarks) -> Result<(), MarksError> {
    let components = [
        ("cie1", marks.internal1, MAX_INTERNAL),
        ("cie2", marks.internal2, MAX_INTERNAL),
        ("assignment1marks", marks.assignment1, MAX_ASSIGNMENT),
        ("assignment2marks", marks.assignment2, MAX_ASSIGNMENT),
        ("see", marks.exam_score, MAX_EXAM),
    ];

    for (field, value, max) in components {
        if value < 0.0 {
            return Err(MarksError::invalid_marks(format!("{} is negative ({})", field, value)));
        }
        if value > max {
            return Err(MarksError::invalid_marks(format!(
                "{} exceeds {} ({})",
                field, max, value
            )));
        }
    }

    Ok(())
}

fn quarter_weighted(marks: &RawMarks) -> (f64, f64, f64) {
    (
        (marks.internal1 + marks.internal2) * 25.0 / 100.0,
        (marks.assignment1 + marks.assignment2) * 25.0 / 100.0,
        marks.exam_score * 50.0 / 100.0,
    )
}

fn half_weighted(marks: &RawMarks) -> (f64, f64, f64) {
    (
        (marks.internal1 + marks.internal2) / 2.0,
        (marks.assignment1 + marks.assignment2) / 2.0,
        marks.exam_score / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marks(i1: f64, i2: f64, a1: f64, a2: f64, exam: f64) -> RawMarks {
        RawMarks {
            internal1: i1,
            internal2: i2,
            assignment1: a1,
            assignment2: a2,
            exam_score: exam,
        }
    }

    #[test]
    fn test_quarter_weighted_reference_record() {
        let scores = normalize(&marks(40.0, 45.0, 48.0, 50.0, 80.0), WeightingScheme::QuarterWeighted).unwrap();

        assert_eq!(scores.internal_subtotal, 21.25);
        assert_eq!(scores.assignment_subtotal, 24.5);
        assert_eq!(scores.exam_subtotal, 40.0);
        assert_eq!(scores.final_percentage, 85.75);
        assert_eq!(scores.grade, SubjectGrade::A);
    }

    #[test]
    fn test_all_zero_marks_fail() {
        let scores = normalize(&RawMarks::default(), WeightingScheme::QuarterWeighted).unwrap();
        assert_eq!(scores.final_percentage, 0.0);
        assert_eq!(scores.grade, SubjectGrade::F);
    }

    #[test]
    fn test_quarter_weighted_stays_within_hundred() {
        let steps = [0.0, 12.5, 25.0, 49.5, 50.0];
        for i in steps {
            for a in steps {
                for exam in [0.0, 33.0, 99.5, 100.0] {
                    let scores = normalize(&marks(i, 50.0 - i, a, a, exam), WeightingScheme::QuarterWeighted).unwrap();
                    assert!((0.0..=100.0).contains(&scores.final_percentage));
                }
            }
        }
        let full = normalize(&marks(50.0, 50.0, 50.0, 50.0, 100.0), WeightingScheme::QuarterWeighted).unwrap();
        assert_eq!(full.final_percentage, 100.0);
        assert_eq!(full.grade, SubjectGrade::O);
    }

    #[test]
    fn test_half_weighted_reproduces_legacy_scale() {
        let scores = normalize(&marks(40.0, 45.0, 48.0, 50.0, 80.0), WeightingScheme::HalfWeighted).unwrap();

        assert_eq!(scores.internal_subtotal, 42.5);
        assert_eq!(scores.assignment_subtotal, 49.0);
        assert_eq!(scores.exam_subtotal, 40.0);
        assert_eq!(scores.final_percentage, 131.5);
        assert_eq!(scores.grade, SubjectGrade::O);
    }

    #[test]
    fn test_out_of_range_marks_are_rejected() {
        let cases = [
            marks(60.0, 0.0, 0.0, 0.0, 0.0),
            marks(0.0, 50.5, 0.0, 0.0, 0.0),
            marks(0.0, 0.0, 51.0, 0.0, 0.0),
            marks(0.0, 0.0, 0.0, 0.0, 100.1),
            marks(0.0, 0.0, 0.0, -1.0, 0.0),
        ];
        for case in cases {
            for scheme in [WeightingScheme::QuarterWeighted, WeightingScheme::HalfWeighted] {
                let err = normalize(&case, scheme).unwrap_err();
                assert!(matches!(err, MarksError::InvalidMarks { .. }), "{:?}", case);
            }
        }
    }

    #[test]
    fn test_error_names_offending_component() {
        let err = validate(&marks(0.0, 0.0, 0.0, 0.0, 120.0)).unwrap_err();
        assert_eq!(err.to_string(), "Marks out of range: see exceeds 100 (120)");
    }
}
