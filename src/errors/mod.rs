use thiserror::Error;

/// Domain failures of the marks pipeline.
///
/// Infrastructure problems (pool, SQL, IO) travel as `anyhow::Error`;
/// these variants are the ones a caller is expected to act on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarksError {
    #[error("Invalid value for {field}: '{value}'")]
    Parse { field: String, value: String },

    #[error("Marks out of range: {reason}")]
    InvalidMarks { reason: String },

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid semester: '{0}' (expected 1-4)")]
    InvalidSemester(String),

    #[error("Invalid topper scope: '{0}' (expected year1, year2 or college)")]
    InvalidScope(String),
}

impl MarksError {
    pub fn parse(field: &str, value: &str) -> Self {
        MarksError::Parse {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn invalid_marks(reason: impl Into<String>) -> Self {
        MarksError::InvalidMarks {
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            MarksError::Parse { .. } => "PARSE_ERROR",
            MarksError::InvalidMarks { .. } => "INVALID_MARKS",
            MarksError::MissingColumns(_) => "MISSING_COLUMNS",
            MarksError::NotFound(_) => "NOT_FOUND",
            MarksError::InvalidSemester(_) => "INVALID_SEMESTER",
            MarksError::InvalidScope(_) => "INVALID_SCOPE",
        }
    }
}

/// Context message for store failures
pub fn store_context(operation: &str, semester: impl std::fmt::Display) -> String {
    format!("Failed to {} in semester {} store", operation, semester)
}
