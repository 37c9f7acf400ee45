use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::MarksError;
use crate::grading::RawMarks;

/// One of the four independent semester stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Semester {
    Sem1,
    Sem2,
    Sem3,
    Sem4,
}

impl Semester {
    pub const ALL: [Semester; 4] = [Semester::Sem1, Semester::Sem2, Semester::Sem3, Semester::Sem4];

    pub fn number(self) -> u8 {
        match self {
            Semester::Sem1 => 1,
            Semester::Sem2 => 2,
            Semester::Sem3 => 3,
            Semester::Sem4 => 4,
        }
    }

    pub fn index(self) -> usize {
        self.number() as usize - 1
    }
}

impl From<Semester> for u8 {
    fn from(semester: Semester) -> Self {
        semester.number()
    }
}

impl TryFrom<u8> for Semester {
    type Error = MarksError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Semester::Sem1),
            2 => Ok(Semester::Sem2),
            3 => Ok(Semester::Sem3),
            4 => Ok(Semester::Sem4),
            other => Err(MarksError::InvalidSemester(other.to_string())),
        }
    }
}

impl FromStr for Semester {
    type Err = MarksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u8>()
            .map_err(|_| MarksError::InvalidSemester(trimmed.to_string()))
            .and_then(Semester::try_from)
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Normalize a USN the way it is stored and looked up.
pub fn normalize_usn(usn: &str) -> String {
    usn.trim().to_uppercase()
}

/// Who and what a set of marks belongs to, trimmed and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentIdentity {
    pub student_id: String,
    pub student_name: String,
    pub subject: String,
}

impl StudentIdentity {
    pub fn new(usn: Option<&str>, name: Option<&str>, subject: Option<&str>) -> Result<Self, MarksError> {
        Ok(Self {
            student_id: normalize_usn(required("usn", usn)?),
            student_name: required("name", name)?.to_string(),
            subject: required("subject", subject)?.to_string(),
        })
    }
}

fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, MarksError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(MarksError::parse(field, "")),
    }
}

/// A spreadsheet row keyed by the canonical lower-case column names.
///
/// Every cell is optional text; `MarksRow::from_sheet` decides what is valid.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetRow {
    pub usn: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub cie1: Option<String>,
    pub cie2: Option<String>,
    pub assignment1marks: Option<String>,
    pub assignment2marks: Option<String>,
    pub see: Option<String>,
}

/// A fully parsed row, ready for normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct MarksRow {
    pub identity: StudentIdentity,
    pub marks: RawMarks,
}

impl MarksRow {
    /// Build a row; `fixed_subject` overrides whatever the sheet says.
    pub fn from_sheet(row: &SheetRow, fixed_subject: Option<&str>) -> Result<Self, MarksError> {
        let subject = fixed_subject.or(row.subject.as_deref());
        let identity = StudentIdentity::new(row.usn.as_deref(), row.name.as_deref(), subject)?;
        let marks = RawMarks::from_text(
            row.cie1.as_deref(),
            row.cie2.as_deref(),
            row.assignment1marks.as_deref(),
            row.assignment2marks.as_deref(),
            row.see.as_deref(),
        )?;

        Ok(Self { identity, marks })
    }
}

/// A mark as submitted through the entry form: JSON number or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkInput {
    Number(f64),
    Text(String),
    /// Anything else JSON can carry; kept so the form can be echoed back.
    Other(serde_json::Value),
}

impl MarkInput {
    fn to_text(&self, field: &str) -> Result<String, MarksError> {
        match self {
            MarkInput::Number(value) => Ok(value.to_string()),
            MarkInput::Text(text) => Ok(text.clone()),
            MarkInput::Other(value) => Err(MarksError::parse(field, &value.to_string())),
        }
    }
}

/// Single-record submission. Echoed back unchanged when it is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarksForm {
    #[serde(default)]
    pub usn: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subject: String,
    pub cie1: Option<MarkInput>,
    pub cie2: Option<MarkInput>,
    #[serde(alias = "assignment1marks")]
    pub assignment1: Option<MarkInput>,
    #[serde(alias = "assignment2marks")]
    pub assignment2: Option<MarkInput>,
    pub see: Option<MarkInput>,
}

impl MarksForm {
    pub fn to_row(&self) -> Result<MarksRow, MarksError> {
        let text = |field: &str, input: &Option<MarkInput>| {
            input.as_ref().map(|mark| mark.to_text(field)).transpose()
        };
        let sheet = SheetRow {
            usn: Some(self.usn.clone()),
            name: Some(self.name.clone()),
            subject: Some(self.subject.clone()),
            cie1: text("cie1", &self.cie1)?,
            cie2: text("cie2", &self.cie2)?,
            assignment1marks: text("assignment1marks", &self.assignment1)?,
            assignment2marks: text("assignment2marks", &self.assignment2)?,
            see: text("see", &self.see)?,
        };
        MarksRow::from_sheet(&sheet, None)
    }
}
