use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letter grade for one subject record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectGrade {
    O,
    A,
    B,
    C,
    F,
}

impl SubjectGrade {
    pub fn from_percentage(percentage: f64) -> Self {
        let percentage = coerce(percentage);
        if percentage >= 90.0 {
            SubjectGrade::O
        } else if percentage >= 75.0 {
            SubjectGrade::A
        } else if percentage >= 55.0 {
            SubjectGrade::B
        } else if percentage >= 35.0 {
            SubjectGrade::C
        } else {
            SubjectGrade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectGrade::O => "O",
            SubjectGrade::A => "A",
            SubjectGrade::B => "B",
            SubjectGrade::C => "C",
            SubjectGrade::F => "F",
        }
    }

    pub fn is_fail(&self) -> bool {
        *self == SubjectGrade::F
    }
}

impl fmt::Display for SubjectGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubjectGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "O" => Ok(SubjectGrade::O),
            "A" => Ok(SubjectGrade::A),
            "B" => Ok(SubjectGrade::B),
            "C" => Ok(SubjectGrade::C),
            "F" => Ok(SubjectGrade::F),
            other => Err(format!("unknown subject grade '{}'", other)),
        }
    }
}

/// Letter grade for a student's aggregated semester percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverallGrade {
    S,
    A,
    B,
    C,
    D,
    E,
    F,
}

impl OverallGrade {
    pub fn from_percentage(percentage: f64) -> Self {
        let percentage = coerce(percentage);
        if percentage >= 90.0 {
            OverallGrade::S
        } else if percentage >= 80.0 {
            OverallGrade::A
        } else if percentage >= 70.0 {
            OverallGrade::B
        } else if percentage >= 60.0 {
            OverallGrade::C
        } else if percentage >= 50.0 {
            OverallGrade::D
        } else if percentage >= 40.0 {
            OverallGrade::E
        } else {
            OverallGrade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OverallGrade::S => "S",
            OverallGrade::A => "A",
            OverallGrade::B => "B",
            OverallGrade::C => "C",
            OverallGrade::D => "D",
            OverallGrade::E => "E",
            OverallGrade::F => "F",
        }
    }
}

impl fmt::Display for OverallGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// NaN, infinities and negatives classify as zero.
fn coerce(percentage: f64) -> f64 {
    if percentage.is_finite() && percentage > 0.0 {
        percentage
    } else {
        0.0
    }
}
