use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::Semester;
use crate::errors::MarksError;

/// Scope of a topper list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TopperScope {
    Year1,
    Year2,
    College,
}

/// Topper scope configuration: which semesters are compared
///
/// The first and last semester of `semesters` are the ones the
/// improvement delta is computed between.
#[derive(Debug, Clone)]
pub struct ScopeConfig {
    pub scope: TopperScope,
    pub slug: &'static str,
    pub title: &'static str,
    pub semesters: &'static [Semester],
}

impl ScopeConfig {
    pub fn new(
        scope: TopperScope,
        slug: &'static str,
        title: &'static str,
        semesters: &'static [Semester],
    ) -> Self {
        Self {
            scope,
            slug,
            title,
            semesters,
        }
    }
}

/// Get the list of topper scopes
pub fn get_scopes() -> Vec<ScopeConfig> {
    TopperScope::ALL.iter().map(|scope| scope.config()).collect()
}

impl TopperScope {
    pub const ALL: [TopperScope; 3] = [TopperScope::Year1, TopperScope::Year2, TopperScope::College];

    pub fn config(self) -> ScopeConfig {
        match self {
            TopperScope::Year1 => ScopeConfig::new(self, "year1", "Year 1 Toppers", &[Semester::Sem1, Semester::Sem2]),
            TopperScope::Year2 => ScopeConfig::new(self, "year2", "Year 2 Toppers", &[Semester::Sem3, Semester::Sem4]),
            TopperScope::College => ScopeConfig::new(
                self,
                "college",
                "College Toppers",
                &[Semester::Sem1, Semester::Sem2, Semester::Sem3, Semester::Sem4],
            ),
        }
    }

    pub fn as_str(self) -> &'static str {
        self.config().slug
    }
}

impl fmt::Display for TopperScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopperScope {
    type Err = MarksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        get_scopes()
            .into_iter()
            .find(|config| config.slug == wanted)
            .map(|config| config.scope)
            .ok_or_else(|| MarksError::InvalidScope(s.trim().to_string()))
    }
}
