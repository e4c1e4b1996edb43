//! Domain identifier types with validation
//!
//! Newtype wrappers keep canonical student ids apart from the raw candidate
//! codes found in result exports, and give assessments a composite key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical student identifier
///
/// Stable and unique within a roster. A student's own id is always accepted
/// as a candidate code for that student.
///
/// # Examples
///
/// ```
/// use unitrack::domain::ids::StudentId;
/// use std::str::FromStr;
///
/// let id = StudentId::from_str("u1234567").unwrap();
/// assert_eq!(id.as_str(), "u1234567");
/// assert!(StudentId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(String);

impl StudentId {
    /// Creates a new StudentId, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Student ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the student ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StudentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for StudentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identity of an assessment aggregate
///
/// Matching is exact and case-sensitive on both parts. The display form
/// `"<module> <assessment>"` doubles as the label attached to per-student
/// results.
///
/// # Examples
///
/// ```
/// use unitrack::domain::ids::AssessmentKey;
///
/// let key = AssessmentKey::new("CS101", "A1");
/// assert_eq!(key.label(), "CS101 A1");
/// assert_ne!(key, AssessmentKey::new("cs101", "A1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssessmentKey {
    /// Module code
    pub module: String,

    /// Assessment code within the module
    pub assessment: String,
}

impl AssessmentKey {
    /// Creates a key from a module code and an assessment code
    pub fn new(module: impl Into<String>, assessment: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            assessment: assessment.into(),
        }
    }

    /// Label used for per-student results ("module assessment")
    pub fn label(&self) -> String {
        format!("{} {}", self.module, self.assessment)
    }
}

impl fmt::Display for AssessmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.module, self.assessment)
    }
}
