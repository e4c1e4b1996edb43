//! Participation visit records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token used by the participation page for "seen right now"
pub const NOW_TOKEN: &str = "now";

/// Last known visit of a student to a module's course page
///
/// Only produced when both the email and the elapsed-time text are
/// non-blank. Town and country may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    /// Module tag supplied by the caller for the scraped page
    pub module: String,

    /// Student email as shown on the page
    pub email: String,

    /// Elapsed time since the visit ("now", "2 days", ...)
    pub time: String,

    /// Town of the visit (may be empty)
    pub town: String,

    /// Country of the visit (may be empty)
    pub country: String,
}

/// Key deciding which recorded visit a new observation replaces
///
/// The elapsed-time text is part of the key, so two observations of the
/// same module and email with different times occupy different slots and
/// are both retained.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VisitSlot {
    pub module: String,
    pub email: String,
    pub time: String,
}

impl Visit {
    /// Creates a visit record
    pub fn new(
        module: impl Into<String>,
        email: impl Into<String>,
        time: impl Into<String>,
        town: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            email: email.into(),
            time: time.into(),
            town: town.into(),
            country: country.into(),
        }
    }

    /// Slot this visit occupies in a student's visit list
    pub fn slot(&self) -> VisitSlot {
        VisitSlot {
            module: self.module.clone(),
            email: self.email.clone(),
            time: self.time.clone(),
        }
    }

    /// Returns true when the student was seen at scrape time
    pub fn is_now(&self) -> bool {
        self.time == NOW_TOKEN
    }
}

impl fmt::Display for Visit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_now() {
            write!(f, "{} last visited: {}", self.module, self.time)
        } else {
            write!(f, "{} last visited: {} ago", self.module, self.time)
        }
    }
}
