//! Student identity model
//!
//! An [`Identity`] is created once per session from the roster source and
//! then mutated in place by result ingestion and visit application. The
//! mutators are crate-private so every change goes through the roster
//! repository.

use super::ids::StudentId;
use super::visit::{Visit, VisitSlot};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// One assessment outcome attached to a student
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentResult {
    /// Assessment label ("module assessment")
    pub assessment: String,

    /// Mark exactly as it appeared in the export
    pub mark_text: String,

    /// Mark parsed as a number, absent when the text is not numeric
    pub mark: Option<f64>,

    /// Grade or marking-note text
    pub grade: String,
}

/// Duplicate-suppression key for [`StudentResult`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StudentResultKey {
    pub assessment: String,
    pub mark: String,
    pub grade: String,
}

impl StudentResult {
    /// Creates a result, parsing the mark text when possible
    ///
    /// # Examples
    ///
    /// ```
    /// use unitrack::domain::student::StudentResult;
    ///
    /// let ok = StudentResult::new("CS101 A1", "67.5", "B");
    /// assert_eq!(ok.mark, Some(67.5));
    ///
    /// let absent = StudentResult::new("CS101 A1", "ABS", "Absent");
    /// assert_eq!(absent.mark, None);
    /// ```
    pub fn new(
        assessment: impl Into<String>,
        mark_text: impl Into<String>,
        grade: impl Into<String>,
    ) -> Self {
        let mark_text = mark_text.into();
        let mark = parse_mark(&mark_text);
        Self {
            assessment: assessment.into(),
            mark_text,
            mark,
            grade: grade.into(),
        }
    }

    /// Key under which duplicates are folded
    pub fn key(&self) -> StudentResultKey {
        StudentResultKey {
            assessment: self.assessment.clone(),
            mark: self.mark_text.clone(),
            grade: self.grade.clone(),
        }
    }
}

impl fmt::Display for StudentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mark {})", self.assessment, self.mark_text)
    }
}

/// Parses a mark, treating anything non-finite or non-numeric as absent
pub fn parse_mark(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// A student known to the roster
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    id: StudentId,
    name: String,
    email: String,
    tutor: String,
    anonymous_codes: Vec<String>,
    results: Vec<StudentResult>,
    visits: Vec<Visit>,

    #[serde(skip)]
    result_keys: HashSet<StudentResultKey>,

    #[serde(skip)]
    visit_slots: HashMap<VisitSlot, usize>,
}

impl Identity {
    /// Creates an identity with no codes, results or visits
    pub fn new(
        id: StudentId,
        name: impl Into<String>,
        email: impl Into<String>,
        tutor: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            tutor: tutor.into(),
            anonymous_codes: Vec::new(),
            results: Vec::new(),
            visits: Vec::new(),
            result_keys: HashSet::new(),
            visit_slots: HashMap::new(),
        }
    }

    pub fn id(&self) -> &StudentId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn tutor(&self) -> &str {
        &self.tutor
    }

    /// Registered anonymous codes, in registration order
    pub fn anonymous_codes(&self) -> &[String] {
        &self.anonymous_codes
    }

    /// Accumulated results, in first-seen order
    pub fn results(&self) -> &[StudentResult] {
        &self.results
    }

    /// Recorded visits, in first-seen order
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Label used for lookups and listings: `"<name> (<id>)"`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }

    /// Case-insensitive substring match against [`Identity::label`]
    pub fn matches_label(&self, pattern: &str) -> bool {
        self.label()
            .to_lowercase()
            .contains(&pattern.to_lowercase())
    }

    /// Returns true when `code` identifies this student
    ///
    /// The canonical id always qualifies, registered or not.
    pub fn claims_code(&self, code: &str) -> bool {
        self.id.as_str() == code || self.anonymous_codes.iter().any(|c| c == code)
    }

    /// Mean of all numeric marks, `None` when the student has none
    pub fn mean_mark(&self) -> Option<f64> {
        let marks: Vec<f64> = self.results.iter().filter_map(|r| r.mark).collect();
        if marks.is_empty() {
            return None;
        }
        Some(marks.iter().sum::<f64>() / marks.len() as f64)
    }

    pub(crate) fn add_anonymous_code(&mut self, code: impl Into<String>) {
        let code = code.into();
        if !self.anonymous_codes.contains(&code) {
            self.anonymous_codes.push(code);
        }
    }

    /// Appends a result unless an equal one is already present
    ///
    /// Returns true when the result was inserted.
    pub(crate) fn add_result(&mut self, result: StudentResult) -> bool {
        if !self.result_keys.insert(result.key()) {
            return false;
        }
        self.results.push(result);
        true
    }

    /// Records a visit, replacing the one occupying the same slot
    pub(crate) fn record_visit(&mut self, visit: Visit) {
        match self.visit_slots.get(&visit.slot()) {
            Some(&index) => self.visits[index] = visit,
            None => {
                self.visit_slots.insert(visit.slot(), self.visits.len());
                self.visits.push(visit);
            }
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Identity {
        Identity::new(
            StudentId::new("1001").unwrap(),
            "Ada Lovelace",
            "ada@uni.ac.uk",
            "Dr Babbage",
        )
    }

    #[test]
    fn test_label_format() {
        assert_eq!(student().label(), "Ada Lovelace (1001)");
        assert_eq!(student().to_string(), student().label());
    }

    #[test]
    fn test_matches_label_case_insensitive() {
        let s = student();
        assert!(s.matches_label("lovelace"));
        assert!(s.matches_label("(1001)"));
        assert!(s.matches_label(""));
        assert!(!s.matches_label("turing"));
    }

    #[test]
    fn test_claims_own_id_without_registration() {
        let s = student();
        assert!(s.claims_code("1001"));
        assert!(!s.claims_code("X99"));
    }

    #[test]
    fn test_claims_registered_code() {
        let mut s = student();
        s.add_anonymous_code("X99");
        s.add_anonymous_code("X99");
        assert!(s.claims_code("X99"));
        assert_eq!(s.anonymous_codes(), &["X99".to_string()]);
    }

    #[test]
    fn test_add_result_suppresses_duplicates() {
        let mut s = student();
        assert!(s.add_result(StudentResult::new("CS101 A1", "70", "A")));
        assert!(!s.add_result(StudentResult::new("CS101 A1", "70", "A")));
        assert!(s.add_result(StudentResult::new("CS101 A1", "70", "A-")));
        assert_eq!(s.results().len(), 2);
    }

    #[test]
    fn test_mark_parse_failure_is_absent() {
        let r = StudentResult::new("CS101 A1", "n/a", "");
        assert_eq!(r.mark, None);
        assert_eq!(parse_mark(" 55 "), Some(55.0));
        assert_eq!(parse_mark("NaN"), None);
    }

    #[test]
    fn test_mean_mark_ignores_absent_marks() {
        let mut s = student();
        assert_eq!(s.mean_mark(), None);
        s.add_result(StudentResult::new("CS101 A1", "60", ""));
        s.add_result(StudentResult::new("CS101 A2", "80", ""));
        s.add_result(StudentResult::new("CS101 A3", "ABS", ""));
        assert_eq!(s.mean_mark(), Some(70.0));
    }

    #[test]
    fn test_record_visit_replaces_same_slot() {
        let mut s = student();
        s.record_visit(Visit::new("CS101", "ada@uni.ac.uk", "2 days", "", ""));
        s.record_visit(Visit::new("CS101", "ada@uni.ac.uk", "2 days", "Leeds", "UK"));
        assert_eq!(s.visits().len(), 1);
        assert_eq!(s.visits()[0].town, "Leeds");
    }

    #[test]
    fn test_record_visit_keeps_different_times() {
        let mut s = student();
        s.record_visit(Visit::new("CS101", "ada@uni.ac.uk", "2 days", "", ""));
        s.record_visit(Visit::new("CS101", "ada@uni.ac.uk", "now", "", ""));
        assert_eq!(s.visits().len(), 2);
    }

    #[test]
    fn test_result_display() {
        let r = StudentResult::new("CS101 A1", "70", "A");
        assert_eq!(r.to_string(), "CS101 A1 (mark 70)");
    }
}
