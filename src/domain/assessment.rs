//! Assessment aggregates
//!
//! An [`Assessment`] collects every result row seen for one
//! (module, assessment) pair. An [`AssessmentBook`] is an ordered set of
//! assessments unique by key; it serves both as the working set of a single
//! batch and as the session-wide collection.

use super::ids::AssessmentKey;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Column headers of [`Assessment::rows`]
pub const COLUMN_NAMES: [&str; 4] = ["Student Name", "Student Number", "Mark", "Grade"];

/// Display name attached to a result entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateName {
    /// The candidate code was resolved to a roster identity
    Resolved(String),

    /// No roster identity claimed the candidate code
    Unresolved,
}

impl CandidateName {
    /// Text shown for this name, using `sentinel` for unresolved candidates
    pub fn display<'a>(&'a self, sentinel: &'a str) -> &'a str {
        match self {
            CandidateName::Resolved(name) => name,
            CandidateName::Unresolved => sentinel,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, CandidateName::Resolved(_))
    }
}

/// One row of an assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEntry {
    /// Canonical id when resolved, otherwise the raw candidate code
    pub candidate: String,

    /// Resolved display name or the unresolved marker
    pub name: CandidateName,

    /// Raw mark text
    pub mark: String,

    /// Grade or marking-note text
    pub grade: String,
}

/// Duplicate-suppression key for [`ResultEntry`]: (name, candidate)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResultEntryKey {
    pub name: CandidateName,
    pub candidate: String,
}

impl ResultEntry {
    pub fn new(
        candidate: impl Into<String>,
        name: CandidateName,
        mark: impl Into<String>,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            candidate: candidate.into(),
            name,
            mark: mark.into(),
            grade: grade.into(),
        }
    }

    pub fn key(&self) -> ResultEntryKey {
        ResultEntryKey {
            name: self.name.clone(),
            candidate: self.candidate.clone(),
        }
    }
}

/// Tabular view of a result entry: (name, candidate id, mark, grade)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub name: String,
    pub candidate: String,
    pub mark: String,
    pub grade: String,
}

impl ResultRow {
    /// Row as an array in [`COLUMN_NAMES`] order
    pub fn cells(&self) -> [&str; 4] {
        [&self.name, &self.candidate, &self.mark, &self.grade]
    }
}

/// All results for one (module, assessment) pair
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    key: AssessmentKey,
    entries: Vec<ResultEntry>,

    #[serde(skip)]
    entry_keys: HashSet<ResultEntryKey>,
}

impl Assessment {
    pub fn new(key: AssessmentKey) -> Self {
        Self {
            key,
            entries: Vec::new(),
            entry_keys: HashSet::new(),
        }
    }

    pub fn key(&self) -> &AssessmentKey {
        &self.key
    }

    pub fn module(&self) -> &str {
        &self.key.module
    }

    pub fn assessment(&self) -> &str {
        &self.key.assessment
    }

    /// Entries in first-seen order
    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, entry: &ResultEntry) -> bool {
        self.entry_keys.contains(&entry.key())
    }

    /// Appends an entry unless one with the same (name, candidate) exists
    ///
    /// Returns true when the entry was inserted.
    pub fn add_entry(&mut self, entry: ResultEntry) -> bool {
        if !self.entry_keys.insert(entry.key()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Folds another assessment's entries into this one
    ///
    /// Returns the number of entries actually added.
    pub fn merge(&mut self, other: Assessment) -> usize {
        other
            .entries
            .into_iter()
            .filter(|entry| self.add_entry(entry.clone()))
            .count()
    }

    /// Rows for display or export, unresolved names shown as `sentinel`
    pub fn rows(&self, sentinel: &str) -> Vec<ResultRow> {
        self.entries
            .iter()
            .map(|entry| ResultRow {
                name: entry.name.display(sentinel).to_string(),
                candidate: entry.candidate.clone(),
                mark: entry.mark.clone(),
                grade: entry.grade.clone(),
            })
            .collect()
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

/// Ordered set of assessments, unique by [`AssessmentKey`]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct AssessmentBook {
    assessments: Vec<Assessment>,

    #[serde(skip)]
    index: HashMap<AssessmentKey, usize>,
}

impl AssessmentBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }

    pub fn get(&self, key: &AssessmentKey) -> Option<&Assessment> {
        self.index.get(key).map(|&i| &self.assessments[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assessment> {
        self.assessments.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &AssessmentKey> {
        self.assessments.iter().map(Assessment::key)
    }

    /// Locates the assessment for `key`, creating it on first sight
    pub fn entry(&mut self, key: AssessmentKey) -> &mut Assessment {
        let index = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                let i = self.assessments.len();
                self.index.insert(key.clone(), i);
                self.assessments.push(Assessment::new(key));
                i
            }
        };
        &mut self.assessments[index]
    }

    /// Merges every assessment of `other` into this book
    ///
    /// Existing keys absorb the incoming entries under the per-assessment
    /// duplicate rule; new keys are appended in `other`'s order. Returns the
    /// number of entries added across all assessments.
    pub fn merge(&mut self, other: AssessmentBook) -> usize {
        other
            .assessments
            .into_iter()
            .map(|incoming| {
                let key = incoming.key().clone();
                self.entry(key).merge(incoming)
            })
            .sum()
    }

    /// Removes and returns the assessment for `key`
    pub fn remove(&mut self, key: &AssessmentKey) -> Option<Assessment> {
        let index = self.index.remove(key)?;
        let removed = self.assessments.remove(index);
        for slot in self.index.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        Some(removed)
    }
}

impl IntoIterator for AssessmentBook {
    type Item = Assessment;
    type IntoIter = std::vec::IntoIter<Assessment>;

    fn into_iter(self) -> Self::IntoIter {
        self.assessments.into_iter()
    }
}
