//! In-memory roster store

use super::{CodeRegistration, RosterRepository};
use crate::domain::ids::StudentId;
use crate::domain::student::{Identity, StudentResult};
use crate::domain::visit::Visit;
use std::collections::HashMap;

/// In-memory [`RosterRepository`] for one session
///
/// Identities keep the order in which the roster source delivered them;
/// lookups that return "the first match" follow that order.
#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    identities: Vec<Identity>,
    by_id: HashMap<StudentId, usize>,
    code_owners: HashMap<String, StudentId>,
}

impl RosterStore {
    /// Creates an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster, keeping the first identity for each canonical id
    pub fn from_identities(identities: impl IntoIterator<Item = Identity>) -> Self {
        let mut store = Self::new();
        for identity in identities {
            let id = identity.id().clone();
            if !store.insert(identity) {
                tracing::warn!(student_id = %id, "Duplicate student id in roster, keeping first");
            }
        }
        store
    }

    /// Adds an identity unless its canonical id is already present
    ///
    /// Returns true when the identity was added.
    pub fn insert(&mut self, identity: Identity) -> bool {
        if self.by_id.contains_key(identity.id()) {
            return false;
        }
        for code in identity.anonymous_codes() {
            self.code_owners
                .entry(code.clone())
                .or_insert_with(|| identity.id().clone());
        }
        self.by_id
            .insert(identity.id().clone(), self.identities.len());
        self.identities.push(identity);
        true
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Identity with this canonical id
    pub fn get(&self, id: &StudentId) -> Option<&Identity> {
        self.by_id.get(id).map(|&i| &self.identities[i])
    }

    /// Every identity whose label contains `pattern`, in roster order
    pub fn filter<'a>(&'a self, pattern: &str) -> impl Iterator<Item = &'a Identity> + 'a {
        let pattern = pattern.to_string();
        self.identities
            .iter()
            .filter(move |identity| identity.matches_label(&pattern))
    }

    fn get_mut(&mut self, id: &StudentId) -> Option<&mut Identity> {
        let index = *self.by_id.get(id)?;
        self.identities.get_mut(index)
    }

    /// Identity addressed by a student number from a code mapping file
    ///
    /// An exact canonical id wins; otherwise the first label match is used.
    fn find_by_number(&self, student_number: &str) -> Option<StudentId> {
        if let Ok(id) = StudentId::new(student_number) {
            if self.by_id.contains_key(&id) {
                return Some(id);
            }
        }
        self.find_by_label(student_number)
            .map(|identity| identity.id().clone())
    }
}

impl RosterRepository for RosterStore {
    fn identities(&self) -> &[Identity] {
        &self.identities
    }

    fn find_by_label(&self, pattern: &str) -> Option<&Identity> {
        self.identities
            .iter()
            .find(|identity| identity.matches_label(pattern))
    }

    fn find_by_email(&self, email: &str) -> Option<&Identity> {
        self.identities
            .iter()
            .find(|identity| identity.email() == email)
    }

    fn resolve_code(&self, code: &str) -> Option<&Identity> {
        self.identities
            .iter()
            .find(|identity| identity.claims_code(code))
    }

    fn add_result(&mut self, id: &StudentId, result: StudentResult) -> bool {
        match self.get_mut(id) {
            Some(identity) => identity.add_result(result),
            None => false,
        }
    }

    fn upsert_visit(&mut self, email: &str, visit: Visit) -> bool {
        match self
            .identities
            .iter_mut()
            .find(|identity| identity.email() == email)
        {
            Some(identity) => {
                identity.record_visit(visit);
                true
            }
            None => false,
        }
    }

    fn register_anonymous_code(&mut self, student_number: &str, code: &str) -> CodeRegistration {
        if student_number.trim().is_empty() || code.trim().is_empty() {
            return CodeRegistration::NoMatch;
        }

        let Some(id) = self.find_by_number(student_number) else {
            return CodeRegistration::NoMatch;
        };

        if let Some(owner) = self.code_owners.get(code) {
            return CodeRegistration::AlreadyRegistered(owner.clone());
        }

        // Another student's canonical id always resolves to that student
        if let Ok(code_id) = StudentId::new(code) {
            if code_id != id && self.by_id.contains_key(&code_id) {
                return CodeRegistration::AlreadyRegistered(code_id);
            }
        }

        self.code_owners.insert(code.to_string(), id.clone());
        if let Some(identity) = self.get_mut(&id) {
            identity.add_anonymous_code(code);
        }
        CodeRegistration::Registered(id)
    }
}
