//! Roster repository
//!
//! The roster is the single source of truth for identities during a
//! session. All mutation funnels through [`RosterRepository`] so a
//! single-writer discipline (a mutex or an actor) can be put around it
//! without touching the pipeline.

pub mod store;

pub use store::RosterStore;

use crate::domain::ids::StudentId;
use crate::domain::student::{Identity, StudentResult};
use crate::domain::visit::Visit;

/// Outcome of registering an anonymous code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeRegistration {
    /// The code was attached to the identity with this id
    Registered(StudentId),

    /// The code already belongs to an identity; the first registration wins
    AlreadyRegistered(StudentId),

    /// No identity matched the student number
    NoMatch,
}

impl CodeRegistration {
    /// Returns true when a roster identity matched the student number
    pub fn is_match(&self) -> bool {
        !matches!(self, CodeRegistration::NoMatch)
    }
}

/// Operations the pipeline may perform on the roster
pub trait RosterRepository {
    /// All identities in roster order
    fn identities(&self) -> &[Identity];

    /// First identity whose label contains `pattern`, case-insensitively
    fn find_by_label(&self, pattern: &str) -> Option<&Identity>;

    /// Identity with exactly this email
    fn find_by_email(&self, email: &str) -> Option<&Identity>;

    /// First identity, in roster order, that claims `code`
    ///
    /// A code is claimed when it equals the canonical id or is one of the
    /// identity's registered anonymous codes.
    fn resolve_code(&self, code: &str) -> Option<&Identity>;

    /// Appends a result to the identity with `id`
    ///
    /// Returns true when the result was new for that identity.
    fn add_result(&mut self, id: &StudentId, result: StudentResult) -> bool;

    /// Records `visit` on the identity with exactly `email`
    ///
    /// Unknown emails are ignored. Returns true when an identity was found.
    fn upsert_visit(&mut self, email: &str, visit: Visit) -> bool;

    /// Attaches `code` to the identity matching `student_number`
    fn register_anonymous_code(&mut self, student_number: &str, code: &str) -> CodeRegistration;
}
