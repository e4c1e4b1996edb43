//! Applies extracted visits to the roster

use crate::core::roster::RosterRepository;
use crate::domain::visit::Visit;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Counters for one application of visits
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplySummary {
    /// Module the visits were scraped for
    pub module: String,

    /// Visits recorded on a roster identity
    pub applied: usize,

    /// Visits whose email matched no identity
    pub unmatched: usize,

    #[serde(skip)]
    pub duration: Duration,
}

impl ApplySummary {
    pub fn total(&self) -> usize {
        self.applied + self.unmatched
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            module = %self.module,
            applied = self.applied,
            unmatched = self.unmatched,
            duration_ms = self.duration.as_millis() as u64,
            "Participation applied"
        );
    }
}

/// Records visits on identities by exact email match
#[derive(Debug, Clone, Default)]
pub struct VisitApplier;

impl VisitApplier {
    pub fn new() -> Self {
        Self
    }

    /// Applies every visit in `visits`; unknown emails are counted and skipped
    pub fn apply(
        &self,
        module: &str,
        visits: impl IntoIterator<Item = Visit>,
        roster: &mut impl RosterRepository,
    ) -> ApplySummary {
        let start = Instant::now();
        let mut summary = ApplySummary {
            module: module.to_string(),
            ..ApplySummary::default()
        };

        for visit in visits {
            let email = visit.email.clone();
            if roster.upsert_visit(&email, visit) {
                summary.applied += 1;
            } else {
                tracing::debug!(email = %email, "No roster identity for participation email");
                summary.unmatched += 1;
            }
        }

        summary.duration = start.elapsed();
        crate::log_batch_complete!("participation", summary.total(), summary.duration);
        summary
    }
}
