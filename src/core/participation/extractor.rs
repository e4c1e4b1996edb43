//! Participation extraction

use super::cells::{tidy, CellMatcher, CellTexts};
use super::classifier::FieldClassifier;
use crate::domain::visit::Visit;
use crate::domain::Result;

/// Turns a scraped participation page into visit records for one module
#[derive(Debug, Clone)]
pub struct ParticipationExtractor {
    module: String,
    matcher: CellMatcher,
}

impl ParticipationExtractor {
    /// Creates an extractor tagging every visit with `module`
    ///
    /// # Errors
    ///
    /// Fails only if the cell patterns cannot be compiled.
    pub fn new(module: impl Into<String>) -> Result<Self> {
        Ok(Self {
            module: module.into(),
            matcher: CellMatcher::new()?,
        })
    }

    /// Module tag applied to extracted visits
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Scans `html` and yields its visits in document order
    ///
    /// The returned iterator is single-pass; call `extract` again to rescan.
    ///
    /// # Examples
    ///
    /// ```
    /// use unitrack::core::participation::ParticipationExtractor;
    ///
    /// let html = r#"
    ///     <tr><td class="cell c3">ada@uni.ac.uk</td><td class="cell c6">now</td></tr>
    ///     <tr><td class="cell c3">alan@uni.ac.uk</td><td class="cell c4">Leeds</td>
    ///         <td class="cell c5">UK</td><td class="cell c6">2 days</td></tr>
    /// "#;
    ///
    /// let extractor = ParticipationExtractor::new("CS101").unwrap();
    /// let visits: Vec<_> = extractor.extract(html).collect();
    ///
    /// assert_eq!(visits.len(), 2);
    /// assert_eq!(visits[1].to_string(), "CS101 last visited: 2 days ago");
    /// assert_eq!(visits[1].town, "Leeds");
    /// ```
    pub fn extract<'a>(&'a self, html: &'a str) -> Visits<'a> {
        Visits {
            module: &self.module,
            rows: FieldClassifier::new(self.matcher.cells(html)),
        }
    }
}

/// Forward-only sequence of visits from one page
#[derive(Debug)]
pub struct Visits<'a> {
    module: &'a str,
    rows: FieldClassifier<CellTexts<'a>>,
}

impl Iterator for Visits<'_> {
    type Item = Visit;

    fn next(&mut self) -> Option<Self::Item> {
        // Rows are classified on tag-stripped text; fields are tidied after
        for row in self.rows.by_ref() {
            let (email, time) = (tidy(&row.email), tidy(&row.time));
            if email.is_empty() || time.is_empty() {
                tracing::trace!(email = %row.email, "Participation row blank once tidied, dropped");
                continue;
            }
            return Some(Visit::new(
                self.module,
                email,
                time,
                tidy(&row.town),
                tidy(&row.country),
            ));
        }
        None
    }
}

impl std::iter::FusedIterator for Visits<'_> {}
