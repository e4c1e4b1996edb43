//! Cell scanning for scraped participation pages
//!
//! The participation page lays every student out as a run of `<td>` cells
//! tagged `class="cell c3"` through `class="cell c6"`. Cells are matched in
//! document order and their tags removed; everything else on the page is
//! ignored.
//!
//! Tag stripping is the only change made before classification. Entities
//! and whitespace are tidied afterwards with [`tidy`], so a cell such as
//! `St John&#39;s` still reads as a time.

use crate::domain::{Result, UnitrackError};
use regex::{Matches, Regex};

/// Class markers of the cells that carry participation fields
pub const CELL_CLASSES: [&str; 4] = ["c3", "c4", "c5", "c6"];

const CELL_PATTERN: &str = r#"(?s)<td\s*class\s*=\s*"cell\s*(?:c3|c4|c5|c6)"[^>]*>.*?</td>"#;
const TAG_PATTERN: &str = r"<[^>]*>";

/// Compiled patterns for finding and cleaning participation cells
#[derive(Debug, Clone)]
pub struct CellMatcher {
    cell: Regex,
    tag: Regex,
}

impl CellMatcher {
    /// Compiles the cell and tag patterns
    ///
    /// # Errors
    ///
    /// Returns [`UnitrackError::Other`] if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| {
                UnitrackError::Other(format!("Invalid participation pattern {pattern}: {e}"))
            })
        };

        Ok(Self {
            cell: compile(CELL_PATTERN)?,
            tag: compile(TAG_PATTERN)?,
        })
    }

    /// Tag-stripped contents of every participation cell in `html`, in order
    ///
    /// # Examples
    ///
    /// ```
    /// use unitrack::core::participation::cells::CellMatcher;
    ///
    /// let matcher = CellMatcher::new().unwrap();
    /// let html = r#"<td class="cell c3"><a href="/user/7">ada@uni.ac.uk</a></td>
    ///               <td class="cell c1">ignored</td>
    ///               <td class="cell c6">2&nbsp;days</td>"#;
    ///
    /// let texts: Vec<String> = matcher.cells(html).collect();
    /// assert_eq!(texts, vec!["ada@uni.ac.uk", "2&nbsp;days"]);
    /// ```
    pub fn cells<'a>(&'a self, html: &'a str) -> CellTexts<'a> {
        CellTexts {
            matches: self.cell.find_iter(html),
            tag: &self.tag,
        }
    }

    /// Removes markup from one matched cell
    pub fn strip(&self, raw: &str) -> String {
        self.tag.replace_all(raw, "").into_owned()
    }
}

/// Forward-only iterator over tag-stripped cell texts
#[derive(Debug)]
pub struct CellTexts<'a> {
    matches: Matches<'a, 'a>,
    tag: &'a Regex,
}

impl Iterator for CellTexts<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.matches
            .next()
            .map(|m| self.tag.replace_all(m.as_str(), "").into_owned())
    }
}

/// Display form of a classified field: entities decoded, whitespace collapsed
///
/// # Examples
///
/// ```
/// use unitrack::core::participation::cells::tidy;
///
/// assert_eq!(tidy("\n  St John&#39;s&nbsp; "), "St John's");
/// ```
pub fn tidy(text: &str) -> String {
    normalize_ws(&decode_entities(text))
}

/// Decodes the handful of entities the participation page emits
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Collapses whitespace runs to single spaces and trims the ends
pub fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
