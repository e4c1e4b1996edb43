//! Field classification for participation rows
//!
//! A participation row is two, three or four consecutive cells and nothing
//! in the markup says which. The first cell is always the email; after
//! that each cell is classified by its content: anything equal to `now` or
//! containing a digit is the elapsed time and closes the row.
//!
//! ```text
//! Email --cell--> Field2 --time-like--> done (town "", country "")
//!                   |
//!                   +--other--> Field3 --time-like--> done (country = previous cell)
//!                                 |
//!                                 +--other--> Time --cell--> done
//! ```
//!
//! Place names containing digits are read as times. That misclassification
//! is accepted.

use crate::domain::visit::NOW_TOKEN;

/// Returns true when `text` reads as an elapsed time
///
/// # Examples
///
/// ```
/// use unitrack::core::participation::classifier::is_time_like;
///
/// assert!(is_time_like("now"));
/// assert!(is_time_like("2 days 3 hours"));
/// assert!(is_time_like("Paris4"));
/// assert!(!is_time_like("London"));
/// assert!(!is_time_like("Now"));
/// ```
pub fn is_time_like(text: &str) -> bool {
    text == NOW_TOKEN || text.chars().any(|c| c.is_ascii_digit())
}

/// Fields of one classified row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFields {
    pub email: String,
    pub time: String,
    pub town: String,
    pub country: String,
}

impl RowFields {
    /// A row is kept only with a non-blank email and time
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.time.trim().is_empty()
    }
}

/// Position within the current row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum RowState {
    #[default]
    Email,
    Field2 {
        email: String,
    },
    Field3 {
        email: String,
        town: String,
    },
    Time {
        email: String,
        town: String,
        country: String,
    },
}

#[derive(Debug)]
enum Transition {
    Next(RowState),
    Done(RowFields),
}

impl RowState {
    fn advance(self, cell: String) -> Transition {
        match self {
            RowState::Email => Transition::Next(RowState::Field2 { email: cell }),
            RowState::Field2 { email } if is_time_like(&cell) => Transition::Done(RowFields {
                email,
                time: cell,
                ..RowFields::default()
            }),
            RowState::Field2 { email } => Transition::Next(RowState::Field3 { email, town: cell }),
            // Country and time without a town: the cell taken as town was the country
            RowState::Field3 { email, town } if is_time_like(&cell) => {
                Transition::Done(RowFields {
                    email,
                    time: cell,
                    town: String::new(),
                    country: town,
                })
            }
            RowState::Field3 { email, town } => Transition::Next(RowState::Time {
                email,
                town,
                country: cell,
            }),
            RowState::Time {
                email,
                town,
                country,
            } => Transition::Done(RowFields {
                email,
                time: cell,
                town,
                country,
            }),
        }
    }
}

/// Groups a stream of cell texts into classified rows
///
/// Incomplete rows are dropped, as is a row cut short by the end of the
/// input. The classifier never rewinds: once the cells are exhausted it
/// keeps returning `None`.
#[derive(Debug)]
pub struct FieldClassifier<I> {
    cells: I,
    state: RowState,
    exhausted: bool,
}

impl<I> FieldClassifier<I>
where
    I: Iterator<Item = String>,
{
    pub fn new(cells: I) -> Self {
        Self {
            cells,
            state: RowState::Email,
            exhausted: false,
        }
    }
}

impl<I> Iterator for FieldClassifier<I>
where
    I: Iterator<Item = String>,
{
    type Item = RowFields;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.exhausted {
            let Some(cell) = self.cells.next() else {
                self.exhausted = true;
                if self.state != RowState::Email {
                    tracing::trace!("Participation input ended mid-row, partial row dropped");
                }
                break;
            };

            match std::mem::take(&mut self.state).advance(cell) {
                Transition::Next(state) => self.state = state,
                Transition::Done(fields) if fields.is_complete() => return Some(fields),
                Transition::Done(fields) => {
                    tracing::trace!(email = %fields.email, "Incomplete participation row dropped");
                }
            }
        }
        None
    }
}

impl<I> std::iter::FusedIterator for FieldClassifier<I> where I: Iterator<Item = String> {}
