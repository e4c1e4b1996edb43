//! Result type alias for Unitrack

use super::errors::UnitrackError;

/// Result type alias for Unitrack operations
///
/// # Examples
///
/// ```
/// use unitrack::domain::result::Result;
/// use unitrack::domain::errors::UnitrackError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(UnitrackError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, UnitrackError>;
