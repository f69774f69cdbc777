//! Error types for section registration and removal.

use thiserror::Error;

use crate::models::TimeError;

/// Errors raised at the section store boundary.
///
/// The scheduler itself never fails: an unsatisfiable timetable is reported
/// as [`Outcome::Infeasible`](crate::scheduler::Outcome::Infeasible).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Malformed section data (blank course name, empty or inverted interval).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Removal target does not exist.
    #[error("section not found: course '{course}', index {index}")]
    NotFound { course: String, index: usize },
}

impl From<TimeError> for StoreError {
    fn from(err: TimeError) -> Self {
        StoreError::InvalidInput(err.to_string())
    }
}
