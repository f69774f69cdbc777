//! Integrity checks for course snapshots and timetables.
//!
//! The section store and the scheduler maintain these invariants on their
//! own. The checks here are for data that arrives from elsewhere, such as a
//! hand-built or deserialized snapshot, or a timetable loaded from disk.
//!
//! Detects:
//! - Duplicate course identifiers
//! - Courses with no candidates
//! - Sections filed under the wrong course
//! - Overlapping sections in a timetable
//! - Courses missing from, or unknown to, a timetable

use std::collections::HashSet;

use crate::models::Assignment;
use crate::store::Course;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entries share the same course identifier.
    DuplicateCourse,
    /// A course has no candidate sections.
    EmptyCourse,
    /// A section's name differs from the course it is filed under.
    CourseMismatch,
    /// Two sections in a timetable overlap.
    Overlap,
    /// A course with candidates has no section in the timetable.
    MissingCourse,
    /// A timetable section is not among the candidates of its course.
    UnknownSection,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a course snapshot.
///
/// Checks:
/// 1. No duplicate course identifiers
/// 2. Every course has at least one section
/// 3. Every section's name matches its course
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_courses(courses: &[Course]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for course in courses {
        if !names.insert(course.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCourse,
                format!("Duplicate course: {}", course.name),
            ));
        }

        if course.sections.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyCourse,
                format!("Course '{}' has no sections", course.name),
            ));
        }

        for section in &course.sections {
            if section.name() != course.name {
                errors.push(ValidationError::new(
                    ValidationErrorKind::CourseMismatch,
                    format!(
                        "Section '{}' is filed under course '{}'",
                        section, course.name
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a timetable against the courses it was built from.
///
/// Checks:
/// 1. No two sections overlap
/// 2. At most one section per course
/// 3. Every course with candidates has a section
/// 4. Every section is one of its course's candidates
pub fn validate_assignment(assignment: &Assignment, courses: &[Course]) -> ValidationResult {
    let mut errors = Vec::new();
    let sections = assignment.sections();

    // Pairwise overlap
    for (i, a) in sections.iter().enumerate() {
        for b in &sections[i + 1..] {
            if a.overlaps(b) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::Overlap,
                    format!("'{a}' overlaps '{b}'"),
                ));
            }
        }
    }

    // One per course
    let mut seen = HashSet::new();
    for s in sections {
        if !seen.insert(s.name()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCourse,
                format!("Course '{}' is scheduled more than once", s.name()),
            ));
        }
    }

    // Coverage
    for course in courses.iter().filter(|c| !c.sections.is_empty()) {
        if !seen.contains(course.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingCourse,
                format!("Course '{}' has no section in the timetable", course.name),
            ));
        }
    }

    // Provenance
    for s in sections {
        let known = courses
            .iter()
            .find(|c| c.name == s.name())
            .is_some_and(|c| c.sections.contains(s));
        if !known {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSection,
                format!("Section '{s}' is not a candidate"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
