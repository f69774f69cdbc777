//! Assignment (solution) model.
//!
//! An assignment is the set of sections chosen by the scheduler, at most
//! one per course, in the order the courses were assigned.

use serde::{Deserialize, Serialize};

use super::{Section, Weekday};

/// Sections chosen for a timetable, at most one per course.
///
/// Produced by the scheduler with the no-overlap invariant already
/// established; `crate::validation::validate_assignment` re-checks it for
/// assignments obtained elsewhere (e.g. deserialized).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    sections: Vec<Section>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps sections as-is, without checking the timetable invariants.
    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Chosen sections in assignment order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    /// Number of assigned courses.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Finds the section chosen for a course.
    pub fn section_for_course(&self, course: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name() == course)
    }

    /// Sections meeting on `day`, ordered by start time.
    pub fn sections_on(&self, day: Weekday) -> Vec<&Section> {
        let mut on_day: Vec<&Section> = self.sections.iter().filter(|s| s.day() == day).collect();
        on_day.sort_by_key(|s| s.start());
        on_day
    }

    /// Total weekly meeting time in minutes.
    pub fn total_minutes(&self) -> u32 {
        self.sections.iter().map(|s| s.duration_minutes() as u32).sum()
    }

    /// Consumes the assignment, yielding its sections.
    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}
