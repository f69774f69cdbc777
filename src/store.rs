//! Section store.
//!
//! Holds the candidate sections registered for each course. Courses keep
//! the order in which they were first added, and each course keeps its
//! sections in insertion order. That order is what the scheduler sees,
//! so it determines which feasible timetable is found first.
//!
//! The store is a plain owned value; share it across threads behind a lock.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;
use crate::models::{Section, TimeOfDay, Weekday};

/// A course and its candidate sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course identifier (trimmed, non-empty).
    pub name: String,
    /// Candidate sections, in insertion order.
    pub sections: Vec<Section>,
}

/// Mapping from course identifier to candidate sections.
///
/// # Example
///
/// ```
/// use u_timetable::store::SectionStore;
/// use u_timetable::models::{TimeOfDay, Weekday};
///
/// let mut store = SectionStore::new();
/// let nine = TimeOfDay::new(9, 0).unwrap();
/// let ten = TimeOfDay::new(10, 0).unwrap();
/// store.add_section("Math", Weekday::Monday, nine, ten, "Dr. Noether", "A1").unwrap();
/// store.add_section("Math", Weekday::Tuesday, nine, ten, "Dr. Noether", "A1").unwrap();
/// assert_eq!(store.course_count(), 1);
/// assert_eq!(store.section_count(), 2);
///
/// store.remove_section("Math", 0).unwrap();
/// store.remove_section("Math", 0).unwrap();
/// assert!(store.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Course>", into = "Vec<Course>")]
pub struct SectionStore {
    courses: Vec<Course>,
}

impl From<Vec<Course>> for SectionStore {
    /// Rebuilds a store by inserting every section under its own name, so
    /// empty courses vanish and misfiled sections land in their own course.
    fn from(courses: Vec<Course>) -> Self {
        let mut store = SectionStore::new();
        for section in courses.into_iter().flat_map(|c| c.sections) {
            store.insert(section);
        }
        store
    }
}

impl From<SectionStore> for Vec<Course> {
    fn from(store: SectionStore) -> Self {
        store.courses
    }
}

impl SectionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a candidate section for `course`.
    ///
    /// Fails with [`StoreError::InvalidInput`] if the trimmed course name is
    /// empty or `end <= start`. Leading/trailing whitespace in the course
    /// name is not part of the key.
    pub fn add_section(
        &mut self,
        course: &str,
        day: Weekday,
        start: TimeOfDay,
        end: TimeOfDay,
        instructor: impl Into<String>,
        room: impl Into<String>,
    ) -> Result<(), StoreError> {
        let section = Section::new(course, day, start, end)?
            .with_instructor(instructor)
            .with_room(room);
        self.insert(section);
        Ok(())
    }

    /// Registers an already-validated section under its own course name.
    pub fn insert(&mut self, section: Section) {
        debug!(course = section.name(), section = %section, "adding section");
        match self.courses.iter_mut().find(|c| c.name == section.name()) {
            Some(course) => course.sections.push(section),
            None => self.courses.push(Course {
                name: section.name().to_string(),
                sections: vec![section],
            }),
        }
    }

    /// Removes the section at `index` within `course`, returning it.
    ///
    /// Drops the course entirely once its last section is removed. Fails
    /// with [`StoreError::NotFound`] if the course is unknown or `index` is
    /// out of bounds.
    pub fn remove_section(&mut self, course: &str, index: usize) -> Result<Section, StoreError> {
        let course = course.trim();
        let not_found = || StoreError::NotFound {
            course: course.to_string(),
            index,
        };
        let pos = self
            .courses
            .iter()
            .position(|c| c.name == course)
            .ok_or_else(not_found)?;

        let entry = &mut self.courses[pos];
        if index >= entry.sections.len() {
            return Err(not_found());
        }
        let removed = entry.sections.remove(index);
        if entry.sections.is_empty() {
            self.courses.remove(pos);
            debug!(course, "last section removed, dropping course");
        } else {
            debug!(course, index, "section removed");
        }
        Ok(removed)
    }

    /// Owned copy of every course and its sections, in store order.
    ///
    /// The scheduler reorders the copy; the store is unaffected.
    pub fn snapshot(&self) -> Vec<Course> {
        self.courses.clone()
    }

    /// Candidate sections of a course, in insertion order.
    pub fn sections(&self, course: &str) -> Option<&[Section]> {
        self.courses
            .iter()
            .find(|c| c.name == course)
            .map(|c| c.sections.as_slice())
    }

    /// Course identifiers in first-insertion order.
    pub fn courses(&self) -> impl Iterator<Item = &str> {
        self.courses.iter().map(|c| c.name.as_str())
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Total number of candidate sections across all courses.
    pub fn section_count(&self) -> usize {
        self.courses.iter().map(|c| c.sections.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Removes every course.
    pub fn clear(&mut self) {
        self.courses.clear();
    }
}
