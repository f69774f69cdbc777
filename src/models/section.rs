//! Section (candidate meeting slot) model.
//!
//! A section is one way a course can meet: a weekday plus a half-open
//! interval `[start, end)` on that day, taught by an instructor in a room.
//! Sections are validated on construction and immutable afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{TimeOfDay, Weekday};
use crate::error::StoreError;

/// A candidate meeting slot for a course.
///
/// # Invariants
/// - `name` is non-empty and has no surrounding whitespace.
/// - `end > start`.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Section, TimeOfDay, Weekday};
///
/// let s = Section::new(
///     "Algorithms",
///     Weekday::Monday,
///     TimeOfDay::new(9, 0).unwrap(),
///     TimeOfDay::new(10, 30).unwrap(),
/// )
/// .unwrap()
/// .with_instructor("Dr. Knuth")
/// .with_room("B-101");
/// assert_eq!(s.duration_minutes(), 90);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SectionRecord")]
pub struct Section {
    name: String,
    day: Weekday,
    start: TimeOfDay,
    end: TimeOfDay,
    instructor: String,
    room: String,
}

/// Unvalidated wire form of a [`Section`].
#[derive(Deserialize)]
struct SectionRecord {
    name: String,
    day: Weekday,
    start: TimeOfDay,
    end: TimeOfDay,
    #[serde(default)]
    instructor: String,
    #[serde(default)]
    room: String,
}

impl TryFrom<SectionRecord> for Section {
    type Error = StoreError;

    fn try_from(r: SectionRecord) -> Result<Self, Self::Error> {
        Ok(Section::new(r.name, r.day, r.start, r.end)?
            .with_instructor(r.instructor)
            .with_room(r.room))
    }
}

impl Section {
    /// Creates a section with empty instructor and room.
    ///
    /// The course name is trimmed. Fails with [`StoreError::InvalidInput`]
    /// if the trimmed name is empty or the interval is empty or inverted.
    pub fn new(
        name: impl Into<String>,
        day: Weekday,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> Result<Self, StoreError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidInput(
                "course name must not be empty".into(),
            ));
        }
        if end <= start {
            return Err(StoreError::InvalidInput(format!(
                "section of '{name}' must end after it starts ({start} - {end})"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            day,
            start,
            end,
            instructor: String::new(),
            room: String::new(),
        })
    }

    /// Sets the instructor display name.
    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    /// Sets the room display name.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    /// Owning course identifier.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn day(&self) -> Weekday {
        self.day
    }

    #[inline]
    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    #[inline]
    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    #[inline]
    pub fn instructor(&self) -> &str {
        &self.instructor
    }

    #[inline]
    pub fn room(&self) -> &str {
        &self.room
    }

    /// Length of the meeting in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }

    /// Whether two sections conflict.
    ///
    /// Sections on different days never conflict. On the same day, the
    /// earlier-starting one conflicts iff it ends strictly after the later
    /// one starts, so back-to-back sections (`a.end == b.start`) are allowed.
    pub fn overlaps(&self, other: &Section) -> bool {
        if self.day != other.day {
            return false;
        }
        let (earlier, later) = if self.start <= other.start {
            (self, other)
        } else {
            (other, self)
        };
        earlier.end > later.start
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}-{}", self.name, self.day, self.start, self.end)?;
        if !self.instructor.is_empty() {
            write!(f, ", Lecturer: {}", self.instructor)?;
        }
        if !self.room.is_empty() {
            write!(f, ", Room: {}", self.room)?;
        }
        Ok(())
    }
}
