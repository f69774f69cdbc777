//! Timetabling domain models.
//!
//! Provides the data types shared by the section store, the scheduler and
//! the layout helpers.
//!
//! # Domain Mappings
//!
//! | u-timetable | University | Clinic | Sports Club |
//! |-------------|-----------|--------|-------------|
//! | Course | Lecture | Treatment | Training Group |
//! | Section | Lecture Slot | Appointment Slot | Session |
//! | Assignment | Weekly Timetable | Weekly Plan | Weekly Roster |

mod assignment;
mod section;
mod time;

pub use assignment::Assignment;
pub use section::Section;
pub use time::{TimeError, TimeOfDay, Weekday};
