//! Weekly grid layout helpers.
//!
//! Maps timetable sections onto a grid with one column per weekday and one
//! row per fixed-length time slot, and assigns each course a display colour.
//! Rendering itself is left to the caller.
//!
//! # Grid Model
//! - Column = [`Weekday::index`] (Sunday = 0).
//! - Row = slot index from the window start, `floor((t - window_start) / slot)`,
//!   clamped to the window.
//! - Row span = `end_row - start_row`, at least 1.
//!
//! The default window is 08:00–20:00 in 30-minute slots.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::models::{Assignment, Section, TimeOfDay, Weekday};

/// Errors from building a grid layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The visible window is empty or inverted.
    #[error("layout window must end after it starts ({start} - {end})")]
    EmptyWindow { start: TimeOfDay, end: TimeOfDay },
    /// Slot length is zero.
    #[error("slot length must be positive")]
    ZeroSlot,
    /// Slot is longer than the whole window.
    #[error("slot length {slot_minutes} min exceeds the {window_minutes} min window")]
    SlotTooLong {
        slot_minutes: u16,
        window_minutes: u16,
    },
}

/// Position of a section in the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Weekday column (0 = Sunday).
    pub column: usize,
    /// First slot row (0 = window start).
    pub row: usize,
    /// Number of slot rows covered (>= 1).
    pub row_span: usize,
}

/// Visible time window and slot size of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridLayout {
    start: TimeOfDay,
    end: TimeOfDay,
    slot_minutes: u16,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            start: TimeOfDay::from_hm(8, 0),
            end: TimeOfDay::from_hm(20, 0),
            slot_minutes: 30,
        }
    }
}

impl GridLayout {
    /// Creates a layout showing `[start, end)` in `slot_minutes` rows.
    pub fn new(start: TimeOfDay, end: TimeOfDay, slot_minutes: u16) -> Result<Self, LayoutError> {
        if end <= start {
            return Err(LayoutError::EmptyWindow { start, end });
        }
        if slot_minutes == 0 {
            return Err(LayoutError::ZeroSlot);
        }
        let window_minutes = end.minutes() - start.minutes();
        if slot_minutes > window_minutes {
            return Err(LayoutError::SlotTooLong {
                slot_minutes,
                window_minutes,
            });
        }
        Ok(Self {
            start,
            end,
            slot_minutes,
        })
    }

    /// Number of slot rows in the window (a partial last slot counts).
    pub fn slot_count(&self) -> usize {
        let span = self.end.minutes() - self.start.minutes();
        span.div_ceil(self.slot_minutes) as usize
    }

    /// Row labels (`"HH:MM"`) for every slot boundary, window end included.
    pub fn slot_labels(&self) -> Vec<String> {
        let first = u32::from(self.start.minutes());
        let last = u32::from(self.end.minutes());
        let slot = u32::from(self.slot_minutes);
        (0..=self.slot_count() as u32)
            .map(|i| (first + i * slot).min(last) as u16)
            .filter_map(|m| TimeOfDay::from_minutes(m).ok())
            .map(|t| t.to_string())
            .collect()
    }

    /// Grid position of a section, or `None` if it lies outside the window.
    pub fn place(&self, section: &Section) -> Option<Placement> {
        if section.end() <= self.start || section.start() >= self.end {
            return None;
        }
        let row = self.row_of(section.start());
        let end_row = self.row_of(section.end()).min(self.slot_count());
        Some(Placement {
            column: section.day().index(),
            row,
            row_span: end_row.saturating_sub(row).max(1),
        })
    }

    /// Places every section of a timetable that falls inside the window.
    pub fn arrange<'a>(&self, assignment: &'a Assignment) -> Vec<(&'a Section, Placement)> {
        assignment
            .iter()
            .filter_map(|s| self.place(s).map(|p| (s, p)))
            .collect()
    }

    fn row_of(&self, t: TimeOfDay) -> usize {
        let offset = t.minutes().saturating_sub(self.start.minutes());
        (offset / self.slot_minutes) as usize
    }
}

/// Column headers in grid order.
pub fn day_headers() -> [&'static str; 7] {
    Weekday::ALL.map(Weekday::name)
}

/// A display colour in HSL space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue in degrees (0..360).
    pub hue: u16,
    /// Saturation percent.
    pub saturation: u8,
    /// Lightness percent.
    pub lightness: u8,
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

/// Pastel colour for a course, derived only from its name.
///
/// Hue spans 0–359, saturation 60–79 % and lightness 70–79 %, so text stays
/// readable on every course. Equal names always get equal colours.
pub fn course_color(name: &str) -> Hsl {
    let h = fnv1a(name.as_bytes());
    Hsl {
        hue: (h % 360) as u16,
        saturation: 60 + ((h >> 16) % 20) as u8,
        lightness: 70 + ((h >> 32) % 10) as u8,
    }
}

// FNV-1a: stable across platforms and releases, unlike `DefaultHasher`.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |h, &b| (h ^ b as u64).wrapping_mul(PRIME))
}
