//! Lecture timetabling for the U-Engine ecosystem.
//!
//! Picks one meeting section per course so that no two chosen sections
//! overlap on the same weekday, or proves that no such choice exists.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Weekday`, `TimeOfDay`, `Section`, `Assignment`
//! - **`store`**: `SectionStore`, the course → candidate sections registry
//! - **`scheduler`**: `BacktrackScheduler`, exact depth-first search with
//!   overlap pruning, plus `SearchConfig` limits and `SearchStats`
//! - **`validation`**: Integrity checks for snapshots and timetables
//! - **`layout`**: Weekly grid placement and per-course display colours
//!
//! # Usage
//!
//! ```
//! use u_timetable::models::{TimeOfDay, Weekday};
//! use u_timetable::scheduler::{schedule, Outcome};
//! use u_timetable::store::SectionStore;
//!
//! let t = |h, m| TimeOfDay::new(h, m).unwrap();
//! let mut store = SectionStore::new();
//! store.add_section("Calculus", Weekday::Monday, t(9, 0), t(10, 0), "Leibniz", "M-1").unwrap();
//! store.add_section("Physics", Weekday::Monday, t(9, 30), t(10, 30), "Curie", "P-2").unwrap();
//! store.add_section("Physics", Weekday::Monday, t(10, 0), t(11, 0), "Curie", "P-2").unwrap();
//!
//! match schedule(store.snapshot()) {
//!     Outcome::Feasible(timetable) => assert_eq!(timetable.len(), 2),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6

pub mod error;
pub mod layout;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod validation;

pub use error::StoreError;
