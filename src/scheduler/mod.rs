//! Timetable search.
//!
//! Chooses one section per course such that no two chosen sections overlap.
//!
//! # Algorithm
//!
//! `BacktrackScheduler` runs an exact depth-first backtracking search with
//! pairwise overlap pruning. It returns the first feasible timetable in a
//! fixed search order (courses in store order, candidates by start time),
//! not an optimal one.
//!
//! # Outcomes
//!
//! An unsatisfiable instance is a normal result ([`Outcome::Infeasible`]),
//! not an error. With [`SearchConfig`] limits set, a search that exceeds them
//! ends in [`Outcome::Timeout`].
//!
//! # References
//!
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Schaerf (1999), "A Survey of Automated Timetabling"

mod backtrack;
mod config;
mod stats;

pub use backtrack::{schedule, BacktrackScheduler};
pub use config::SearchConfig;
pub use stats::SearchStats;

use serde::{Deserialize, Serialize};

use crate::models::Assignment;

/// Result of one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A conflict-free timetable with one section per course.
    Feasible(Assignment),
    /// No combination of candidates avoids every overlap.
    Infeasible,
    /// A search limit was hit before the search concluded.
    Timeout,
}

impl Outcome {
    /// Whether a timetable was found.
    pub fn is_feasible(&self) -> bool {
        matches!(self, Outcome::Feasible(_))
    }

    /// The timetable, if one was found.
    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            Outcome::Feasible(a) => Some(a),
            _ => None,
        }
    }

    /// Consumes the outcome, yielding the timetable if one was found.
    pub fn into_assignment(self) -> Option<Assignment> {
        match self {
            Outcome::Feasible(a) => Some(a),
            _ => None,
        }
    }

    /// Short lowercase label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Feasible(_) => "feasible",
            Outcome::Infeasible => "infeasible",
            Outcome::Timeout => "timeout",
        }
    }
}
