//! Search statistics.
//!
//! Counters collected during one backtracking search. Useful for judging
//! how hard an instance is and for sizing [`SearchConfig`](super::SearchConfig)
//! limits.
//!
//! | Counter | Definition |
//! |---------|-----------|
//! | Nodes explored | Candidate sections tested against the partial timetable |
//! | Commits | Candidates placed (passed the overlap check) |
//! | Backtracks | Placements undone after the subtree below failed |
//! | Max depth | Largest number of simultaneously placed sections |

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Counters for one search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Number of courses searched over (courses with at least one candidate).
    pub courses: usize,
    /// Candidate placements tested.
    pub nodes_explored: u64,
    /// Candidates committed to the partial timetable.
    pub commits: u64,
    /// Commits undone on backtrack.
    pub backtracks: u64,
    /// Deepest partial timetable reached.
    pub max_depth: usize,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

impl SearchStats {
    /// Fraction of tested candidates rejected by the overlap check (0.0..1.0).
    pub fn prune_rate(&self) -> f64 {
        if self.nodes_explored == 0 {
            return 0.0;
        }
        (self.nodes_explored - self.commits) as f64 / self.nodes_explored as f64
    }

    /// Whether the first candidate path succeeded with no backtracking.
    pub fn is_backtrack_free(&self) -> bool {
        self.backtracks == 0
    }
}
