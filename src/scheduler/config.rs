//! Search limits.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Limits applied to one backtracking search.
///
/// The default is unlimited: the search runs until it finds a timetable or
/// proves that none exists. Setting either limit turns a search that would
/// run past it into [`Outcome::Timeout`](super::Outcome::Timeout).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of candidate placements to try.
    pub max_nodes: Option<u64>,
    /// Wall-clock limit in milliseconds.
    pub time_limit_ms: Option<u64>,
}

impl SearchConfig {
    /// Unlimited search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node budget.
    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit_ms(mut self, time_limit_ms: u64) -> Self {
        self.time_limit_ms = Some(time_limit_ms);
        self
    }

    /// Wall-clock limit as a `Duration`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    /// Whether no limit is set.
    pub fn is_unlimited(&self) -> bool {
        self.max_nodes.is_none() && self.time_limit_ms.is_none()
    }
}
