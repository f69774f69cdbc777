//! Depth-first backtracking scheduler.
//!
//! # Algorithm
//!
//! 1. Drop courses with no candidates, then stable-sort each course's
//!    candidates by start time (ties keep insertion order).
//! 2. Walk courses in snapshot order. For the current course, advance its
//!    cursor to the next candidate that overlaps no committed section,
//!    commit it and descend to the next course.
//! 3. When a course runs out of candidates, pop its frame and undo the
//!    previous course's commit; that course resumes from its cursor.
//! 4. Committing the last course yields the timetable. Popping the first
//!    course's frame proves infeasibility.
//!
//! The search keeps an explicit stack of cursors (one per assigned course
//! plus the one being tried) over an append/truncate-only buffer of
//! committed sections, so recursion depth never depends on course count.
//!
//! # Complexity
//! O(Π cᵢ · n) worst case, where cᵢ is the candidate count of course i and n
//! the number of courses. The overlap check prunes a branch as soon as it is
//! locally inconsistent but does not improve the exponential bound.
//!
//! # Reference
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach",
//! Ch. 6.3: Backtracking Search for CSPs

use std::time::Instant;

use tracing::{debug, trace};

use super::{Outcome, SearchConfig, SearchStats};
use crate::models::{Assignment, Section};
use crate::store::Course;

/// Nodes between wall-clock checks.
const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Exact backtracking scheduler.
///
/// Returns the first conflict-free timetable in search order, not an optimal
/// one. The search is deterministic: the same snapshot always yields the same
/// outcome.
///
/// # Example
///
/// ```
/// use u_timetable::models::{TimeOfDay, Weekday};
/// use u_timetable::scheduler::{BacktrackScheduler, Outcome};
/// use u_timetable::store::SectionStore;
///
/// let t = |h| TimeOfDay::new(h, 0).unwrap();
/// let mut store = SectionStore::new();
/// store.add_section("A", Weekday::Monday, t(9), t(10), "", "").unwrap();
/// store.add_section("A", Weekday::Monday, t(10), t(11), "", "").unwrap();
/// store.add_section("B", Weekday::Monday, t(9), t(10), "", "").unwrap();
///
/// let outcome = BacktrackScheduler::new().schedule(store.snapshot());
/// let timetable = outcome.assignment().unwrap();
/// assert_eq!(timetable.section_for_course("A").unwrap().start(), t(10));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BacktrackScheduler {
    config: SearchConfig,
}

impl BacktrackScheduler {
    /// Creates a scheduler with no search limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler with the given limits.
    pub fn with_config(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Current search limits.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Chooses one section per course with no two overlapping.
    pub fn schedule(&self, courses: Vec<Course>) -> Outcome {
        self.schedule_with_stats(courses).0
    }

    /// Like [`schedule`](Self::schedule), also returning search counters.
    pub fn schedule_with_stats(&self, courses: Vec<Course>) -> (Outcome, SearchStats) {
        let started = Instant::now();
        let deadline = self.config.time_limit().map(|limit| started + limit);

        let mut candidates: Vec<Vec<Section>> = courses
            .into_iter()
            .filter(|c| !c.sections.is_empty())
            .map(|c| c.sections)
            .collect();
        for list in &mut candidates {
            list.sort_by_key(|s| s.start());
        }

        let mut stats = SearchStats {
            courses: candidates.len(),
            ..Default::default()
        };
        debug!(
            courses = stats.courses,
            max_nodes = ?self.config.max_nodes,
            time_limit_ms = ?self.config.time_limit_ms,
            "starting backtracking search"
        );

        let outcome = search(&candidates, &self.config, deadline, &mut stats);
        stats.elapsed = started.elapsed();

        debug!(
            outcome = outcome.label(),
            nodes = stats.nodes_explored,
            backtracks = stats.backtracks,
            elapsed_us = stats.elapsed.as_micros() as u64,
            "search finished"
        );
        (outcome, stats)
    }
}

/// Schedules with an unlimited [`BacktrackScheduler`].
pub fn schedule(courses: Vec<Course>) -> Outcome {
    BacktrackScheduler::new().schedule(courses)
}

fn search(
    candidates: &[Vec<Section>],
    config: &SearchConfig,
    deadline: Option<Instant>,
    stats: &mut SearchStats,
) -> Outcome {
    let n = candidates.len();
    if n == 0 {
        return Outcome::Feasible(Assignment::new());
    }

    // committed[d] is the section chosen for course d; cursors[d] is the
    // next candidate index to try for course d. cursors.len() == committed.len() + 1
    // while a course is being tried.
    let mut committed: Vec<&Section> = Vec::with_capacity(n);
    let mut cursors: Vec<usize> = Vec::with_capacity(n);
    cursors.push(0);

    while let Some(cursor) = cursors.last_mut() {
        let depth = committed.len();
        let options = &candidates[depth];

        let mut placed = None;
        while *cursor < options.len() {
            let candidate = &options[*cursor];
            *cursor += 1;
            stats.nodes_explored += 1;

            if limit_reached(config, deadline, stats.nodes_explored) {
                return Outcome::Timeout;
            }
            if !committed.iter().any(|c| c.overlaps(candidate)) {
                placed = Some(candidate);
                break;
            }
        }

        match placed {
            Some(section) => {
                trace!(depth, section = %section, "commit");
                committed.push(section);
                stats.commits += 1;
                stats.max_depth = stats.max_depth.max(committed.len());
                if committed.len() == n {
                    let sections = committed.into_iter().cloned().collect();
                    return Outcome::Feasible(Assignment::from_sections(sections));
                }
                cursors.push(0);
            }
            None => {
                cursors.pop();
                if let Some(undone) = committed.pop() {
                    trace!(depth = depth - 1, section = %undone, "backtrack");
                    stats.backtracks += 1;
                }
            }
        }
    }

    Outcome::Infeasible
}

fn limit_reached(config: &SearchConfig, deadline: Option<Instant>, nodes: u64) -> bool {
    if config.max_nodes.is_some_and(|max| nodes > max) {
        return true;
    }
    match deadline {
        Some(deadline) if nodes % CLOCK_CHECK_INTERVAL == 0 => Instant::now() >= deadline,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimeOfDay, Weekday};
    use crate::store::SectionStore;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn t(h: u8, m: u8) -> TimeOfDay {
        TimeOfDay::new(h, m).unwrap()
    }

    fn add(store: &mut SectionStore, course: &str, day: Weekday, start: TimeOfDay, end: TimeOfDay) {
        store.add_section(course, day, start, end, "", "").unwrap();
    }

    fn add_with_room(
        store: &mut SectionStore,
        course: &str,
        day: Weekday,
        start: TimeOfDay,
        end: TimeOfDay,
        room: &str,
    ) {
        store.add_section(course, day, start, end, "", room).unwrap();
    }

    fn assert_conflict_free(assignment: &Assignment) {
        let sections = assignment.sections();
        for i in 0..sections.len() {
            for j in (i + 1)..sections.len() {
                assert!(
                    !sections[i].overlaps(&sections[j]),
                    "Overlap detected: {} and {}",
                    sections[i],
                    sections[j],
                );
                assert_ne!(sections[i].name(), sections[j].name());
            }
        }
    }

    #[test]
    fn test_empty_input_is_feasible() {
        let outcome = schedule(Vec::new());
        assert_eq!(outcome, Outcome::Feasible(Assignment::new()));
    }

    #[test]
    fn test_single_course_takes_earliest() {
        let mut store = SectionStore::new();
        add(&mut store, "A", Weekday::Monday, t(14, 0), t(15, 0));
        add(&mut store, "A", Weekday::Monday, t(9, 0), t(10, 0));

        let outcome = schedule(store.snapshot());
        let a = outcome.assignment().unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(a.sections()[0].start(), t(9, 0));
    }

    #[test]
    fn test_mutual_overlap_is_infeasible() {
        let mut store = SectionStore::new();
        add(&mut store, "A", Weekday::Monday, t(9, 0), t(10, 0));
        add(&mut store, "B", Weekday::Monday, t(9, 30), t(10, 30));

        assert_eq!(schedule(store.snapshot()), Outcome::Infeasible);
    }

    #[test]
    fn test_touching_sections_scheduled_together() {
        let mut store = SectionStore::new();
        add(&mut store, "A", Weekday::Monday, t(9, 0), t(10, 0));
        add(&mut store, "B", Weekday::Monday, t(10, 0), t(11, 0));

        let outcome = schedule(store.snapshot());
        let a = outcome.assignment().unwrap();
        assert_eq!(a.len(), 2);
        assert!(a.section_for_course("A").is_some());
        assert!(a.section_for_course("B").is_some());
    }

    #[test]
    fn test_both_options_overlapping_is_infeasible() {
        // B 09:30-10:30 overlaps A 09:00-10:00 and A 10:00-11:00 alike.
        let mut store = SectionStore::new();
        add(&mut store, "A", Weekday::Monday, t(9, 0), t(10, 0));
        add(&mut store, "A", Weekday::Monday, t(10, 0), t(11, 0));
        add(&mut store, "B", Weekday::Monday, t(9, 30), t(10, 30));

        let (outcome, stats) = BacktrackScheduler::new().schedule_with_stats(store.snapshot());
        assert_eq!(outcome, Outcome::Infeasible);
        assert_eq!(stats.commits, 2);
        assert_eq!(stats.backtracks, 2);
        assert_eq!(stats.nodes_explored, 4);
    }

    #[test]
    fn test_backtracking_chooses_later_section() {
        // A: Mon 08:00-09:00 or Mon 10:30-11:30; B: Mon 08:30-10:00 only.
        let mut store = SectionStore::new();
        add(&mut store, "A", Weekday::Monday, t(8, 0), t(9, 0));
        add(&mut store, "A", Weekday::Monday, t(10, 30), t(11, 30));
        add(&mut store, "B", Weekday::Monday, t(8, 30), t(10, 0));

        let (outcome, stats) = BacktrackScheduler::new().schedule_with_stats(store.snapshot());
        let a = outcome.assignment().unwrap();
        assert_eq!(a.section_for_course("A").unwrap().start(), t(10, 30));
        assert_eq!(a.section_for_course("B").unwrap().start(), t(8, 30));
        assert_eq!(stats.backtracks, 1);
        assert_conflict_free(a);
    }

    #[test]
    fn test_backtracks_across_multiple_levels() {
        // C only fits if A takes its second option, which forces B to its second.
        let mut store = SectionStore::new();
        add(&mut store, "A", Weekday::Tuesday, t(9, 0), t(10, 0));
        add(&mut store, "A", Weekday::Tuesday, t(11, 0), t(12, 0));
        add(&mut store, "B", Weekday::Tuesday, t(10, 0), t(11, 0));
        add(&mut store, "B", Weekday::Tuesday, t(12, 0), t(13, 0));
        add(&mut store, "C", Weekday::Tuesday, t(8, 30), t(10, 30));

        let outcome = schedule(store.snapshot());
        let a = outcome.assignment().unwrap();
        assert_eq!(a.section_for_course("A").unwrap().start(), t(11, 0));
        assert_eq!(a.section_for_course("B").unwrap().start(), t(12, 0));
        assert_eq!(a.section_for_course("C").unwrap().start(), t(8, 30));
        assert_conflict_free(a);
    }

    #[test]
    fn test_different_days_do_not_conflict() {
        let mut store = SectionStore::new();
        add(&mut store, "A", Weekday::Monday, t(9, 0), t(10, 0));
        add(&mut store, "B", Weekday::Tuesday, t(9, 0), t(10, 0));
        add(&mut store, "C", Weekday::Wednesday, t(9, 0), t(10, 0));

        let (outcome, stats) = BacktrackScheduler::new().schedule_with_stats(store.snapshot());
        assert_eq!(outcome.assignment().unwrap().len(), 3);
        assert!(stats.is_backtrack_free());
        assert_eq!(stats.nodes_explored, 3);
    }

    #[test]
    fn test_result_follows_course_insertion_order() {
        let mut store = SectionStore::new();
        add(&mut store, "Zoology", Weekday::Friday, t(9, 0), t(10, 0));
        add(&mut store, "Algebra", Weekday::Monday, t(9, 0), t(10, 0));

        let outcome = schedule(store.snapshot());
        let names: Vec<&str> = outcome.assignment().unwrap().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Zoology", "Algebra"]);
    }

    #[test]
    fn test_stable_sort_under_tied_starts() {
        let mut store = SectionStore::new();
        add_with_room(&mut store, "A", Weekday::Monday, t(11, 0), t(12, 0), "late");
        add_with_room(&mut store, "A", Weekday::Monday, t(9, 0), t(10, 0), "first");
        add_with_room(&mut store, "A", Weekday::Monday, t(9, 0), t(11, 0), "second");

        let outcome = schedule(store.snapshot());
        assert_eq!(outcome.assignment().unwrap().sections()[0].room(), "first");

        // When the first tied candidate conflicts, the second tied one is tried next.
        add(&mut store, "B", Weekday::Monday, t(9, 30), t(10, 0));
        let outcome = schedule(store.snapshot());
        let a = outcome.assignment().unwrap();
        assert_eq!(a.section_for_course("A").unwrap().room(), "late");

        let mut store = SectionStore::new();
        add_with_room(&mut store, "A", Weekday::Monday, t(9, 0), t(10, 0), "first");
        add_with_room(&mut store, "A", Weekday::Monday, t(9, 0), t(9, 30), "second");
        add(&mut store, "B", Weekday::Monday, t(9, 45), t(11, 0));
        let outcome = schedule(store.snapshot());
        assert_eq!(
            outcome.assignment().unwrap().section_for_course("A").unwrap().room(),
            "second"
        );
    }

    #[test]
    fn test_schedule_does_not_reorder_store() {
        let mut store = SectionStore::new();
        add(&mut store, "A", Weekday::Monday, t(15, 0), t(16, 0));
        add(&mut store, "A", Weekday::Monday, t(8, 0), t(9, 0));

        let _ = schedule(store.snapshot());
        assert_eq!(store.sections("A").unwrap()[0].start(), t(15, 0));
    }

    #[test]
    fn test_course_without_candidates_is_skipped() {
        let mut store = SectionStore::new();
        add(&mut store, "A", Weekday::Monday, t(9, 0), t(10, 0));
        let mut snapshot = store.snapshot();
        snapshot.push(Course {
            name: "Empty".into(),
            sections: Vec::new(),
        });

        let (outcome, stats) = BacktrackScheduler::new().schedule_with_stats(snapshot);
        assert_eq!(outcome.assignment().unwrap().len(), 1);
        assert_eq!(stats.courses, 1);
    }

    #[test]
    fn test_deterministic() {
        let mut store = SectionStore::new();
        for (i, course) in ["A", "B", "C", "D"].iter().enumerate() {
            for h in 8..12u8 {
                add(&mut store, course, Weekday::Monday, t(h, 0), t(h + 1 + (i as u8 % 2), 0));
            }
        }
        let first = schedule(store.snapshot());
        for _ in 0..5 {
            assert_eq!(schedule(store.snapshot()), first);
        }
    }

    #[test]
    fn test_node_budget_times_out() {
        // Pigeonhole: 5 courses, 4 identical slots each. Infeasible, and proving it
        // takes far more than 10 placements.
        let mut store = SectionStore::new();
        for course in ["A", "B", "C", "D", "E"] {
            for h in 9..13u8 {
                add(&mut store, course, Weekday::Monday, t(h, 0), t(h + 1, 0));
            }
        }

        let limited = BacktrackScheduler::with_config(SearchConfig::new().with_max_nodes(10));
        let (outcome, stats) = limited.schedule_with_stats(store.snapshot());
        assert_eq!(outcome, Outcome::Timeout);
        assert_eq!(stats.nodes_explored, 11);

        assert_eq!(schedule(store.snapshot()), Outcome::Infeasible);
    }

    #[test]
    fn test_time_limit_times_out() {
        // 7 courses, 6 identical slots: infeasible, and the search passes the
        // first clock check long before it can prove that.
        let mut store = SectionStore::new();
        for course in ["A", "B", "C", "D", "E", "F", "G"] {
            for h in 9..15u8 {
                add(&mut store, course, Weekday::Monday, t(h, 0), t(h + 1, 0));
            }
        }

        let limited = BacktrackScheduler::with_config(SearchConfig::new().with_time_limit_ms(0));
        let (outcome, stats) = limited.schedule_with_stats(store.snapshot());
        assert_eq!(outcome, Outcome::Timeout);
        assert!(stats.nodes_explored > 0);
        assert_eq!(stats.nodes_explored % CLOCK_CHECK_INTERVAL, 0);
    }

    #[test]
    fn test_generous_budget_matches_unlimited() {
        let mut store = SectionStore::new();
        add(&mut store, "A", Weekday::Monday, t(9, 0), t(10, 0));
        add(&mut store, "A", Weekday::Monday, t(10, 0), t(11, 0));
        add(&mut store, "B", Weekday::Monday, t(9, 0), t(10, 0));

        let limited = BacktrackScheduler::with_config(
            SearchConfig::new().with_max_nodes(1_000).with_time_limit_ms(60_000),
        );
        assert_eq!(limited.schedule(store.snapshot()), schedule(store.snapshot()));
    }

    /// Exhaustive oracle: does any one-per-course choice avoid all overlaps?
    fn brute_force_feasible(courses: &[Course]) -> bool {
        fn go(courses: &[Course], chosen: &mut Vec<Section>) -> bool {
            let Some((first, rest)) = courses.split_first() else {
                return true;
            };
            for s in &first.sections {
                if chosen.iter().all(|c| !c.overlaps(s)) {
                    chosen.push(s.clone());
                    if go(rest, chosen) {
                        return true;
                    }
                    chosen.pop();
                }
            }
            false
        }
        go(courses, &mut Vec::new())
    }

    #[test]
    fn test_random_instances_against_oracle() {
        let mut rng = StdRng::seed_from_u64(0x5EC7_1045);
        let names = ["A", "B", "C", "D", "E"];

        for _ in 0..200 {
            let mut store = SectionStore::new();
            let course_count = rng.random_range(1..=names.len());
            for name in &names[..course_count] {
                for _ in 0..rng.random_range(1..=3) {
                    let day = Weekday::ALL[rng.random_range(0..2)];
                    let start = rng.random_range(16..36u16) * 30;
                    let len = rng.random_range(1..=4u16) * 30;
                    add(
                        &mut store,
                        name,
                        day,
                        TimeOfDay::from_minutes(start).unwrap(),
                        TimeOfDay::from_minutes(start + len).unwrap(),
                    );
                }
            }

            let snapshot = store.snapshot();
            let expected = brute_force_feasible(&snapshot);
            match schedule(snapshot) {
                Outcome::Feasible(a) => {
                    assert!(expected);
                    assert_eq!(a.len(), store.course_count());
                    assert_conflict_free(&a);
                }
                Outcome::Infeasible => assert!(!expected),
                Outcome::Timeout => panic!("unlimited search timed out"),
            }
        }
    }
}
