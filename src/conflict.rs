//! Resource conflict detection.
//!
//! A candidate assignment conflicts with a stored assignment `E` along a
//! resource dimension `R` iff all of the following hold:
//!
//! 1. `R(E) == R(candidate)` (same room code, lecturer, or class)
//! 2. same weekday
//! 3. same batch (`None` only matches `None`)
//! 4. the academic periods overlap (strict; touching dates do not count)
//! 5. the time-of-day intervals overlap (strict; adjacent slots do not count)
//!
//! The three dimensions share one predicate, parameterized by a
//! resource-key selector ([`ConflictDimension::key`]). Insert and update use
//! the same search; updates pass the record's own id as `exclude`.
//!
//! Dimensions are checked in priority order room → lecturer → class.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ScheduleError, ScheduleResult};
use crate::models::{AcademicPeriod, AssignmentId, ScheduleAssignment, Timetable};

/// A resource axis along which overlap is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictDimension {
    Room,
    Lecturer,
    Class,
}

impl ConflictDimension {
    /// All dimensions in reporting priority order.
    pub const ALL: [Self; 3] = [Self::Room, Self::Lecturer, Self::Class];

    /// Selects this dimension's resource key from an assignment.
    #[inline]
    pub fn key<'a>(&self, assignment: &'a ScheduleAssignment) -> &'a str {
        match self {
            Self::Room => &assignment.room_code,
            Self::Lecturer => &assignment.lecturer_id,
            Self::Class => &assignment.class_id,
        }
    }

    /// Machine-readable rejection reason, e.g. `room-conflict`.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Room => "room-conflict",
            Self::Lecturer => "lecturer-conflict",
            Self::Class => "class-conflict",
        }
    }
}

impl fmt::Display for ConflictDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Room => "room",
            Self::Lecturer => "lecturer",
            Self::Class => "class",
        };
        f.write_str(name)
    }
}

/// A detected conflict between a candidate and a stored assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Resource axis that collides.
    pub dimension: ConflictDimension,
    /// The shared resource key (room code, lecturer id, or class id).
    pub key: String,
    /// The stored assignment blocking the candidate.
    pub conflicting_id: AssignmentId,
}

impl Conflict {
    /// Creates a conflict record.
    pub fn new(
        dimension: ConflictDimension,
        key: impl Into<String>,
        conflicting_id: AssignmentId,
    ) -> Self {
        Self {
            dimension,
            key: key.into(),
            conflicting_id,
        }
    }
}

/// Two stored assignments that conflict with each other (`first < second`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictPair {
    /// Resource axis that collides.
    pub dimension: ConflictDimension,
    /// The shared resource key.
    pub key: String,
    /// Lower assignment id of the pair.
    pub first: AssignmentId,
    /// Higher assignment id of the pair.
    pub second: AssignmentId,
}

/// The conflict predicate for a single dimension.
///
/// Symmetric in its two (assignment, period) arguments.
pub fn collides(
    dimension: ConflictDimension,
    a: &ScheduleAssignment,
    a_period: &AcademicPeriod,
    b: &ScheduleAssignment,
    b_period: &AcademicPeriod,
) -> bool {
    dimension.key(a) == dimension.key(b)
        && a.batch == b.batch
        && a.slot.overlaps(&b.slot)
        && a_period.overlaps(b_period)
}

/// Stored assignments that collide with `candidate` on `dimension`,
/// in id order. Assignments whose period is not registered are skipped.
fn colliding<'t>(
    timetable: &'t Timetable,
    dimension: ConflictDimension,
    candidate: &'t ScheduleAssignment,
    candidate_period: &'t AcademicPeriod,
    exclude: Option<AssignmentId>,
) -> impl Iterator<Item = Conflict> + 't {
    timetable
        .iter()
        .filter(move |(id, _)| Some(*id) != exclude)
        .filter_map(move |(id, existing)| {
            let period = timetable.period(&existing.period_id)?;
            collides(dimension, candidate, candidate_period, existing, period)
                .then(|| Conflict::new(dimension, dimension.key(candidate), id))
        })
}

fn candidate_period<'t>(
    timetable: &'t Timetable,
    candidate: &ScheduleAssignment,
) -> ScheduleResult<&'t AcademicPeriod> {
    timetable
        .period(&candidate.period_id)
        .ok_or_else(|| ScheduleError::UnknownPeriod(candidate.period_id.clone()))
}

/// Finds the highest-priority conflict for a candidate, if any.
///
/// Dimensions are searched room → lecturer → class; within a dimension
/// the lowest conflicting id wins.
///
/// # Errors
/// `UnknownPeriod` if the candidate's period is not registered.
pub fn first_conflict(
    timetable: &Timetable,
    candidate: &ScheduleAssignment,
    exclude: Option<AssignmentId>,
) -> ScheduleResult<Option<Conflict>> {
    let period = candidate_period(timetable, candidate)?;
    Ok(first_conflict_in(timetable, candidate, period, exclude))
}

/// [`first_conflict`] with the candidate's period already resolved.
pub fn first_conflict_in(
    timetable: &Timetable,
    candidate: &ScheduleAssignment,
    candidate_period: &AcademicPeriod,
    exclude: Option<AssignmentId>,
) -> Option<Conflict> {
    ConflictDimension::ALL
        .iter()
        .find_map(|&dim| colliding(timetable, dim, candidate, candidate_period, exclude).next())
}

/// Finds every conflict for a candidate, ordered by dimension priority
/// and then by conflicting id.
///
/// # Errors
/// `UnknownPeriod` if the candidate's period is not registered.
pub fn find_conflicts(
    timetable: &Timetable,
    candidate: &ScheduleAssignment,
    exclude: Option<AssignmentId>,
) -> ScheduleResult<Vec<Conflict>> {
    let period = candidate_period(timetable, candidate)?;
    Ok(find_conflicts_in(timetable, candidate, period, exclude))
}

/// [`find_conflicts`] with the candidate's period already resolved.
pub fn find_conflicts_in(
    timetable: &Timetable,
    candidate: &ScheduleAssignment,
    candidate_period: &AcademicPeriod,
    exclude: Option<AssignmentId>,
) -> Vec<Conflict> {
    ConflictDimension::ALL
        .iter()
        .flat_map(|&dim| colliding(timetable, dim, candidate, candidate_period, exclude))
        .collect()
}

/// Scans stored data for every conflicting pair.
///
/// Each unordered pair is reported once per colliding dimension. A
/// timetable written only through [`ScheduleBook`](crate::book::ScheduleBook)
/// always audits clean; this is for data loaded from elsewhere.
pub fn audit(timetable: &Timetable) -> Vec<ConflictPair> {
    let rows: Vec<_> = timetable
        .iter()
        .filter_map(|(id, a)| timetable.period(&a.period_id).map(|p| (id, a, p)))
        .collect();

    let mut pairs = Vec::new();
    for dim in ConflictDimension::ALL {
        for (i, (first, a, a_period)) in rows.iter().enumerate() {
            for (second, b, b_period) in &rows[i + 1..] {
                if collides(dim, a, a_period, b, b_period) {
                    pairs.push(ConflictPair {
                        dimension: dim,
                        key: dim.key(a).to_string(),
                        first: *first,
                        second: *second,
                    });
                }
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSlot;
    use chrono::{NaiveDate, NaiveTime, Weekday};
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn slot(day: Weekday, start: &str, end: &str) -> TimeSlot {
        TimeSlot::parse(day, start, end).unwrap()
    }

    fn timetable() -> Timetable {
        let mut t = Timetable::new();
        t.add_period(AcademicPeriod::new("P1", d(2025, 1, 1), d(2025, 4, 1)))
            .unwrap();
        t.add_period(AcademicPeriod::new("P2", d(2025, 4, 1), d(2025, 7, 1)))
            .unwrap();
        t.add_period(AcademicPeriod::new("P3", d(2025, 3, 1), d(2025, 5, 1)).with_program("other"))
            .unwrap();
        t
    }

    fn base() -> ScheduleAssignment {
        ScheduleAssignment::new("L1", "GMC", "C1", "P1", slot(Weekday::Mon, "09:00", "09:30"))
            .with_batch(1)
    }

    #[test]
    fn test_dimension_key_selector() {
        let a = base();
        assert_eq!(ConflictDimension::Room.key(&a), "GMC");
        assert_eq!(ConflictDimension::Lecturer.key(&a), "L1");
        assert_eq!(ConflictDimension::Class.key(&a), "C1");
        assert_eq!(ConflictDimension::Room.reason(), "room-conflict");
        assert_eq!(ConflictDimension::Class.to_string(), "class");
    }

    #[test]
    fn test_room_conflict_detected() {
        let mut t = timetable();
        let id = t.insert(base()).unwrap();
        let cand = base()
            .with_lecturer("L2")
            .with_class("C2")
            .with_slot(slot(Weekday::Mon, "09:15", "09:45"));

        let found = find_conflicts(&t, &cand, None).unwrap();
        assert_eq!(found, vec![Conflict::new(ConflictDimension::Room, "GMC", id)]);
    }

    #[test]
    fn test_all_dimensions_reported_in_priority_order() {
        let mut t = timetable();
        let id = t.insert(base()).unwrap();
        let found = find_conflicts(&t, &base(), None).unwrap();
        let dims: Vec<_> = found.iter().map(|c| c.dimension).collect();
        assert_eq!(
            dims,
            vec![
                ConflictDimension::Room,
                ConflictDimension::Lecturer,
                ConflictDimension::Class
            ]
        );
        assert!(found.iter().all(|c| c.conflicting_id == id));
    }

    #[test]
    fn test_first_conflict_prefers_room() {
        let mut t = timetable();
        // Lecturer clash in another room is stored first (lower id).
        let lecturer_clash = t.insert(base().with_room("R2").with_class("C9")).unwrap();
        let room_clash = t.insert(base().with_lecturer("L9").with_class("C8")).unwrap();

        let first = first_conflict(&t, &base(), None).unwrap().unwrap();
        assert_eq!(first.dimension, ConflictDimension::Room);
        assert_eq!(first.conflicting_id, room_clash);
        assert_ne!(first.conflicting_id, lecturer_clash);
    }

    #[test]
    fn test_adjacent_slots_accept() {
        let mut t = timetable();
        t.insert(base().with_slot(slot(Weekday::Mon, "08:00", "09:00"))).unwrap();
        let cand = base().with_slot(slot(Weekday::Mon, "09:00", "10:00"));
        assert_eq!(first_conflict(&t, &cand, None).unwrap(), None);
    }

    #[test]
    fn test_other_batch_accepts() {
        let mut t = timetable();
        t.insert(base()).unwrap();
        assert!(find_conflicts(&t, &base().with_batch(2), None)
            .unwrap()
            .is_empty());
        assert!(find_conflicts(&t, &base().without_batch(), None)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_null_batches_conflict_with_each_other() {
        let mut t = timetable();
        t.insert(base().without_batch()).unwrap();
        let found = first_conflict(&t, &base().without_batch(), None).unwrap();
        assert_eq!(found.map(|c| c.dimension), Some(ConflictDimension::Room));
    }

    #[test]
    fn test_touching_periods_accept() {
        let mut t = timetable();
        t.insert(base()).unwrap(); // P1 ends 2025-04-01
        let cand = base();
        let cand = ScheduleAssignment {
            period_id: "P2".into(), // starts 2025-04-01
            ..cand
        };
        assert_eq!(first_conflict(&t, &cand, None).unwrap(), None);
    }

    #[test]
    fn test_overlapping_period_of_other_program_conflicts() {
        let mut t = timetable();
        t.insert(base()).unwrap();
        let cand = ScheduleAssignment {
            period_id: "P3".into(),
            ..base()
        };
        assert!(first_conflict(&t, &cand, None).unwrap().is_some());
    }

    #[test]
    fn test_exclude_skips_own_record() {
        let mut t = timetable();
        let id = t.insert(base()).unwrap();
        assert_eq!(first_conflict(&t, &base(), Some(id)).unwrap(), None);
    }

    #[test]
    fn test_unknown_candidate_period() {
        let t = timetable();
        let cand = ScheduleAssignment {
            period_id: "P9".into(),
            ..base()
        };
        assert_eq!(
            find_conflicts(&t, &cand, None),
            Err(ScheduleError::UnknownPeriod("P9".into()))
        );
    }

    #[test]
    fn test_audit_reports_each_pair_once() {
        let mut t = timetable();
        let a = t.insert(base()).unwrap();
        let b = t.insert(base().with_lecturer("L2").with_class("C2")).unwrap();
        t.insert(base().with_batch(2)).unwrap();

        let pairs = audit(&t);
        assert_eq!(
            pairs,
            vec![ConflictPair {
                dimension: ConflictDimension::Room,
                key: "GMC".into(),
                first: a,
                second: b,
            }]
        );
    }

    fn arb_time() -> impl Strategy<Value = NaiveTime> {
        (7u32..20, prop_oneof![Just(0u32), Just(15), Just(30), Just(45)])
            .prop_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    fn arb_assignment() -> impl Strategy<Value = ScheduleAssignment> {
        (
            prop_oneof![Just("GMC"), Just("R1")],
            prop_oneof![Just("L1"), Just("L2")],
            prop_oneof![Just("C1"), Just("C2")],
            prop_oneof![Just("P1"), Just("P2"), Just("P3")],
            proptest::option::of(1u32..3),
            prop_oneof![Just(Weekday::Mon), Just(Weekday::Tue)],
            arb_time(),
            15i64..180,
        )
            .prop_map(|(room, lecturer, class, period, batch, day, start, minutes)| {
                let end = start + chrono::Duration::minutes(minutes);
                let mut a = ScheduleAssignment::new(
                    lecturer,
                    room,
                    class,
                    period,
                    TimeSlot::new(day, start, end),
                );
                a.batch = batch;
                a
            })
    }

    proptest! {
        /// The predicate does not depend on argument order.
        #[test]
        fn collides_is_symmetric(a in arb_assignment(), b in arb_assignment()) {
            let t = timetable();
            let pa = t.period(&a.period_id).unwrap();
            let pb = t.period(&b.period_id).unwrap();
            for dim in ConflictDimension::ALL {
                prop_assert_eq!(collides(dim, &a, pa, &b, pb), collides(dim, &b, pb, &a, pa));
            }
        }

        /// An assignment always collides with itself on every dimension.
        #[test]
        fn collides_with_self(a in arb_assignment()) {
            let t = timetable();
            let p = t.period(&a.period_id).unwrap();
            for dim in ConflictDimension::ALL {
                prop_assert!(collides(dim, &a, p, &a, p));
            }
        }

        /// Search results agree with the pairwise audit.
        #[test]
        fn search_matches_audit(a in arb_assignment(), b in arb_assignment()) {
            let mut t = timetable();
            t.insert(a).unwrap();
            let found = find_conflicts(&t, &b, None).unwrap();
            t.insert(b).unwrap();
            prop_assert_eq!(found.len(), audit(&t).len());
        }
    }
}
