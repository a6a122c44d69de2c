//! Timetable (persisted state) model.
//!
//! A timetable holds the registered academic periods and the stored
//! assignments keyed by id. It is plain storage: it enforces referential
//! rules for periods but never runs the conflict rules itself. Writers go
//! through [`ScheduleBook`](crate::book::ScheduleBook), which validates
//! before touching the timetable.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AcademicPeriod, AssignmentId, ScheduleAssignment};
use crate::conflict::ConflictDimension;
use crate::error::{ScheduleError, ScheduleResult};

/// Periods and assignments for one institution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    periods: BTreeMap<String, AcademicPeriod>,
    assignments: BTreeMap<AssignmentId, ScheduleAssignment>,
    #[serde(default)]
    next_id: AssignmentId,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an academic period.
    pub fn add_period(&mut self, period: AcademicPeriod) -> ScheduleResult<()> {
        if !period.is_valid() {
            return Err(ScheduleError::InvalidPeriod {
                period_id: period.id,
            });
        }
        if self.periods.contains_key(&period.id) {
            return Err(ScheduleError::DuplicatePeriod(period.id));
        }
        self.periods.insert(period.id.clone(), period);
        Ok(())
    }

    /// Removes a period that no assignment references.
    pub fn remove_period(&mut self, period_id: &str) -> ScheduleResult<AcademicPeriod> {
        if !self.periods.contains_key(period_id) {
            return Err(ScheduleError::UnknownPeriod(period_id.to_string()));
        }
        let in_use = self
            .assignments
            .values()
            .filter(|a| a.period_id == period_id)
            .count();
        if in_use > 0 {
            return Err(ScheduleError::PeriodInUse {
                period_id: period_id.to_string(),
                assignments: in_use,
            });
        }
        self.periods
            .remove(period_id)
            .ok_or_else(|| ScheduleError::UnknownPeriod(period_id.to_string()))
    }

    /// Looks up a period.
    pub fn period(&self, period_id: &str) -> Option<&AcademicPeriod> {
        self.periods.get(period_id)
    }

    /// All registered periods, ordered by id.
    pub fn periods(&self) -> impl Iterator<Item = &AcademicPeriod> {
        self.periods.values()
    }

    /// Stores an assignment without any rule checks and returns its new id.
    ///
    /// # Errors
    /// `IdExhausted` once the id space is used up.
    pub fn insert(&mut self, assignment: ScheduleAssignment) -> ScheduleResult<AssignmentId> {
        // Guard against snapshots whose counter lags behind their keys.
        let after_last = match self.assignments.keys().next_back() {
            Some(last) => last.checked_add(1).ok_or(ScheduleError::IdExhausted)?,
            None => 1,
        };
        let id = self.next_id.max(after_last);
        let next_id = id.checked_add(1).ok_or(ScheduleError::IdExhausted)?;
        self.assignments.insert(id, assignment);
        self.next_id = next_id;
        Ok(id)
    }

    /// Replaces a stored assignment, returning its previous state.
    pub fn replace(
        &mut self,
        id: AssignmentId,
        assignment: ScheduleAssignment,
    ) -> ScheduleResult<ScheduleAssignment> {
        let slot = self
            .assignments
            .get_mut(&id)
            .ok_or(ScheduleError::NotFound(id))?;
        Ok(std::mem::replace(slot, assignment))
    }

    /// Removes a stored assignment.
    pub fn remove(&mut self, id: AssignmentId) -> ScheduleResult<ScheduleAssignment> {
        self.assignments
            .remove(&id)
            .ok_or(ScheduleError::NotFound(id))
    }

    /// Looks up an assignment.
    pub fn get(&self, id: AssignmentId) -> Option<&ScheduleAssignment> {
        self.assignments.get(&id)
    }

    /// Whether an assignment with this id exists.
    pub fn contains(&self, id: AssignmentId) -> bool {
        self.assignments.contains_key(&id)
    }

    /// All assignments in id order.
    pub fn iter(&self) -> impl Iterator<Item = (AssignmentId, &ScheduleAssignment)> {
        self.assignments.iter().map(|(id, a)| (*id, a))
    }

    /// Number of stored assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether no assignments are stored.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Finds a stored assignment occupying exactly the same
    /// (room, day, start, end, period, batch) key, other than `exclude`.
    pub fn slot_taken_by(
        &self,
        candidate: &ScheduleAssignment,
        exclude: Option<AssignmentId>,
    ) -> Option<AssignmentId> {
        let key = candidate.slot_key();
        self.iter()
            .filter(|(id, _)| Some(*id) != exclude)
            .find(|(_, a)| a.slot_key() == key)
            .map(|(id, _)| id)
    }

    /// Assignments holding a resource, e.g. a lecturer's timetable.
    pub fn assignments_for(
        &self,
        dimension: ConflictDimension,
        key: &str,
    ) -> Vec<(AssignmentId, &ScheduleAssignment)> {
        self.iter().filter(|(_, a)| dimension.key(a) == key).collect()
    }

    /// Assignments in a batch (`None` selects the batchless ones).
    pub fn assignments_in_batch(
        &self,
        batch: Option<u32>,
    ) -> Vec<(AssignmentId, &ScheduleAssignment)> {
        self.iter().filter(|(_, a)| a.batch == batch).collect()
    }

    /// Assignments recurring on a weekday, ordered by start time.
    pub fn assignments_on(&self, day: Weekday) -> Vec<(AssignmentId, &ScheduleAssignment)> {
        let mut found: Vec<_> = self.iter().filter(|(_, a)| a.slot.day == day).collect();
        found.sort_by_key(|(id, a)| (a.slot.start, *id));
        found
    }

    /// Weekly minutes a resource is occupied within one batch.
    ///
    /// For lecturers this is the weekly teaching load; for rooms, the
    /// weekly booked time.
    pub fn weekly_minutes(
        &self,
        dimension: ConflictDimension,
        key: &str,
        batch: Option<u32>,
    ) -> i64 {
        self.iter()
            .filter(|(_, a)| a.batch == batch && dimension.key(a) == key)
            .map(|(_, a)| a.slot.duration_minutes().max(0))
            .sum()
    }
}
