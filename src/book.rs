//! Atomic check-then-write service for schedule assignments.
//!
//! [`ScheduleBook`] owns a [`Timetable`] behind a read-write lock. Every
//! write (`create`, `update`) holds the write lock across validation and
//! storage, so two concurrent candidates that conflict with each other can
//! never both commit. Read-only checks take the read lock.
//!
//! # Write path
//!
//! 1. Structural validation ([`validate_candidate`])
//! 2. Conflict search, room → lecturer → class ([`first_conflict_in`])
//! 3. Exact-slot uniqueness backstop (if enabled)
//! 4. Store
//!
//! Rejections leave the timetable untouched. Deletes need no re-check.
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveDate, Weekday};
//! use u_timetable::book::ScheduleBook;
//! use u_timetable::error::ScheduleError;
//! use u_timetable::models::{AcademicPeriod, ScheduleAssignment, TimeSlot};
//!
//! let book = ScheduleBook::default();
//! book.add_period(AcademicPeriod::new(
//!     "P1",
//!     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
//! ))
//! .unwrap();
//!
//! let first = ScheduleAssignment::new(
//!     "L1", "GMC", "C1", "P1",
//!     TimeSlot::parse(Weekday::Mon, "09:00", "09:30").unwrap(),
//! )
//! .with_batch(1);
//! let id = book.create(first).unwrap();
//!
//! let clash = ScheduleAssignment::new(
//!     "L2", "GMC", "C1", "P1",
//!     TimeSlot::parse(Weekday::Mon, "09:15", "09:45").unwrap(),
//! )
//! .with_batch(1);
//! assert_eq!(
//!     book.create(clash.clone()),
//!     Err(ScheduleError::RoomConflict { room_code: "GMC".into(), conflicting_id: id })
//! );
//!
//! // A different batch is a separate scheduling universe.
//! assert!(book.create(clash.with_batch(2)).is_ok());
//! ```

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::config::ValidatorConfig;
use crate::conflict::{find_conflicts_in, first_conflict_in, Conflict, ConflictDimension};
use crate::error::{ScheduleError, ScheduleResult};
use crate::models::{AcademicPeriod, AssignmentId, ScheduleAssignment, Timetable};
use crate::validation::validate_candidate;

/// Thread-safe timetable with validated writes.
#[derive(Debug, Default)]
pub struct ScheduleBook {
    config: ValidatorConfig,
    timetable: RwLock<Timetable>,
}

impl ScheduleBook {
    /// Creates an empty book.
    pub fn new(config: ValidatorConfig) -> Self {
        Self::from_timetable(Timetable::new(), config)
    }

    /// Wraps an existing timetable, e.g. a loaded snapshot.
    ///
    /// Existing data is not re-validated; use
    /// [`validate_timetable`](crate::validation::validate_timetable) and
    /// [`audit`](crate::conflict::audit) for that. Stored assignments whose
    /// period is not registered never block a candidate; `validate_timetable`
    /// reports them as unknown periods.
    pub fn from_timetable(timetable: Timetable, config: ValidatorConfig) -> Self {
        Self {
            config,
            timetable: RwLock::new(timetable),
        }
    }

    /// The rules this book enforces.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Registers an academic period.
    pub fn add_period(&self, period: AcademicPeriod) -> ScheduleResult<()> {
        let id = period.id.clone();
        self.timetable.write().add_period(period)?;
        debug!(period_id = %id, "academic period registered");
        Ok(())
    }

    /// Removes an academic period no assignment references.
    pub fn remove_period(&self, period_id: &str) -> ScheduleResult<AcademicPeriod> {
        let period = self.timetable.write().remove_period(period_id)?;
        debug!(period_id, "academic period removed");
        Ok(period)
    }

    /// Decides whether `candidate` could be stored, without storing it.
    ///
    /// `exclude` names the record being replaced on update. Returns the
    /// highest-priority conflict as an error.
    pub fn validate(
        &self,
        candidate: &ScheduleAssignment,
        exclude: Option<AssignmentId>,
    ) -> ScheduleResult<()> {
        let timetable = self.timetable.read();
        self.check(&timetable, candidate, exclude)
    }

    /// Lists every conflict for `candidate` across all dimensions.
    ///
    /// Structural problems are still returned as errors. A uniqueness
    /// backstop hit is listed as a room conflict.
    pub fn conflicts(
        &self,
        candidate: &ScheduleAssignment,
        exclude: Option<AssignmentId>,
    ) -> ScheduleResult<Vec<Conflict>> {
        let timetable = self.timetable.read();
        let period = validate_candidate(candidate, &timetable, &self.config)?;
        let mut conflicts = find_conflicts_in(&timetable, candidate, period, exclude);

        if self.config.enforce_slot_uniqueness {
            if let Some(existing) = timetable.slot_taken_by(candidate, exclude) {
                let rooms = conflicts
                    .iter()
                    .take_while(|c| c.dimension == ConflictDimension::Room);
                if !rooms.clone().any(|c| c.conflicting_id == existing) {
                    let at = rooms.count();
                    let room = candidate.room_code.clone();
                    conflicts.insert(at, Conflict::new(ConflictDimension::Room, room, existing));
                }
            }
        }

        Ok(conflicts)
    }

    /// Validates and stores a new assignment.
    pub fn create(&self, candidate: ScheduleAssignment) -> ScheduleResult<AssignmentId> {
        let mut timetable = self.timetable.write();
        self.check(&timetable, &candidate, None)?;
        let id = timetable.insert(candidate)?;
        info!(assignment_id = id, "schedule assignment created");
        Ok(id)
    }

    /// Re-validates and replaces an existing assignment.
    ///
    /// The record's own prior state is excluded from the search, so an
    /// unchanged update always succeeds.
    pub fn update(&self, id: AssignmentId, candidate: ScheduleAssignment) -> ScheduleResult<()> {
        let mut timetable = self.timetable.write();
        if !timetable.contains(id) {
            return Err(ScheduleError::NotFound(id));
        }
        self.check(&timetable, &candidate, Some(id))?;
        timetable.replace(id, candidate)?;
        info!(assignment_id = id, "schedule assignment updated");
        Ok(())
    }

    /// Removes an assignment.
    pub fn delete(&self, id: AssignmentId) -> ScheduleResult<ScheduleAssignment> {
        let removed = self.timetable.write().remove(id)?;
        info!(assignment_id = id, "schedule assignment deleted");
        Ok(removed)
    }

    /// A copy of the stored assignment, if any.
    pub fn get(&self, id: AssignmentId) -> Option<ScheduleAssignment> {
        self.timetable.read().get(id).cloned()
    }

    /// Number of stored assignments.
    pub fn len(&self) -> usize {
        self.timetable.read().len()
    }

    /// Whether no assignments are stored.
    pub fn is_empty(&self) -> bool {
        self.timetable.read().is_empty()
    }

    /// Runs a read-only query against the current timetable.
    pub fn read<R>(&self, query: impl FnOnce(&Timetable) -> R) -> R {
        let timetable = self.timetable.read();
        query(&*timetable)
    }

    /// Clones the current timetable.
    pub fn snapshot(&self) -> Timetable {
        self.timetable.read().clone()
    }

    fn check(
        &self,
        timetable: &Timetable,
        candidate: &ScheduleAssignment,
        exclude: Option<AssignmentId>,
    ) -> ScheduleResult<()> {
        debug!(
            lecturer = %candidate.lecturer_id,
            room = %candidate.room_code,
            class = %candidate.class_id,
            period = %candidate.period_id,
            batch = ?candidate.batch,
            day = ?candidate.slot.day,
            start = %candidate.slot.start,
            end = %candidate.slot.end,
            exclude = ?exclude,
            "validating schedule assignment"
        );

        let period = validate_candidate(candidate, timetable, &self.config)
            .inspect_err(|e| warn!(error = %e, "schedule assignment is malformed"))?;

        if let Some(conflict) = first_conflict_in(timetable, candidate, period, exclude) {
            warn!(
                reason = conflict.dimension.reason(),
                key = %conflict.key,
                conflicting_id = conflict.conflicting_id,
                "schedule assignment rejected"
            );
            return Err(conflict.into());
        }

        if self.config.enforce_slot_uniqueness {
            if let Some(existing) = timetable.slot_taken_by(candidate, exclude) {
                warn!(
                    reason = "room-conflict",
                    room = %candidate.room_code,
                    conflicting_id = existing,
                    "schedule assignment rejected by slot uniqueness"
                );
                return Err(ScheduleError::RoomConflict {
                    room_code: candidate.room_code.clone(),
                    conflicting_id: existing,
                });
            }
        }

        Ok(())
    }
}
