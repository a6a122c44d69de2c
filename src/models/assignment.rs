//! Schedule assignment model.
//!
//! An assignment binds a lecturer, subject, room, and class (group) to a
//! weekly time slot within an academic period and batch. It is the entity
//! the conflict rules protect.

use serde::{Deserialize, Serialize};

use super::TimeSlot;

/// Identifier allocated to a stored assignment. Never reused.
pub type AssignmentId = u64;

/// A lecturer/room/class/time binding within a period and batch.
///
/// The same type serves as the candidate passed to validation and as the
/// stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleAssignment {
    /// Teaching lecturer.
    pub lecturer_id: String,
    /// Subject taught. Carries no conflict semantics.
    pub subject_id: String,
    /// Room code, e.g. "GMC".
    pub room_code: String,
    /// Class (student group) attending.
    pub class_id: String,
    /// Academic period the assignment recurs within.
    pub period_id: String,
    /// Isolation partition. `None` is its own distinct batch.
    pub batch: Option<u32>,
    /// Weekly recurrence.
    pub slot: TimeSlot,
}

/// The tightest exact-slot key, used by the uniqueness backstop.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey<'a> {
    pub room_code: &'a str,
    pub slot: TimeSlot,
    pub period_id: &'a str,
    pub batch: Option<u32>,
}

impl ScheduleAssignment {
    /// Creates a new assignment with no subject and no batch.
    pub fn new(
        lecturer_id: impl Into<String>,
        room_code: impl Into<String>,
        class_id: impl Into<String>,
        period_id: impl Into<String>,
        slot: TimeSlot,
    ) -> Self {
        Self {
            lecturer_id: lecturer_id.into(),
            subject_id: String::new(),
            room_code: room_code.into(),
            class_id: class_id.into(),
            period_id: period_id.into(),
            batch: None,
            slot,
        }
    }

    /// Sets the subject.
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = subject_id.into();
        self
    }

    /// Sets the batch number.
    pub fn with_batch(mut self, batch: u32) -> Self {
        self.batch = Some(batch);
        self
    }

    /// Clears the batch number.
    pub fn without_batch(mut self) -> Self {
        self.batch = None;
        self
    }

    /// Replaces the time slot.
    pub fn with_slot(mut self, slot: TimeSlot) -> Self {
        self.slot = slot;
        self
    }

    /// Moves the assignment to another room.
    pub fn with_room(mut self, room_code: impl Into<String>) -> Self {
        self.room_code = room_code.into();
        self
    }

    /// Reassigns the lecturer.
    pub fn with_lecturer(mut self, lecturer_id: impl Into<String>) -> Self {
        self.lecturer_id = lecturer_id.into();
        self
    }

    /// Reassigns the class.
    pub fn with_class(mut self, class_id: impl Into<String>) -> Self {
        self.class_id = class_id.into();
        self
    }

    /// Exact-slot key for the uniqueness backstop.
    pub fn slot_key(&self) -> SlotKey<'_> {
        SlotKey {
            room_code: &self.room_code,
            slot: self.slot,
            period_id: &self.period_id,
            batch: self.batch,
        }
    }
}
