//! Error taxonomy for timetable operations.
//!
//! Conflict variants name the blocking resource and the existing assignment
//! that holds it, so callers can surface an actionable reason. Conflicts are
//! never transient and are not retried.

use chrono::NaiveTime;
use thiserror::Error;

use crate::conflict::{Conflict, ConflictDimension};
use crate::models::AssignmentId;

/// Result alias used across the crate.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Errors raised while validating or writing schedule assignments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Same room, overlapping day/time/period/batch.
    #[error("room '{room_code}' is already booked by assignment {conflicting_id}")]
    RoomConflict {
        room_code: String,
        conflicting_id: AssignmentId,
    },

    /// Same lecturer, overlapping day/time/period/batch.
    #[error("lecturer '{lecturer_id}' is already teaching in assignment {conflicting_id}")]
    LecturerConflict {
        lecturer_id: String,
        conflicting_id: AssignmentId,
    },

    /// Same class, overlapping day/time/period/batch.
    #[error("class '{class_id}' is already scheduled in assignment {conflicting_id}")]
    ClassConflict {
        class_id: String,
        conflicting_id: AssignmentId,
    },

    #[error("invalid time interval: end {end} must be after start {start}")]
    InvalidInterval { start: NaiveTime, end: NaiveTime },

    #[error("invalid time of day: '{0}' (expected HH:MM)")]
    InvalidTime(String),

    #[error("academic period '{period_id}' must end after it starts")]
    InvalidPeriod { period_id: String },

    #[error("field '{field}' must not be blank")]
    InvalidField { field: &'static str },

    #[error("batch number is required")]
    MissingBatch,

    #[error("unknown academic period: {0}")]
    UnknownPeriod(String),

    #[error("academic period already registered: {0}")]
    DuplicatePeriod(String),

    #[error("academic period '{period_id}' is referenced by {assignments} assignment(s)")]
    PeriodInUse {
        period_id: String,
        assignments: usize,
    },

    #[error("assignment not found: {0}")]
    NotFound(AssignmentId),

    #[error("assignment ids exhausted")]
    IdExhausted,

    #[error("configuration error: {0}")]
    Config(String),
}

impl ScheduleError {
    /// The resource dimension for conflict errors.
    pub fn dimension(&self) -> Option<ConflictDimension> {
        match self {
            Self::RoomConflict { .. } => Some(ConflictDimension::Room),
            Self::LecturerConflict { .. } => Some(ConflictDimension::Lecturer),
            Self::ClassConflict { .. } => Some(ConflictDimension::Class),
            _ => None,
        }
    }

    /// The existing assignment blocking the candidate, for conflict errors.
    pub fn conflicting_id(&self) -> Option<AssignmentId> {
        match self {
            Self::RoomConflict { conflicting_id, .. }
            | Self::LecturerConflict { conflicting_id, .. }
            | Self::ClassConflict { conflicting_id, .. } => Some(*conflicting_id),
            _ => None,
        }
    }

    /// Whether this error is a resource conflict.
    pub fn is_conflict(&self) -> bool {
        self.dimension().is_some()
    }
}

impl From<Conflict> for ScheduleError {
    fn from(c: Conflict) -> Self {
        match c.dimension {
            ConflictDimension::Room => Self::RoomConflict {
                room_code: c.key,
                conflicting_id: c.conflicting_id,
            },
            ConflictDimension::Lecturer => Self::LecturerConflict {
                lecturer_id: c.key,
                conflicting_id: c.conflicting_id,
            },
            ConflictDimension::Class => Self::ClassConflict {
                class_id: c.key,
                conflicting_id: c.conflicting_id,
            },
        }
    }
}

impl From<serde_json::Error> for ScheduleError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
