//! Academic period model.
//!
//! An academic period is the dated window (term + school year) during
//! which weekly schedule assignments recur. Date ranges are half-open
//! `[start_date, end_date)`: a period ending on 2025-04-01 and another
//! starting on 2025-04-01 do not overlap.
//!
//! Overlap is program-agnostic. Two periods owned by different programs
//! still overlap if their dates do.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated term window owned by a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicPeriod {
    /// Unique period identifier.
    pub id: String,
    /// Owning program. Informational only; not used for overlap.
    pub program_id: String,
    /// Human-readable label, e.g. "1st Semester 2025-2026".
    pub name: String,
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// End of the period (exclusive).
    pub end_date: NaiveDate,
}

impl AcademicPeriod {
    /// Creates a new period with no program or name.
    pub fn new(id: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            program_id: String::new(),
            name: String::new(),
            start_date,
            end_date,
        }
    }

    /// Sets the owning program.
    pub fn with_program(mut self, program_id: impl Into<String>) -> Self {
        self.program_id = program_id.into();
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether the period ends after it starts.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.end_date > self.start_date
    }

    /// Length in days.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Whether a date falls within the period.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date < self.end_date
    }

    /// Whether two periods share any day. Touching endpoints do not count.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_date < other.end_date && other.start_date < self.end_date
    }
}
