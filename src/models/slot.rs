//! Weekly time-slot recurrence.
//!
//! A slot is a weekday plus a time-of-day interval that repeats every week
//! of an academic period. Slots never carry absolute dates; the period
//! scopes them.
//!
//! # Overlap
//! Intervals are half-open `[start, end)`. Two slots overlap iff they fall
//! on the same weekday and `a.start < b.end && b.start < a.end`, so a slot
//! ending at 09:00 and one starting at 09:00 do not overlap.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

/// A weekly recurring time-of-day interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Day of the week the slot recurs on.
    pub day: Weekday,
    /// Interval start (inclusive).
    pub start: NaiveTime,
    /// Interval end (exclusive).
    pub end: NaiveTime,
}

impl TimeSlot {
    /// Creates a new slot. Does not check that `end > start`.
    pub fn new(day: Weekday, start: NaiveTime, end: NaiveTime) -> Self {
        Self { day, start, end }
    }

    /// Parses `HH:MM` (or `HH:MM:SS`) start and end times.
    ///
    /// ```
    /// use chrono::Weekday;
    /// use u_timetable::models::TimeSlot;
    ///
    /// let slot = TimeSlot::parse(Weekday::Mon, "09:00", "09:30").unwrap();
    /// assert_eq!(slot.duration_minutes(), 30);
    /// assert!(TimeSlot::parse(Weekday::Mon, "9am", "10:00").is_err());
    /// ```
    pub fn parse(day: Weekday, start: &str, end: &str) -> ScheduleResult<Self> {
        Ok(Self::new(day, parse_time(start)?, parse_time(end)?))
    }

    /// Whether the interval is non-empty (`end > start`).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Length of the slot in minutes (negative for inverted slots).
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether two slots share any instant on the same weekday.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }
}

fn parse_time(text: &str) -> ScheduleResult<NaiveTime> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .map_err(|_| ScheduleError::InvalidTime(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: Weekday, start: &str, end: &str) -> TimeSlot {
        TimeSlot::parse(day, start, end).unwrap()
    }

    #[test]
    fn test_parse_formats() {
        let a = slot(Weekday::Tue, "13:00", "14:30");
        let b = slot(Weekday::Tue, "13:00:00", " 14:30 ");
        assert_eq!(a, b);
        assert_eq!(a.duration_minutes(), 90);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = TimeSlot::parse(Weekday::Mon, "25:00", "26:00").unwrap_err();
        assert_eq!(err, ScheduleError::InvalidTime("25:00".into()));
    }

    #[test]
    fn test_validity() {
        assert!(slot(Weekday::Mon, "09:00", "09:30").is_valid());
        assert!(!slot(Weekday::Mon, "09:30", "09:30").is_valid());
        assert!(!slot(Weekday::Mon, "10:00", "09:00").is_valid());
    }

    #[test]
    fn test_overlap() {
        let a = slot(Weekday::Mon, "09:00", "09:30");
        let b = slot(Weekday::Mon, "09:15", "09:45");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        // Containment
        let c = slot(Weekday::Mon, "08:00", "12:00");
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn test_adjacent_slots_do_not_overlap() {
        let a = slot(Weekday::Mon, "08:00", "09:00");
        let b = slot(Weekday::Mon, "09:00", "10:00");
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_different_days_do_not_overlap() {
        let a = slot(Weekday::Mon, "09:00", "10:00");
        let b = slot(Weekday::Wed, "09:00", "10:00");
        assert!(!a.overlaps(&b));
    }
}
