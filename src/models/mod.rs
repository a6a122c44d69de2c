//! Timetabling domain models.
//!
//! Provides the data types the conflict rules operate on. Entities with no
//! conflict semantics (lecturer profiles, subject catalogs, room
//! inventories) are referenced by identifier only.
//!
//! # Domain Mappings
//!
//! | u-timetable | Academic meaning |
//! |-------------|------------------|
//! | AcademicPeriod | Term + school year window |
//! | TimeSlot | Weekday + time-of-day recurrence |
//! | ScheduleAssignment | Lecturer teaching a class in a room |
//! | Timetable | All periods and assignments of an institution |

mod assignment;
mod period;
mod slot;
mod timetable;

pub use assignment::{AssignmentId, ScheduleAssignment, SlotKey};
pub use period::AcademicPeriod;
pub use slot::TimeSlot;
pub use timetable::Timetable;
