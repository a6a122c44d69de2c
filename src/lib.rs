//! Academic timetable validation for the U-Engine ecosystem.
//!
//! Decides whether a proposed lecturer/room/class/time-slot assignment may
//! be stored, rejecting it when it overlaps an existing assignment along
//! any of three independent resource dimensions. This crate validates; it
//! never proposes or repairs schedules.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `AcademicPeriod`, `TimeSlot`,
//!   `ScheduleAssignment`, `Timetable`
//! - **`conflict`**: The overlap predicate, conflict search, and audit
//! - **`validation`**: Structural checks (intervals, period references, blank ids)
//! - **`book`**: `ScheduleBook`, the atomic check-then-write service
//! - **`config`**: `ValidatorConfig` policy knobs
//! - **`error`**: `ScheduleError` taxonomy
//!
//! # Conflict Rule
//!
//! Two assignments conflict on a dimension (room, lecturer, or class) when
//! they share that resource, fall on the same weekday, belong to the same
//! batch, and both their academic periods and their time-of-day intervals
//! overlap. All overlaps are strict: touching endpoints never conflict.
//!
//! # Logging
//!
//! Decisions are emitted as `tracing` events. The crate never installs a
//! subscriber.

pub mod book;
pub mod config;
pub mod conflict;
pub mod error;
pub mod models;
pub mod validation;
