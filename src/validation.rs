//! Structural validation for schedule assignments.
//!
//! Runs before any conflict search. Detects:
//! - Blank identifiers
//! - Empty or inverted time intervals
//! - Missing batch numbers (when the configuration requires one)
//! - References to unregistered academic periods
//!
//! [`validate_timetable`] applies the same checks to a whole loaded
//! timetable, collecting every issue instead of stopping at the first.

use crate::config::ValidatorConfig;
use crate::error::{ScheduleError, ScheduleResult};
use crate::models::{AcademicPeriod, AssignmentId, ScheduleAssignment, Timetable};

/// Validation result for a whole timetable.
pub type ValidationResult = Result<(), Vec<ValidationIssue>>;

/// A structural problem found in stored data.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Offending assignment, or `None` for period-level issues.
    pub assignment_id: Option<AssignmentId>,
    /// What is wrong.
    pub error: ScheduleError,
}

impl ValidationIssue {
    fn new(assignment_id: Option<AssignmentId>, error: ScheduleError) -> Self {
        Self {
            assignment_id,
            error,
        }
    }
}

/// Checks a candidate's own fields and resolves its academic period.
///
/// Checks, in order:
/// 1. lecturer, room, class, and period ids are not blank
/// 2. `end > start` (`InvalidInterval`)
/// 3. batch present if required (`MissingBatch`)
/// 4. the period is registered (`UnknownPeriod`)
pub fn validate_candidate<'t>(
    candidate: &ScheduleAssignment,
    timetable: &'t Timetable,
    config: &ValidatorConfig,
) -> ScheduleResult<&'t AcademicPeriod> {
    check_fields(candidate)?;

    if !candidate.slot.is_valid() {
        return Err(ScheduleError::InvalidInterval {
            start: candidate.slot.start,
            end: candidate.slot.end,
        });
    }

    if config.require_batch && candidate.batch.is_none() {
        return Err(ScheduleError::MissingBatch);
    }

    timetable
        .period(&candidate.period_id)
        .ok_or_else(|| ScheduleError::UnknownPeriod(candidate.period_id.clone()))
}

fn check_fields(candidate: &ScheduleAssignment) -> ScheduleResult<()> {
    let fields = [
        ("lecturer_id", &candidate.lecturer_id),
        ("room_code", &candidate.room_code),
        ("class_id", &candidate.class_id),
        ("period_id", &candidate.period_id),
    ];
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(ScheduleError::InvalidField { field: *field }),
        None => Ok(()),
    }
}

/// Validates every period and assignment in a timetable.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(issues)` with all detected issues.
pub fn validate_timetable(timetable: &Timetable, config: &ValidatorConfig) -> ValidationResult {
    let mut issues = Vec::new();

    for period in timetable.periods() {
        if !period.is_valid() {
            issues.push(ValidationIssue::new(
                None,
                ScheduleError::InvalidPeriod {
                    period_id: period.id.clone(),
                },
            ));
        }
    }

    for (id, assignment) in timetable.iter() {
        if let Err(e) = validate_candidate(assignment, timetable, config) {
            issues.push(ValidationIssue::new(Some(id), e));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
