//! Validator configuration.
//!
//! Missing fields take their defaults, so `{}` is a valid configuration.
//! Unknown fields are rejected to surface typos.
//!
//! ```
//! use u_timetable::config::ValidatorConfig;
//!
//! let config = ValidatorConfig::from_json(r#"{ "require_batch": true }"#).unwrap();
//! assert!(config.require_batch);
//! assert!(config.enforce_slot_uniqueness);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ScheduleResult;

/// Policy knobs for [`ScheduleBook`](crate::book::ScheduleBook).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Reject a candidate occupying exactly the same
    /// (room, day, start, end, period, batch) as a stored assignment.
    /// Default: `true`.
    pub enforce_slot_uniqueness: bool,
    /// Reject candidates without a batch number. Default: `false`.
    pub require_batch: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            enforce_slot_uniqueness: true,
            require_batch: false,
        }
    }
}

impl ValidatorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles the exact-slot uniqueness backstop.
    pub fn with_slot_uniqueness(mut self, enabled: bool) -> Self {
        self.enforce_slot_uniqueness = enabled;
        self
    }

    /// Toggles the batch requirement.
    pub fn with_required_batch(mut self, required: bool) -> Self {
        self.require_batch = required;
        self
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> ScheduleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
