//! Daily log domain models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_REQUEST_COMPLETED_COUNT, LOG_NOTES_MAX_LEN};
use crate::errors::{Result, ValidationError};
use crate::utils::time_utils::{log_date, log_date_today};
use crate::utils::validation::require_max_len;

/// One habit's record for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub id: i32,
    pub date: NaiveDate,
    pub completed_count: i32,
    pub notes: Option<String>,
    pub habit_id: i32,
    pub created_at: NaiveDateTime,
}

fn default_completed_count() -> i32 {
    DEFAULT_REQUEST_COMPLETED_COUNT
}

/// Input model for creating a log.
///
/// `date` accepts a plain date or a timestamp; the time-of-day is dropped.
/// An omitted date means today (UTC) and an omitted count means one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewDailyLog {
    #[serde(default = "log_date_today", deserialize_with = "log_date::deserialize")]
    pub date: NaiveDate,
    #[serde(default = "default_completed_count")]
    pub completed_count: i32,
    #[serde(default)]
    pub notes: Option<String>,
    pub habit_id: i32,
}

impl NewDailyLog {
    pub fn validate(&self) -> Result<()> {
        validate_completed_count(self.completed_count)?;
        if let Some(notes) = &self.notes {
            require_max_len("notes", notes, LOG_NOTES_MAX_LEN)?;
        }
        Ok(())
    }
}

/// Sparse patch for a log. Date and habit are immutable.
///
/// `notes` is tri-state: absent keeps, `null` clears, a string replaces.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyLogPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_count: Option<i32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub notes: Option<Option<String>>,
}

impl DailyLogPatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(count) = self.completed_count {
            validate_completed_count(count)?;
        }
        if let Some(Some(notes)) = &self.notes {
            require_max_len("notes", notes, LOG_NOTES_MAX_LEN)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.completed_count.is_none() && self.notes.is_none()
    }

    #[cfg(test)]
    pub(crate) fn apply_to(&self, log: &mut DailyLog) {
        if let Some(count) = self.completed_count {
            log.completed_count = count;
        }
        if let Some(notes) = &self.notes {
            log.notes = notes.clone();
        }
    }
}

fn validate_completed_count(count: i32) -> Result<()> {
    if count < 0 {
        return Err(ValidationError::OutOfRange {
            field: "completedCount",
            reason: format!("must not be negative, got {}", count),
        }
        .into());
    }
    Ok(())
}
