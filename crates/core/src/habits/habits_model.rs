//! Habit domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TARGET_COUNT, HABIT_DESCRIPTION_MAX_LEN, HABIT_NAME_MAX_LEN};
use crate::daily_logs::DailyLog;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::validation::{require_max_len, require_non_empty};

/// How often a habit is meant to be performed.
///
/// Serialized by variant name; parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown habit frequency '{}'",
                other
            ))
            .into()),
        }
    }
}

impl TryFrom<String> for Frequency {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Domain model representing a habit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub target_count: i32,
    pub created_at: NaiveDateTime,
    pub user_id: i32,
}

/// A habit as read through the store, optionally with its logs.
///
/// `daily_logs` is `None` when the caller did not ask for the logs, and
/// `Some` (possibly empty, most recent first) when it did.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HabitWithLogs {
    #[serde(flatten)]
    pub habit: Habit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_logs: Option<Vec<DailyLog>>,
}

fn default_target_count() -> i32 {
    DEFAULT_TARGET_COUNT
}

/// Input model for creating a new habit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHabit {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default = "default_target_count")]
    pub target_count: i32,
    pub user_id: i32,
}

impl NewHabit {
    /// Validates the new habit data.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)?;
        require_max_len("name", &self.name, HABIT_NAME_MAX_LEN)?;
        if let Some(description) = &self.description {
            require_max_len("description", description, HABIT_DESCRIPTION_MAX_LEN)?;
        }
        validate_target_count(self.target_count)
    }
}

/// Sparse patch for a habit.
///
/// `None` leaves a field untouched. `description` is tri-state: absent keeps
/// the value, an explicit `null` clears it, a string replaces it. `name` and
/// `frequency` can be replaced but never cleared.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HabitPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_count: Option<i32>,
}

impl HabitPatch {
    /// Validates only the fields that are present.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
            require_max_len("name", name, HABIT_NAME_MAX_LEN)?;
        }
        if let Some(Some(description)) = &self.description {
            require_max_len("description", description, HABIT_DESCRIPTION_MAX_LEN)?;
        }
        if let Some(target_count) = self.target_count {
            validate_target_count(target_count)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.frequency.is_none()
            && self.target_count.is_none()
    }

    /// Applies the patch to a habit in memory.
    #[cfg(test)]
    pub(crate) fn apply_to(&self, habit: &mut Habit) {
        if let Some(name) = &self.name {
            habit.name = name.clone();
        }
        if let Some(description) = &self.description {
            habit.description = description.clone();
        }
        if let Some(frequency) = self.frequency {
            habit.frequency = frequency;
        }
        if let Some(target_count) = self.target_count {
            habit.target_count = target_count;
        }
    }
}

fn validate_target_count(target_count: i32) -> Result<()> {
    if target_count < 1 {
        return Err(ValidationError::OutOfRange {
            field: "targetCount",
            reason: format!("must be positive, got {}", target_count),
        }
        .into());
    }
    Ok(())
}
