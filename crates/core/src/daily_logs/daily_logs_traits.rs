//! Daily log repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::daily_logs_model::{DailyLog, DailyLogPatch, NewDailyLog};
use crate::errors::Result;

/// Trait defining the contract for DailyLog repository operations.
#[async_trait]
pub trait DailyLogRepositoryTrait: Send + Sync {
    /// Logs of one habit, most recent date first.
    fn list_by_habit(&self, habit_id: i32) -> Result<Vec<DailyLog>>;

    fn get(&self, log_id: i32) -> Result<Option<DailyLog>>;

    /// The log of a habit for one calendar day, if any.
    fn get_by_habit_and_date(&self, habit_id: i32, date: NaiveDate) -> Result<Option<DailyLog>>;

    /// Persists a log.
    ///
    /// A second log for the same habit and day fails with the same
    /// `Error::Conflict` as the service pre-check; a missing habit fails with
    /// `Error::ParentMissing`.
    async fn create(&self, new_log: NewDailyLog) -> Result<DailyLog>;

    /// Sparse update of count and notes. `None` if the ID is absent.
    async fn update(&self, log_id: i32, patch: DailyLogPatch) -> Result<Option<DailyLog>>;

    async fn delete(&self, log_id: i32) -> Result<bool>;
}

/// Trait defining the contract for DailyLog service operations.
#[async_trait]
pub trait DailyLogServiceTrait: Send + Sync {
    fn list_logs(&self, habit_id: i32) -> Result<Vec<DailyLog>>;

    fn get_log(&self, log_id: i32) -> Result<DailyLog>;

    /// Create-or-conflict: parent check, duplicate-day check, then insert.
    async fn create_log(&self, new_log: NewDailyLog) -> Result<DailyLog>;

    async fn update_log(&self, log_id: i32, patch: DailyLogPatch) -> Result<DailyLog>;

    async fn delete_log(&self, log_id: i32) -> Result<()>;
}
