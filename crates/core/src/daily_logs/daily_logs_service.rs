use log::{debug, info};
use std::sync::Arc;

use super::daily_logs_model::{DailyLog, DailyLogPatch, NewDailyLog};
use super::daily_logs_traits::{DailyLogRepositoryTrait, DailyLogServiceTrait};
use crate::errors::{Entity, Error, Result};
use crate::habits::HabitRepositoryTrait;

/// Service owning the create-or-conflict protocol for logs.
///
/// The parent and duplicate checks are not atomic with the insert. The
/// schema's foreign key and `(habit_id, date)` unique index close that
/// window, and the repository reports them as the same outcomes.
pub struct DailyLogService {
    log_repository: Arc<dyn DailyLogRepositoryTrait>,
    habit_repository: Arc<dyn HabitRepositoryTrait>,
}

impl DailyLogService {
    pub fn new(
        log_repository: Arc<dyn DailyLogRepositoryTrait>,
        habit_repository: Arc<dyn HabitRepositoryTrait>,
    ) -> Self {
        Self {
            log_repository,
            habit_repository,
        }
    }

    fn ensure_habit_exists(&self, habit_id: i32) -> Result<()> {
        if !self.habit_repository.exists(habit_id)? {
            return Err(Error::parent_missing(Entity::Habit, habit_id));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl DailyLogServiceTrait for DailyLogService {
    fn list_logs(&self, habit_id: i32) -> Result<Vec<DailyLog>> {
        self.ensure_habit_exists(habit_id)?;
        self.log_repository.list_by_habit(habit_id)
    }

    fn get_log(&self, log_id: i32) -> Result<DailyLog> {
        self.log_repository
            .get(log_id)?
            .ok_or_else(|| Error::not_found(Entity::DailyLog, log_id))
    }

    async fn create_log(&self, new_log: NewDailyLog) -> Result<DailyLog> {
        new_log.validate()?;

        // 1. parent
        self.ensure_habit_exists(new_log.habit_id)?;

        // 2. one log per habit and day
        if let Some(existing) = self
            .log_repository
            .get_by_habit_and_date(new_log.habit_id, new_log.date)?
        {
            debug!(
                "Rejecting log for habit {} on {}: log {} exists",
                new_log.habit_id, new_log.date, existing.id
            );
            return Err(Error::duplicate_log(new_log.habit_id, new_log.date));
        }

        // 3. insert
        let log = self.log_repository.create(new_log).await?;
        info!("Created log {} for habit {} on {}", log.id, log.habit_id, log.date);
        Ok(log)
    }

    async fn update_log(&self, log_id: i32, patch: DailyLogPatch) -> Result<DailyLog> {
        patch.validate()?;
        self.log_repository
            .update(log_id, patch)
            .await?
            .ok_or_else(|| Error::not_found(Entity::DailyLog, log_id))
    }

    async fn delete_log(&self, log_id: i32) -> Result<()> {
        if !self.log_repository.delete(log_id).await? {
            return Err(Error::not_found(Entity::DailyLog, log_id));
        }
        Ok(())
    }
}
