use log::{debug, info};
use std::sync::Arc;

use super::habits_model::{Habit, HabitPatch, HabitWithLogs, NewHabit};
use super::habits_traits::{HabitRepositoryTrait, HabitServiceTrait};
use crate::errors::{Entity, Error, Result};
use crate::users::UserRepositoryTrait;

pub struct HabitService {
    habit_repository: Arc<dyn HabitRepositoryTrait>,
    user_repository: Arc<dyn UserRepositoryTrait>,
}

impl HabitService {
    pub fn new(
        habit_repository: Arc<dyn HabitRepositoryTrait>,
        user_repository: Arc<dyn UserRepositoryTrait>,
    ) -> Self {
        HabitService {
            habit_repository,
            user_repository,
        }
    }
}

#[async_trait::async_trait]
impl HabitServiceTrait for HabitService {
    fn list_habits(&self, user_id: i32) -> Result<Vec<HabitWithLogs>> {
        self.habit_repository.list_by_user(user_id, true)
    }

    fn get_habit(&self, habit_id: i32) -> Result<HabitWithLogs> {
        self.habit_repository
            .get(habit_id, true)?
            .ok_or_else(|| Error::not_found(Entity::Habit, habit_id))
    }

    async fn create_habit(&self, new_habit: NewHabit) -> Result<Habit> {
        new_habit.validate()?;
        if !self.user_repository.exists(new_habit.user_id)? {
            return Err(Error::parent_missing(Entity::User, new_habit.user_id));
        }
        let habit = self.habit_repository.create(new_habit).await?;
        info!("Created habit {} for user {}", habit.id, habit.user_id);
        Ok(habit)
    }

    async fn update_habit(&self, habit_id: i32, patch: HabitPatch) -> Result<Habit> {
        patch.validate()?;
        debug!("Updating habit {} with {:?}", habit_id, patch);
        self.habit_repository
            .update(habit_id, patch)
            .await?
            .ok_or_else(|| Error::not_found(Entity::Habit, habit_id))
    }

    async fn delete_habit(&self, habit_id: i32) -> Result<()> {
        if !self.habit_repository.delete(habit_id).await? {
            return Err(Error::not_found(Entity::Habit, habit_id));
        }
        info!("Deleted habit {} with its logs", habit_id);
        Ok(())
    }
}
