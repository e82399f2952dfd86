use async_trait::async_trait;

use super::habits_model::{Habit, HabitPatch, HabitWithLogs, NewHabit};
use crate::errors::Result;

/// Trait for habit repository operations
#[async_trait]
pub trait HabitRepositoryTrait: Send + Sync {
    /// Habits owned by a user. Logs are loaded only when `include_logs` is set.
    fn list_by_user(&self, user_id: i32, include_logs: bool) -> Result<Vec<HabitWithLogs>>;

    fn get(&self, habit_id: i32, include_logs: bool) -> Result<Option<HabitWithLogs>>;

    /// A missing owner surfaces as `Error::ParentMissing`.
    async fn create(&self, new_habit: NewHabit) -> Result<Habit>;

    /// Sparse update. `None` if the ID is absent.
    async fn update(&self, habit_id: i32, patch: HabitPatch) -> Result<Option<Habit>>;

    async fn delete(&self, habit_id: i32) -> Result<bool>;

    /// Existence check; must not load the habit or its logs.
    fn exists(&self, habit_id: i32) -> Result<bool>;
}

/// Trait for habit service operations
#[async_trait]
pub trait HabitServiceTrait: Send + Sync {
    fn list_habits(&self, user_id: i32) -> Result<Vec<HabitWithLogs>>;
    fn get_habit(&self, habit_id: i32) -> Result<HabitWithLogs>;
    async fn create_habit(&self, new_habit: NewHabit) -> Result<Habit>;
    async fn update_habit(&self, habit_id: i32, patch: HabitPatch) -> Result<Habit>;
    async fn delete_habit(&self, habit_id: i32) -> Result<()>;
}
