//! In-memory repositories for service tests.
//!
//! One store implements all three repository traits so that cascades, the
//! `(habit_id, date)` uniqueness and case-insensitive emails behave like the
//! SQLite schema.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::daily_logs::{DailyLog, DailyLogPatch, DailyLogRepositoryTrait, NewDailyLog};
use crate::errors::{Entity, Error, Result};
use crate::habits::{Habit, HabitPatch, HabitRepositoryTrait, HabitWithLogs, NewHabit};
use crate::users::{NewUser, User, UserRepositoryTrait, UserUpdate};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    habits: Vec<Habit>,
    logs: Vec<DailyLog>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub(crate) struct InMemoryStore {
    tables: Mutex<Tables>,
    /// Makes `get_by_habit_and_date` miss, as if a concurrent insert landed
    /// between the pre-check and the write.
    pub(crate) hide_existing_logs: AtomicBool,
}

impl InMemoryStore {
    pub(crate) fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub(crate) fn habit_count(&self) -> usize {
        self.tables.lock().unwrap().habits.len()
    }

    pub(crate) fn log_count(&self) -> usize {
        self.tables.lock().unwrap().logs.len()
    }

    fn sorted_logs(tables: &Tables, habit_id: i32) -> Vec<DailyLog> {
        let mut logs: Vec<DailyLog> = tables
            .logs
            .iter()
            .filter(|l| l.habit_id == habit_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        logs
    }
}

#[async_trait]
impl UserRepositoryTrait for InMemoryStore {
    fn get(&self, user_id: i32) -> Result<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == user_id).cloned())
    }

    fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&new_user.email))
        {
            return Err(Error::duplicate_email(&new_user.email));
        }
        let user = User {
            id: tables.next_id(),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now().naive_utc(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user_id: i32, update: UserUpdate) -> Result<Option<User>> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .users
            .iter()
            .any(|u| u.id != user_id && u.email.eq_ignore_ascii_case(&update.email))
        {
            return Err(Error::duplicate_email(&update.email));
        }
        Ok(tables.users.iter_mut().find(|u| u.id == user_id).map(|u| {
            u.username = update.username;
            u.email = update.email;
            u.password_hash = update.password_hash;
            u.clone()
        }))
    }

    async fn delete(&self, user_id: i32) -> Result<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.users.len();
        tables.users.retain(|u| u.id != user_id);
        if tables.users.len() == before {
            return Ok(false);
        }
        let habit_ids: Vec<i32> = tables
            .habits
            .iter()
            .filter(|h| h.user_id == user_id)
            .map(|h| h.id)
            .collect();
        tables.habits.retain(|h| h.user_id != user_id);
        tables.logs.retain(|l| !habit_ids.contains(&l.habit_id));
        Ok(true)
    }

    fn exists(&self, user_id: i32) -> Result<bool> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().any(|u| u.id == user_id))
    }
}

#[async_trait]
impl HabitRepositoryTrait for InMemoryStore {
    fn list_by_user(&self, user_id: i32, include_logs: bool) -> Result<Vec<HabitWithLogs>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .habits
            .iter()
            .filter(|h| h.user_id == user_id)
            .map(|h| HabitWithLogs {
                habit: h.clone(),
                daily_logs: include_logs.then(|| Self::sorted_logs(&tables, h.id)),
            })
            .collect())
    }

    fn get(&self, habit_id: i32, include_logs: bool) -> Result<Option<HabitWithLogs>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .habits
            .iter()
            .find(|h| h.id == habit_id)
            .map(|h| HabitWithLogs {
                habit: h.clone(),
                daily_logs: include_logs.then(|| Self::sorted_logs(&tables, h.id)),
            }))
    }

    async fn create(&self, new_habit: NewHabit) -> Result<Habit> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.users.iter().any(|u| u.id == new_habit.user_id) {
            return Err(Error::parent_missing(Entity::User, new_habit.user_id));
        }
        let habit = Habit {
            id: tables.next_id(),
            name: new_habit.name,
            description: new_habit.description,
            frequency: new_habit.frequency,
            target_count: new_habit.target_count,
            created_at: Utc::now().naive_utc(),
            user_id: new_habit.user_id,
        };
        tables.habits.push(habit.clone());
        Ok(habit)
    }

    async fn update(&self, habit_id: i32, patch: HabitPatch) -> Result<Option<Habit>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.habits.iter_mut().find(|h| h.id == habit_id).map(|h| {
            patch.apply_to(h);
            h.clone()
        }))
    }

    async fn delete(&self, habit_id: i32) -> Result<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.habits.len();
        tables.habits.retain(|h| h.id != habit_id);
        if tables.habits.len() == before {
            return Ok(false);
        }
        tables.logs.retain(|l| l.habit_id != habit_id);
        Ok(true)
    }

    fn exists(&self, habit_id: i32) -> Result<bool> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.habits.iter().any(|h| h.id == habit_id))
    }
}

#[async_trait]
impl DailyLogRepositoryTrait for InMemoryStore {
    fn list_by_habit(&self, habit_id: i32) -> Result<Vec<DailyLog>> {
        let tables = self.tables.lock().unwrap();
        Ok(Self::sorted_logs(&tables, habit_id))
    }

    fn get(&self, log_id: i32) -> Result<Option<DailyLog>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.logs.iter().find(|l| l.id == log_id).cloned())
    }

    fn get_by_habit_and_date(&self, habit_id: i32, date: NaiveDate) -> Result<Option<DailyLog>> {
        if self.hide_existing_logs.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .logs
            .iter()
            .find(|l| l.habit_id == habit_id && l.date == date)
            .cloned())
    }

    async fn create(&self, new_log: NewDailyLog) -> Result<DailyLog> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.habits.iter().any(|h| h.id == new_log.habit_id) {
            return Err(Error::parent_missing(Entity::Habit, new_log.habit_id));
        }
        if tables
            .logs
            .iter()
            .any(|l| l.habit_id == new_log.habit_id && l.date == new_log.date)
        {
            return Err(Error::duplicate_log(new_log.habit_id, new_log.date));
        }
        let log = DailyLog {
            id: tables.next_id(),
            date: new_log.date,
            completed_count: new_log.completed_count,
            notes: new_log.notes,
            habit_id: new_log.habit_id,
            created_at: Utc::now().naive_utc(),
        };
        tables.logs.push(log.clone());
        Ok(log)
    }

    async fn update(&self, log_id: i32, patch: DailyLogPatch) -> Result<Option<DailyLog>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.logs.iter_mut().find(|l| l.id == log_id).map(|l| {
            patch.apply_to(l);
            l.clone()
        }))
    }

    async fn delete(&self, log_id: i32) -> Result<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.logs.len();
        tables.logs.retain(|l| l.id != log_id);
        Ok(tables.logs.len() != before)
    }
}
