use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use usus_core::daily_logs::DailyLog;
use usus_core::errors::{Entity, Error, Result};
use usus_core::habits::{Habit, HabitPatch, HabitRepositoryTrait, HabitWithLogs, NewHabit};

use super::model::{HabitChangesetDB, HabitDB, NewHabitDB};
use crate::daily_logs::DailyLogDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{constraint_violation, ConstraintViolation, IntoCore, StorageError};
use crate::schema::{daily_logs, habits};
use crate::utils::chunk_for_sqlite;

pub struct HabitRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl HabitRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        HabitRepository { pool, writer }
    }

    /// Attaches each habit's logs, most recent first, when requested.
    fn with_logs(
        conn: &mut SqliteConnection,
        habits_db: Vec<HabitDB>,
        include_logs: bool,
    ) -> Result<Vec<HabitWithLogs>> {
        if !include_logs {
            return habits_db
                .into_iter()
                .map(|h| {
                    Ok(HabitWithLogs {
                        habit: Habit::try_from(h)?,
                        daily_logs: None,
                    })
                })
                .collect();
        }

        let mut logs_db: Vec<DailyLogDB> = Vec::new();
        for chunk in chunk_for_sqlite(&habits_db) {
            let chunk_logs = DailyLogDB::belonging_to(chunk)
                .select(DailyLogDB::as_select())
                .order(daily_logs::date.desc())
                .load::<DailyLogDB>(conn)
                .into_core()?;
            logs_db.extend(chunk_logs);
        }

        // grouped_by keeps the date ordering within each group
        let grouped = logs_db.grouped_by(&habits_db);
        habits_db
            .into_iter()
            .zip(grouped)
            .map(|(h, logs)| {
                Ok(HabitWithLogs {
                    habit: Habit::try_from(h)?,
                    daily_logs: Some(logs.into_iter().map(DailyLog::from).collect()),
                })
            })
            .collect()
    }
}

#[async_trait]
impl HabitRepositoryTrait for HabitRepository {
    fn list_by_user(&self, user_id: i32, include_logs: bool) -> Result<Vec<HabitWithLogs>> {
        let mut conn = get_connection(&self.pool)?;
        let habits_db = habits::table
            .filter(habits::user_id.eq(user_id))
            .select(HabitDB::as_select())
            .order(habits::id.asc())
            .load::<HabitDB>(&mut conn)
            .into_core()?;
        Self::with_logs(&mut conn, habits_db, include_logs)
    }

    fn get(&self, habit_id: i32, include_logs: bool) -> Result<Option<HabitWithLogs>> {
        let mut conn = get_connection(&self.pool)?;
        let habit_db = habits::table
            .find(habit_id)
            .select(HabitDB::as_select())
            .first::<HabitDB>(&mut conn)
            .optional()
            .into_core()?;
        match habit_db {
            Some(h) => Ok(Self::with_logs(&mut conn, vec![h], include_logs)?.pop()),
            None => Ok(None),
        }
    }

    async fn create(&self, new_habit: NewHabit) -> Result<Habit> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Habit> {
                let user_id = new_habit.user_id;
                let row = NewHabitDB::from_domain(new_habit, Utc::now().naive_utc());
                let created = diesel::insert_into(habits::table)
                    .values(&row)
                    .returning(HabitDB::as_returning())
                    .get_result(conn)
                    .map_err(|e| match constraint_violation(&e) {
                        Some(ConstraintViolation::ForeignKey) => {
                            Error::parent_missing(Entity::User, user_id)
                        }
                        _ => StorageError::from(e).into(),
                    })?;
                debug!("Created habit {} for user {}", created.id, user_id);
                Habit::try_from(created)
            })
            .await
    }

    async fn update(&self, habit_id: i32, patch: HabitPatch) -> Result<Option<Habit>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Habit>> {
                let updated = if patch.is_empty() {
                    // an UPDATE with no columns is rejected by Diesel
                    habits::table
                        .find(habit_id)
                        .select(HabitDB::as_select())
                        .first(conn)
                        .optional()
                        .into_core()?
                } else {
                    let changes = HabitChangesetDB::from(patch);
                    diesel::update(habits::table.find(habit_id))
                        .set(&changes)
                        .returning(HabitDB::as_returning())
                        .get_result(conn)
                        .optional()
                        .into_core()?
                };
                updated.map(Habit::try_from).transpose()
            })
            .await
    }

    async fn delete(&self, habit_id: i32) -> Result<bool> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
                let deleted = diesel::delete(habits::table.find(habit_id))
                    .execute(conn)
                    .into_core()?;
                Ok(deleted > 0)
            })
            .await
    }

    fn exists(&self, habit_id: i32) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        diesel::select(diesel::dsl::exists(habits::table.find(habit_id)))
            .get_result(&mut conn)
            .into_core()
    }
}
