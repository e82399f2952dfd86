use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use usus_core::daily_logs::{DailyLog, DailyLogPatch, DailyLogRepositoryTrait, NewDailyLog};
use usus_core::errors::{Entity, Error, Result};

use super::model::{DailyLogChangesetDB, DailyLogDB, NewDailyLogDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::{constraint_violation, ConstraintViolation, IntoCore, StorageError};
use crate::schema::daily_logs;

pub struct DailyLogRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl DailyLogRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        DailyLogRepository { pool, writer }
    }
}

#[async_trait]
impl DailyLogRepositoryTrait for DailyLogRepository {
    fn list_by_habit(&self, habit_id: i32) -> Result<Vec<DailyLog>> {
        let mut conn = get_connection(&self.pool)?;
        let logs = daily_logs::table
            .filter(daily_logs::habit_id.eq(habit_id))
            .select(DailyLogDB::as_select())
            .order(daily_logs::date.desc())
            .load::<DailyLogDB>(&mut conn)
            .into_core()?;
        Ok(logs.into_iter().map(DailyLog::from).collect())
    }

    fn get(&self, log_id: i32) -> Result<Option<DailyLog>> {
        let mut conn = get_connection(&self.pool)?;
        let log = daily_logs::table
            .find(log_id)
            .select(DailyLogDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(log.map(DailyLog::from))
    }

    fn get_by_habit_and_date(&self, habit_id: i32, date: NaiveDate) -> Result<Option<DailyLog>> {
        let mut conn = get_connection(&self.pool)?;
        let log = daily_logs::table
            .filter(daily_logs::habit_id.eq(habit_id))
            .filter(daily_logs::date.eq(date))
            .select(DailyLogDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(log.map(DailyLog::from))
    }

    async fn create(&self, new_log: NewDailyLog) -> Result<DailyLog> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<DailyLog> {
                let habit_id = new_log.habit_id;
                let date = new_log.date;
                let row = NewDailyLogDB::from_domain(new_log, Utc::now().naive_utc());
                let created = diesel::insert_into(daily_logs::table)
                    .values(&row)
                    .returning(DailyLogDB::as_returning())
                    .get_result(conn)
                    .map_err(|e| match constraint_violation(&e) {
                        Some(ConstraintViolation::Unique) => Error::duplicate_log(habit_id, date),
                        Some(ConstraintViolation::ForeignKey) => {
                            Error::parent_missing(Entity::Habit, habit_id)
                        }
                        None => StorageError::from(e).into(),
                    })?;
                debug!("Created log {} for habit {} on {}", created.id, habit_id, date);
                Ok(DailyLog::from(created))
            })
            .await
    }

    async fn update(&self, log_id: i32, patch: DailyLogPatch) -> Result<Option<DailyLog>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<DailyLog>> {
                let updated = if patch.is_empty() {
                    daily_logs::table
                        .find(log_id)
                        .select(DailyLogDB::as_select())
                        .first(conn)
                        .optional()
                        .into_core()?
                } else {
                    let changes = DailyLogChangesetDB::from(patch);
                    diesel::update(daily_logs::table.find(log_id))
                        .set(&changes)
                        .returning(DailyLogDB::as_returning())
                        .get_result(conn)
                        .optional()
                        .into_core()?
                };
                Ok(updated.map(DailyLog::from))
            })
            .await
    }

    async fn delete(&self, log_id: i32) -> Result<bool> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
                let deleted = diesel::delete(daily_logs::table.find(log_id))
                    .execute(conn)
                    .into_core()?;
                Ok(deleted > 0)
            })
            .await
    }
}
