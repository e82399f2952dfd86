//! Database models for daily logs.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use usus_core::daily_logs::{DailyLog, DailyLogPatch, NewDailyLog};

use crate::habits::HabitDB;

/// Database model for daily logs
#[derive(Queryable, Identifiable, Associations, Selectable, PartialEq, Debug, Clone)]
#[diesel(belongs_to(HabitDB, foreign_key = habit_id))]
#[diesel(table_name = crate::schema::daily_logs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DailyLogDB {
    pub id: i32,
    pub date: NaiveDate,
    pub completed_count: i32,
    pub notes: Option<String>,
    pub habit_id: i32,
    pub created_at: NaiveDateTime,
}

/// Database model for creating a new log
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::daily_logs)]
pub struct NewDailyLogDB {
    pub date: NaiveDate,
    pub completed_count: i32,
    pub notes: Option<String>,
    pub habit_id: i32,
    pub created_at: NaiveDateTime,
}

/// Sparse changeset; `date` and `habit_id` are not part of it.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::daily_logs)]
pub struct DailyLogChangesetDB {
    pub completed_count: Option<i32>,
    pub notes: Option<Option<String>>,
}

impl From<DailyLogDB> for DailyLog {
    fn from(db: DailyLogDB) -> Self {
        Self {
            id: db.id,
            date: db.date,
            completed_count: db.completed_count,
            notes: db.notes,
            habit_id: db.habit_id,
            created_at: db.created_at,
        }
    }
}

impl NewDailyLogDB {
    pub fn from_domain(log: NewDailyLog, created_at: NaiveDateTime) -> Self {
        Self {
            date: log.date,
            completed_count: log.completed_count,
            notes: log.notes,
            habit_id: log.habit_id,
            created_at,
        }
    }
}

impl From<DailyLogPatch> for DailyLogChangesetDB {
    fn from(patch: DailyLogPatch) -> Self {
        Self {
            completed_count: patch.completed_count,
            notes: patch.notes,
        }
    }
}
