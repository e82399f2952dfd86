//! Database models for habits.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use usus_core::habits::{Frequency, Habit, HabitPatch, NewHabit};
use usus_core::Error;

use crate::users::UserDB;

/// Database model for habits
#[derive(Queryable, Identifiable, Associations, Selectable, PartialEq, Debug, Clone)]
#[diesel(belongs_to(UserDB, foreign_key = user_id))]
#[diesel(table_name = crate::schema::habits)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HabitDB {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub frequency: String,
    pub target_count: i32,
    pub created_at: NaiveDateTime,
    pub user_id: i32,
}

/// Database model for creating a new habit
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::habits)]
pub struct NewHabitDB {
    pub name: String,
    pub description: Option<String>,
    pub frequency: String,
    pub target_count: i32,
    pub created_at: NaiveDateTime,
    pub user_id: i32,
}

/// Sparse changeset: `None` columns are left out of the UPDATE, and
/// `Some(None)` on `description` writes NULL.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::habits)]
pub struct HabitChangesetDB {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub frequency: Option<String>,
    pub target_count: Option<i32>,
}

impl TryFrom<HabitDB> for Habit {
    type Error = Error;

    fn try_from(db: HabitDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            name: db.name,
            description: db.description,
            frequency: db.frequency.parse::<Frequency>()?,
            target_count: db.target_count,
            created_at: db.created_at,
            user_id: db.user_id,
        })
    }
}

impl NewHabitDB {
    pub fn from_domain(habit: NewHabit, created_at: NaiveDateTime) -> Self {
        Self {
            name: habit.name,
            description: habit.description,
            frequency: habit.frequency.as_str().to_string(),
            target_count: habit.target_count,
            created_at,
            user_id: habit.user_id,
        }
    }
}

impl From<HabitPatch> for HabitChangesetDB {
    fn from(patch: HabitPatch) -> Self {
        Self {
            name: patch.name,
            description: patch.description,
            frequency: patch.frequency.map(|f| f.as_str().to_string()),
            target_count: patch.target_count,
        }
    }
}
