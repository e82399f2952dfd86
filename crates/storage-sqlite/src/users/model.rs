//! Database models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use usus_core::credentials::PasswordHash;
use usus_core::users::{NewUser, User, UserUpdate};

/// Database model for users
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Database model for inserting a user; the id comes from AUTOINCREMENT.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserDB {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Full replacement of the mutable columns.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct UserChangesetDB {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            username: db.username,
            email: db.email,
            password_hash: PasswordHash::from_stored(db.password_hash),
            created_at: db.created_at,
        }
    }
}

impl NewUserDB {
    pub fn from_domain(user: NewUser, created_at: NaiveDateTime) -> Self {
        Self {
            username: user.username,
            email: user.email,
            password_hash: user.password_hash.into_inner(),
            created_at,
        }
    }
}

impl From<UserUpdate> for UserChangesetDB {
    fn from(update: UserUpdate) -> Self {
        Self {
            username: update.username,
            email: update.email,
            password_hash: update.password_hash.into_inner(),
        }
    }
}
