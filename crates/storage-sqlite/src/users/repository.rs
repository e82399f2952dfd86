use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use usus_core::errors::{Error, Result};
use usus_core::users::{NewUser, User, UserRepositoryTrait, UserUpdate};

use super::model::{NewUserDB, UserChangesetDB, UserDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::{constraint_violation, ConstraintViolation, IntoCore, StorageError};
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        UserRepository { pool, writer }
    }
}

/// Maps the unique email index to the same conflict the service pre-check raises.
fn map_write_error(err: diesel::result::Error, email: &str) -> Error {
    match constraint_violation(&err) {
        Some(ConstraintViolation::Unique) => Error::duplicate_email(email),
        _ => StorageError::from(err).into(),
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get(&self, user_id: i32) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(user.map(User::from))
    }

    fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        // the column is declared COLLATE NOCASE
        let user = users::table
            .filter(users::email.eq(email.trim()))
            .select(UserDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(user.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let email = new_user.email.clone();
                let row = NewUserDB::from_domain(new_user, Utc::now().naive_utc());
                let created = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(|e| map_write_error(e, &email))?;
                debug!("Created user {}", created.id);
                Ok(User::from(created))
            })
            .await
    }

    async fn update(&self, user_id: i32, update: UserUpdate) -> Result<Option<User>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<User>> {
                let email = update.email.clone();
                let changes = UserChangesetDB::from(update);
                let updated = diesel::update(users::table.find(user_id))
                    .set(&changes)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(|e| map_write_error(e, &email))?;
                Ok(updated.map(User::from))
            })
            .await
    }

    async fn delete(&self, user_id: i32) -> Result<bool> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
                let deleted = diesel::delete(users::table.find(user_id))
                    .execute(conn)
                    .into_core()?;
                Ok(deleted > 0)
            })
            .await
    }

    fn exists(&self, user_id: i32) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        diesel::select(diesel::dsl::exists(users::table.find(user_id)))
            .get_result(&mut conn)
            .into_core()
    }
}
