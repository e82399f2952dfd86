//! User repository and service traits.

use async_trait::async_trait;

use super::users_model::{
    NewUser, NewUserRequest, UpdateUserRequest, User, UserProfile, UserUpdate,
};
use crate::errors::Result;

/// Trait defining the contract for User repository operations.
///
/// Not-found is reported through `Option`/`bool`, never as an error.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Retrieves a user by ID.
    fn get(&self, user_id: i32) -> Result<Option<User>>;

    /// Retrieves a user by email. Used for authentication lookups only.
    fn get_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Persists a new user; the store assigns `id` and `created_at`.
    ///
    /// A duplicate email surfaces as `Error::Conflict`.
    async fn create(&self, new_user: NewUser) -> Result<User>;

    /// Replaces username, email and credential. `None` if the ID is absent.
    async fn update(&self, user_id: i32, update: UserUpdate) -> Result<Option<User>>;

    /// Deletes a user and, through the schema, all of its habits and logs.
    async fn delete(&self, user_id: i32) -> Result<bool>;

    /// Cheap existence check.
    fn exists(&self, user_id: i32) -> Result<bool>;
}

/// Trait defining the contract for User service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, request: NewUserRequest) -> Result<UserProfile>;

    fn get_user(&self, user_id: i32) -> Result<UserProfile>;

    async fn update_user(&self, user_id: i32, request: UpdateUserRequest) -> Result<UserProfile>;

    async fn delete_user(&self, user_id: i32) -> Result<()>;

    /// Returns the profile on a match, otherwise one uniform `Unauthorized`.
    async fn login(&self, email: &str, secret: &str) -> Result<UserProfile>;
}
