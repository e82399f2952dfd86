use log::{debug, info};
use std::sync::Arc;
use tokio::task;

use super::users_model::{NewUser, NewUserRequest, UpdateUserRequest, UserProfile, UserUpdate};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::constants::INVALID_CREDENTIALS_MESSAGE;
use crate::credentials::{CredentialHasher, PasswordHash};
use crate::errors::{Entity, Error, Result};

/// Secret hashed once to give unknown-email logins the same verification cost.
const DUMMY_SECRET: &str = "usus-login-timing-equalizer";

/// Service for registering, authenticating and maintaining users.
///
/// Hashing and verification are CPU bound and always run on the blocking pool.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    hasher: Arc<dyn CredentialHasher>,
    dummy_hash: PasswordHash,
}

impl UserService {
    /// Builds the service and hashes the dummy secret up front, so no login
    /// pays for it.
    pub fn new(
        repository: Arc<dyn UserRepositoryTrait>,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Result<Self> {
        let dummy_hash = hasher.hash(DUMMY_SECRET)?;
        Ok(Self {
            repository,
            hasher,
            dummy_hash,
        })
    }

    async fn hash_secret(&self, secret: String) -> Result<PasswordHash> {
        let hasher = Arc::clone(&self.hasher);
        task::spawn_blocking(move || hasher.hash(&secret))
            .await
            .map_err(|e| Error::Credential(format!("Hashing task failed: {}", e)))?
    }

    async fn verify_secret(&self, secret: String, hash: PasswordHash) -> Result<bool> {
        let hasher = Arc::clone(&self.hasher);
        task::spawn_blocking(move || hasher.verify(&secret, &hash))
            .await
            .map_err(|e| Error::Credential(format!("Verification task failed: {}", e)))?
    }

    fn invalid_credentials() -> Error {
        Error::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, request: NewUserRequest) -> Result<UserProfile> {
        request.validate()?;
        let email = request.email.trim().to_string();
        debug!("Registering user with email {}", email);

        if self.repository.get_by_email(&email)?.is_some() {
            return Err(Error::duplicate_email(&email));
        }

        let password_hash = self.hash_secret(request.password).await?;
        let user = self
            .repository
            .create(NewUser {
                username: request.username.trim().to_string(),
                email,
                password_hash,
            })
            .await?;
        info!("Registered user {}", user.id);
        Ok(user.into())
    }

    fn get_user(&self, user_id: i32) -> Result<UserProfile> {
        self.repository
            .get(user_id)?
            .map(UserProfile::from)
            .ok_or_else(|| Error::not_found(Entity::User, user_id))
    }

    async fn update_user(&self, user_id: i32, request: UpdateUserRequest) -> Result<UserProfile> {
        request.validate()?;
        let email = request.email.trim().to_string();

        if let Some(owner) = self.repository.get_by_email(&email)? {
            if owner.id != user_id {
                return Err(Error::duplicate_email(&email));
            }
        }

        let password_hash = self.hash_secret(request.password).await?;
        let update = UserUpdate {
            username: request.username.trim().to_string(),
            email,
            password_hash,
        };
        self.repository
            .update(user_id, update)
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| Error::not_found(Entity::User, user_id))
    }

    async fn delete_user(&self, user_id: i32) -> Result<()> {
        if !self.repository.delete(user_id).await? {
            return Err(Error::not_found(Entity::User, user_id));
        }
        info!("Deleted user {} with all habits and logs", user_id);
        Ok(())
    }

    async fn login(&self, email: &str, secret: &str) -> Result<UserProfile> {
        match self.repository.get_by_email(email.trim())? {
            Some(user) => {
                let matched = self
                    .verify_secret(secret.to_string(), user.password_hash.clone())
                    .await?;
                if matched {
                    Ok(user.into())
                } else {
                    Err(Self::invalid_credentials())
                }
            }
            None => {
                // Pay for one verification so both failures cost the same.
                let _ = self
                    .verify_secret(secret.to_string(), self.dummy_hash.clone())
                    .await?;
                Err(Self::invalid_credentials())
            }
        }
    }
}
