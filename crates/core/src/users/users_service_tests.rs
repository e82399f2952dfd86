#[cfg(test)]
mod tests {
    use crate::constants::INVALID_CREDENTIALS_MESSAGE;
    use crate::credentials::{CredentialHasher, PasswordHash};
    use crate::errors::{Entity, Error, Result};
    use crate::testing::InMemoryStore;
    use crate::users::{
        NewUserRequest, UpdateUserRequest, UserRepositoryTrait, UserService, UserServiceTrait,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread::{self, ThreadId};

    // --- Reversible fake hasher that counts calls and records their threads ---
    #[derive(Default)]
    struct CountingHasher {
        hashes: AtomicUsize,
        verifications: AtomicUsize,
        threads: Mutex<Vec<ThreadId>>,
    }

    impl CountingHasher {
        fn encode(secret: &str) -> PasswordHash {
            let reversed: String = secret.chars().rev().collect();
            PasswordHash::from_stored(format!("fake${}", reversed))
        }

        fn record_thread(&self) {
            self.threads.lock().unwrap().push(thread::current().id());
        }
    }

    impl CredentialHasher for CountingHasher {
        fn hash(&self, secret: &str) -> Result<PasswordHash> {
            self.hashes.fetch_add(1, Ordering::SeqCst);
            self.record_thread();
            Ok(Self::encode(secret))
        }

        fn verify(&self, secret: &str, hash: &PasswordHash) -> Result<bool> {
            self.verifications.fetch_add(1, Ordering::SeqCst);
            self.record_thread();
            Ok(Self::encode(secret) == *hash)
        }
    }

    fn setup() -> (UserService, Arc<InMemoryStore>, Arc<CountingHasher>) {
        let store = Arc::new(InMemoryStore::default());
        let hasher = Arc::new(CountingHasher::default());
        let service = UserService::new(store.clone(), hasher.clone()).unwrap();
        (service, store, hasher)
    }

    fn registration(email: &str, password: &str) -> NewUserRequest {
        NewUserRequest {
            username: "ada".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_stores_only_hashed_credential() {
        let (service, store, _) = setup();
        let profile = service
            .register(registration("a@x.com", "hunter2"))
            .await
            .unwrap();

        let stored = store.get(profile.id).unwrap().unwrap();
        assert_ne!(stored.password_hash.as_str(), "hunter2");
        assert!(!stored.password_hash.as_str().contains("hunter2"));
        assert_eq!(profile.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_conflict() {
        let (service, store, _) = setup();
        service.register(registration("a@x.com", "one")).await.unwrap();

        let err = service
            .register(registration("a@x.com", "two"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_register_email_differing_only_in_case_is_conflict() {
        let (service, store, _) = setup();
        service.register(registration("ada@x.com", "one")).await.unwrap();

        let err = service
            .register(registration("ADA@x.com", "two"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_login_succeeds_with_correct_secret() {
        let (service, _, _) = setup();
        let registered = service
            .register(registration("a@x.com", "hunter2"))
            .await
            .unwrap();

        let profile = service.login("a@x.com", "hunter2").await.unwrap();
        assert_eq!(profile, registered);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (service, _, hasher) = setup();
        service
            .register(registration("a@x.com", "hunter2"))
            .await
            .unwrap();

        let wrong_secret = service.login("a@x.com", "nope").await.unwrap_err();
        let after_wrong_secret = hasher.verifications.load(Ordering::SeqCst);
        let unknown_email = service.login("b@x.com", "hunter2").await.unwrap_err();
        let after_unknown_email = hasher.verifications.load(Ordering::SeqCst);

        assert_eq!(wrong_secret.to_string(), unknown_email.to_string());
        assert_eq!(wrong_secret.to_string(), INVALID_CREDENTIALS_MESSAGE);
        assert!(matches!(wrong_secret, Error::Unauthorized(_)));
        assert!(matches!(unknown_email, Error::Unauthorized(_)));
        // one verification on each path
        assert_eq!(after_wrong_secret, 1);
        assert_eq!(after_unknown_email, 2);
    }

    #[tokio::test]
    async fn test_first_unknown_email_login_does_not_hash() {
        let (service, _, hasher) = setup();
        // the dummy credential is hashed while building the service
        assert_eq!(hasher.hashes.load(Ordering::SeqCst), 1);

        let err = service.login("nobody@x.com", "pw").await.unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
        assert_eq!(hasher.hashes.load(Ordering::SeqCst), 1);
        assert_eq!(hasher.verifications.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_hashing_runs_off_the_async_thread() {
        let (service, _, hasher) = setup();
        hasher.threads.lock().unwrap().clear();
        let async_thread = thread::current().id();

        let profile = service.register(registration("a@x.com", "pw")).await.unwrap();
        service
            .update_user(
                profile.id,
                UpdateUserRequest {
                    username: "ada".to_string(),
                    email: "a@x.com".to_string(),
                    password: "pw2".to_string(),
                },
            )
            .await
            .unwrap();
        service.login("a@x.com", "pw2").await.unwrap();
        service.login("b@x.com", "pw2").await.unwrap_err();

        let threads = hasher.threads.lock().unwrap();
        assert_eq!(threads.len(), 4);
        assert!(threads.iter().all(|id| *id != async_thread));
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields_and_rehashes() {
        let (service, store, _) = setup();
        let profile = service.register(registration("a@x.com", "old")).await.unwrap();
        let old_hash = store.get(profile.id).unwrap().unwrap().password_hash;

        let updated = service
            .update_user(
                profile.id,
                UpdateUserRequest {
                    username: "grace".to_string(),
                    email: "g@x.com".to_string(),
                    password: "new-secret".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.username, "grace");
        assert_eq!(updated.email, "g@x.com");
        assert_eq!(updated.created_at, profile.created_at);
        let stored = store.get(profile.id).unwrap().unwrap();
        assert_ne!(stored.password_hash, old_hash);
        assert!(service.login("g@x.com", "new-secret").await.is_ok());
    }

    #[tokio::test]
    async fn test_update_to_email_of_other_user_is_conflict() {
        let (service, _, _) = setup();
        service.register(registration("a@x.com", "pw")).await.unwrap();
        let second = service.register(registration("b@x.com", "pw")).await.unwrap();

        let err = service
            .update_user(
                second.id,
                UpdateUserRequest {
                    username: "bee".to_string(),
                    email: "A@X.com".to_string(),
                    password: "pw".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let (service, _, _) = setup();
        let err = service
            .update_user(
                99,
                UpdateUserRequest {
                    username: "x".to_string(),
                    email: "x@x.com".to_string(),
                    password: "pw".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound {
                entity: Entity::User,
                id: 99
            }
        ));
    }

    #[tokio::test]
    async fn test_get_and_delete_missing_user_are_not_found() {
        let (service, _, _) = setup();
        assert!(matches!(service.get_user(5), Err(Error::NotFound { .. })));
        assert!(matches!(service.delete_user(5).await, Err(Error::NotFound { .. })));
    }
}
