//! User service - registration, login and account management.
//!
//! Every operation reads then writes without a transaction. Two concurrent
//! requests claiming the same email can both pass the pre-check; the unique
//! index rejects the second write, which surfaces as a conflict.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    ensure_change_confirmed, Credentials, Password, RegisterUser, UpdateUser, User, UserChanges,
    ENTITY_USER, FIELD_EMAIL,
};

use crate::repository::UserRepository;

/// Verified against when the email is unknown so both login failures cost the same.
static DUMMY_HASH: Lazy<String> = Lazy::new(|| {
    Password::new_unchecked("dummy-password-for-timing")
        .map(Password::into_string)
        .unwrap_or_default()
});

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate, hash and store a new account
    async fn register(&self, input: RegisterUser) -> AppResult<User>;

    /// Check credentials and return the matching account
    async fn login(&self, credentials: Credentials) -> AppResult<User>;

    /// List every account
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get account by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Change the supplied fields of an account
    async fn update_user(&self, id: Uuid, input: UpdateUser) -> AppResult<User>;

    /// Permanently delete an account
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService using a repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        // Hash once at startup rather than inside the first login request.
        Lazy::force(&DUMMY_HASH);
        Self { repo }
    }

    async fn ensure_email_free(&self, email: &str) -> AppResult<()> {
        if self.repo.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict(FIELD_EMAIL));
        }
        Ok(())
    }
}

/// Hash on the blocking pool; Argon2 is deliberately slow.
async fn hash_password(plain_text: String) -> AppResult<String> {
    let password = tokio::task::spawn_blocking(move || Password::new_unchecked(&plain_text))
        .await
        .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))??;
    Ok(password.into_string())
}

/// Verify on the blocking pool; an unknown account checks against `DUMMY_HASH`.
async fn verify_password(hash: Option<String>, plain_text: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || {
        let hash = hash.unwrap_or_else(|| DUMMY_HASH.clone());
        Password::from_hash(hash).verify(&plain_text)
    })
    .await
        .map_err(|e| AppError::internal(format!("Verification task failed: {}", e)))
}

#[async_trait]
impl UserService for UserManager {
    async fn register(&self, input: RegisterUser) -> AppResult<User> {
        let new_user = input.validate()?;

        self.ensure_email_free(&new_user.email).await?;

        let password_hash = hash_password(new_user.password).await?;
        let user = self
            .repo
            .create(new_user.name, new_user.email, password_hash)
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, credentials: Credentials) -> AppResult<User> {
        let (email, password) = credentials.validate()?;

        let user = self.repo.find_by_email(&email).await?;
        let hash = user.as_ref().map(|user| user.password_hash.clone());
        let password_valid = verify_password(hash, password).await?;

        match user {
            Some(user) if password_valid => {
                info!(user_id = %user.id, "User logged in");
                Ok(user)
            }
            _ => {
                warn!("Rejected login attempt");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found(ENTITY_USER)
    }

    async fn update_user(&self, id: Uuid, input: UpdateUser) -> AppResult<User> {
        let input = input.normalized();
        let current = self.get_user(id).await?;

        if let Some(email) = input.email.as_deref() {
            if email != current.email {
                self.ensure_email_free(email).await?;
            }
        }

        let password_hash = match input.password {
            Some(password) => {
                ensure_change_confirmed(&password, input.confirm_password.as_deref())?;
                Some(hash_password(password).await?)
            }
            None => None,
        };

        let changes = UserChanges {
            name: input.name,
            email: input.email,
            password_hash,
        };
        let user = self.repo.update(id, changes).await?;

        info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserStore, MockUserRepository};
    use common::INVALID_CREDENTIALS_MESSAGE;
    use domain::MIN_PASSWORD_LENGTH;

    fn registration(name: &str, email: &str, password: &str, confirm: &str) -> RegisterUser {
        RegisterUser {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            confirm_password: Some(confirm.to_string()),
        }
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn service() -> (Arc<InMemoryUserStore>, UserManager) {
        let store = Arc::new(InMemoryUserStore::new());
        let manager = UserManager::new(store.clone());
        (store, manager)
    }

    async fn register_ana(manager: &UserManager) -> User {
        manager
            .register(registration("Ana", "a@x.com", "secret1", "secret1"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let (store, manager) = service();
        let user = register_ana(&manager).await;

        assert_eq!(user.name, "Ana");
        assert_ne!(user.password_hash, "secret1");
        assert!(user.password().verify("secret1"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_mismatch_persists_nothing() {
        let (store, manager) = service();
        let result = manager
            .register(registration("Ana", "a@x.com", "secret1", "secret2"))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_register_short_password_persists_nothing() {
        let (store, manager) = service();
        let short = "x".repeat(MIN_PASSWORD_LENGTH - 1);
        let result = manager
            .register(registration("Ana", "a@x.com", &short, &short))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let (_, manager) = service();
        let result = manager
            .register(RegisterUser {
                name: Some("Ana".to_string()),
                ..Default::default()
            })
            .await;

        match result {
            Err(AppError::MissingFields(missing)) => {
                assert!(!missing.is_missing("name"));
                assert!(missing.is_missing("email"));
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let (store, manager) = service();
        register_ana(&manager).await;

        let result = manager
            .register(registration("Other", "a@x.com", "secret2", "secret2"))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(store.count_with_email("a@x.com").await, 1);
    }

    #[tokio::test]
    async fn test_login_success() {
        let (_, manager) = service();
        let registered = register_ana(&manager).await;

        let user = manager.login(credentials("a@x.com", "secret1")).await.unwrap();

        assert_eq!(user.id, registered.id);
        assert!(user.welcome_message().contains("Ana"));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (_, manager) = service();
        register_ana(&manager).await;

        let wrong_password = manager
            .login(credentials("a@x.com", "wrong"))
            .await
            .unwrap_err();
        let unknown_email = manager
            .login(credentials("nobody@x.com", "secret1"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert_eq!(wrong_password.user_message(), INVALID_CREDENTIALS_MESSAGE);
        assert_eq!(wrong_password.user_message(), unknown_email.user_message());
    }

    #[tokio::test]
    async fn test_login_requires_fields() {
        let (_, manager) = service();
        let result = manager.login(Credentials::default()).await;
        assert!(matches!(result, Err(AppError::MissingFields(_))));
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let (_, manager) = service();
        let result = manager.get_user(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_changes_only_supplied_fields() {
        let (_, manager) = service();
        let user = register_ana(&manager).await;

        let updated = manager
            .update_user(
                user.id,
                UpdateUser {
                    name: Some("Ana María".to_string()),
                    email: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Ana María");
        assert_eq!(updated.email, "a@x.com");
        assert_eq!(updated.password_hash, user.password_hash);
        assert_eq!(updated.created_at, user.created_at);
    }

    #[tokio::test]
    async fn test_update_email_to_own_value_succeeds() {
        let (_, manager) = service();
        let user = register_ana(&manager).await;

        let updated = manager
            .update_user(
                user.id,
                UpdateUser {
                    email: Some("a@x.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_update_email_to_taken_value_conflicts() {
        let (_, manager) = service();
        register_ana(&manager).await;
        let other = manager
            .register(registration("Bea", "b@x.com", "secret2", "secret2"))
            .await
            .unwrap();

        let result = manager
            .update_user(
                other.id,
                UpdateUser {
                    email: Some("a@x.com".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_password_requires_confirmation() {
        let (_, manager) = service();
        let user = register_ana(&manager).await;

        let result = manager
            .update_user(
                user.id,
                UpdateUser {
                    password: Some("newsecret".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_password_replaces_hash() {
        let (_, manager) = service();
        let user = register_ana(&manager).await;

        manager
            .update_user(
                user.id,
                UpdateUser {
                    password: Some("newsecret".to_string()),
                    confirm_password: Some("newsecret".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(manager.login(credentials("a@x.com", "newsecret")).await.is_ok());
        assert!(manager.login(credentials("a@x.com", "secret1")).await.is_err());
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let (_, manager) = service();
        let result = manager
            .update_user(Uuid::new_v4(), UpdateUser::default())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (_, manager) = service();
        let user = register_ana(&manager).await;

        manager.delete_user(user.id).await.unwrap();

        assert!(matches!(
            manager.get_user(user.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            manager.delete_user(user.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_register_rejected_input_never_reaches_store() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().never();
        repo.expect_create().never();

        let manager = UserManager::new(Arc::new(repo));
        let result = manager
            .register(registration("Ana", "a@x.com", "secret1", "secret2"))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .returning(|| Err(sea_orm::DbErr::Custom("connection reset".into()).into()));

        let manager = UserManager::new(Arc::new(repo));
        let result = manager.list_users().await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(err.status().as_u16(), 500);
    }

    #[test]
    fn test_dummy_hash_ready_after_construction() {
        let _ = UserManager::new(Arc::new(InMemoryUserStore::new()));

        let hash = Lazy::get(&DUMMY_HASH).expect("dummy hash initialized");
        assert!(!hash.is_empty());
        assert!(!Password::from_hash(hash.clone()).verify("secret1"));
    }
}
