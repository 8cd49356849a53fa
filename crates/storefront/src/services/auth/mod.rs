//! Authentication service.
//!
//! Email + password accounts resolved against the backend's user
//! collection. The single bootstrap administrator is an ordinary seeded
//! user distinguished only by a fixed email
//! (`vietlong_storage::models::BOOTSTRAP_ADMIN_EMAIL`); login treats it
//! like any other account.

mod error;

pub use error::AuthError;

use chrono::Utc;

use vietlong_core::{Email, HashedPassword, PasswordError, Role, UserId};
use vietlong_storage::{StorageBackend, StorageError, User, UserRecord};

/// Registration input.
#[derive(Debug, Clone)]
pub struct RegisterData {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: Option<String>,
}

/// Authentication service.
pub struct AuthService<'a> {
    store: &'a dyn StorageBackend,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a dyn StorageBackend) -> Self {
        Self { store }
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email, a
    /// wrong password, or an account with no password set.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        // Validate email format
        let email = Email::parse(email)?;

        // Resolve the account from the backend's user collection
        let users = self.store.get_users().await?;
        let record = users
            .into_iter()
            .find(|r| r.user.email == email)
            .ok_or(AuthError::InvalidCredentials)?;

        // Verify password
        let hash = record.password.ok_or(AuthError::InvalidCredentials)?;
        if !hash.verify(password) {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %record.user.id, "login succeeded");
        Ok(record.user)
    }

    /// Register a new customer account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for a malformed email,
    /// `AuthError::WeakPassword` if the password fails validation, and
    /// `AuthError::UserAlreadyExists` if the email is taken.
    pub async fn register(&self, data: RegisterData) -> Result<User, AuthError> {
        let email = Email::parse(&data.email)?;

        let password = HashedPassword::hash(&data.password).map_err(|e| match e {
            PasswordError::TooShort { .. } => AuthError::WeakPassword(e.to_string()),
            PasswordError::Hash => AuthError::PasswordHash,
        })?;

        let user = User {
            id: UserId::generate(),
            email,
            name: data.name,
            phone: data.phone,
            role: Role::Customer,
            created_at: Utc::now(),
        };

        self.store
            .save_user(UserRecord {
                user: user.clone(),
                password: Some(password),
            })
            .await
            .map_err(|e| match e {
                StorageError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Storage(other),
            })?;

        tracing::info!(user_id = %user.id, "customer registered");
        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vietlong_storage::LocalBackend;

    use super::*;

    fn register_data(email: &str) -> RegisterData {
        RegisterData {
            email: email.to_owned(),
            password: "mat-khau-dai".to_owned(),
            name: "Nguyễn Văn A".to_owned(),
            phone: Some("0900000000".to_owned()),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let store = LocalBackend::in_memory();
        let auth = AuthService::new(&store);

        let registered = auth.register(register_data("a@example.com")).await.unwrap();
        assert_eq!(registered.role, Role::Customer);
        assert!(registered.id.as_str().starts_with("customer-"));

        let logged_in = auth.login("a@example.com", "mat-khau-dai").await.unwrap();
        assert_eq!(logged_in.id, registered.id);
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let store = LocalBackend::in_memory();
        let auth = AuthService::new(&store);
        auth.register(register_data("a@example.com")).await.unwrap();

        assert!(matches!(
            auth.login("a@example.com", "sai-mat-khau").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_unknown_email_is_rejected() {
        let store = LocalBackend::in_memory();
        let auth = AuthService::new(&store);

        assert!(matches!(
            auth.login("nobody@example.com", "mat-khau-dai").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_rejected() {
        let store = LocalBackend::in_memory();
        let auth = AuthService::new(&store);
        auth.register(register_data("a@example.com")).await.unwrap();

        assert!(matches!(
            auth.register(register_data("a@example.com")).await,
            Err(AuthError::UserAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_short_password_is_weak() {
        let store = LocalBackend::in_memory();
        let auth = AuthService::new(&store);

        let mut data = register_data("a@example.com");
        data.password = "ngan".to_owned();
        assert!(matches!(
            auth.register(data).await,
            Err(AuthError::WeakPassword(_))
        ));
    }
}
