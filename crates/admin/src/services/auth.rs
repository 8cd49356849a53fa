//! Admin authentication.
//!
//! Same credential flow as the storefront, narrowed to admin accounts: a
//! successful password check for a non-admin user still fails the login.

use thiserror::Error;

use vietlong_core::Email;
use vietlong_storage::{StorageBackend, StorageError, User};

/// Errors that can occur during admin authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] vietlong_core::EmailError),

    /// Invalid credentials (wrong password or unknown email).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Valid credentials, but not an admin account.
    #[error("account is not an administrator")]
    NotAdmin,

    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Login with email and password, requiring the admin role.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` for an unknown email or wrong
/// password, `AuthError::NotAdmin` for a valid customer account.
pub async fn login(
    store: &dyn StorageBackend,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    let email = Email::parse(email)?;

    let users = store.get_users().await?;
    let record = users
        .into_iter()
        .find(|r| r.user.email == email)
        .ok_or(AuthError::InvalidCredentials)?;

    let hash = record.password.ok_or(AuthError::InvalidCredentials)?;
    if !hash.verify(password) {
        return Err(AuthError::InvalidCredentials);
    }

    if !record.user.role.is_admin() {
        return Err(AuthError::NotAdmin);
    }

    tracing::info!(user_id = %record.user.id, "admin login succeeded");
    Ok(record.user)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use vietlong_core::{HashedPassword, Role, UserId};
    use vietlong_storage::{LocalBackend, UserRecord};

    use super::*;

    async fn store_with_user(role: Role) -> LocalBackend {
        let store = LocalBackend::in_memory();
        store
            .save_user(UserRecord {
                user: User {
                    id: UserId::new("admin-001"),
                    email: Email::parse("admin@vietlong.com").unwrap(),
                    name: "Admin Việt Long".to_owned(),
                    phone: None,
                    role,
                    created_at: Utc::now(),
                },
                password: Some(HashedPassword::hash("mat-khau-quan-tri").unwrap()),
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_admin_login_succeeds() {
        let store = store_with_user(Role::Admin).await;
        let user = login(&store, "admin@vietlong.com", "mat-khau-quan-tri")
            .await
            .unwrap();
        assert!(user.role.is_admin());
    }

    #[tokio::test]
    async fn test_customer_cannot_enter_admin() {
        let store = store_with_user(Role::Customer).await;
        assert!(matches!(
            login(&store, "admin@vietlong.com", "mat-khau-quan-tri").await,
            Err(AuthError::NotAdmin)
        ));
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let store = store_with_user(Role::Admin).await;
        assert!(matches!(
            login(&store, "admin@vietlong.com", "sai-mat-khau").await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}
