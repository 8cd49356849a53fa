//! Create admin accounts.

use chrono::Utc;
use tracing::info;

use vietlong_core::{Email, HashedPassword, Role, UserId};
use vietlong_storage::{StorageBackend, StorageConfig, User, UserRecord};

/// Create an admin account in the configured backend.
///
/// # Errors
///
/// Returns an error if the email is invalid, the password too weak, or the
/// backend write fails (including a duplicate email).
pub async fn create_user(
    email: &str,
    name: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = StorageConfig::from_env()?;
    let store = vietlong_storage::connect(&config).await?;

    let record = UserRecord {
        user: User {
            id: UserId::new(format!("admin-{}", Utc::now().timestamp_millis())),
            email: Email::parse(email)?,
            name: name.to_owned(),
            phone: None,
            role: Role::Admin,
            created_at: Utc::now(),
        },
        password: Some(HashedPassword::hash(password)?),
    };

    store.save_user(record).await?;
    info!(email, "Admin account created");

    Ok(())
}
