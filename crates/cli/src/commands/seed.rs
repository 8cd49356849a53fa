//! Seed the configured backend.
//!
//! Installs the initial catalog when the product collection is empty, and
//! optionally creates the bootstrap administrator. Both steps are
//! idempotent - re-running the command against a populated store changes
//! nothing.

use chrono::Utc;
use tracing::{info, warn};

use vietlong_core::{Email, HashedPassword, Role, UserId};
use vietlong_storage::models::{BOOTSTRAP_ADMIN_EMAIL, BOOTSTRAP_ADMIN_ID, BOOTSTRAP_ADMIN_NAME};
use vietlong_storage::{StorageBackend, StorageConfig, User, UserRecord, local::seed_products};

/// Seed the catalog and, when a password is supplied, the bootstrap admin.
///
/// # Errors
///
/// Returns an error if the backend cannot be reached or a write fails.
pub async fn run(admin_password: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = StorageConfig::from_env()?;
    let store = vietlong_storage::connect(&config).await?;
    info!(backend = config.kind(), "Connected to storage backend");

    // Catalog: only seed into an empty collection.
    let existing = store.get_products().await?;
    if existing.is_empty() {
        let mut count = 0_usize;
        for product in seed_products() {
            store.save_product(product).await?;
            count += 1;
        }
        info!(count, "Initial catalog installed");
    } else {
        info!(count = existing.len(), "Catalog already populated, skipping");
    }

    // Bootstrap administrator.
    if let Some(password) = admin_password {
        let users = store.get_users().await?;
        let exists = users
            .iter()
            .any(|r| r.user.email.as_str() == BOOTSTRAP_ADMIN_EMAIL);

        if exists {
            warn!(email = BOOTSTRAP_ADMIN_EMAIL, "Admin already exists, skipping");
        } else {
            let record = UserRecord {
                user: User {
                    id: UserId::new(BOOTSTRAP_ADMIN_ID),
                    email: Email::parse(BOOTSTRAP_ADMIN_EMAIL)?,
                    name: BOOTSTRAP_ADMIN_NAME.to_owned(),
                    phone: None,
                    role: Role::Admin,
                    created_at: Utc::now(),
                },
                password: Some(HashedPassword::hash(password)?),
            };
            store.save_user(record).await?;
            info!(email = BOOTSTRAP_ADMIN_EMAIL, "Bootstrap admin created");
        }
    }

    Ok(())
}
