//! Session-related types for the admin API.
//!
//! Same shape as the storefront's record - serialized user plus absolute
//! millisecond expiry - but the two binaries keep separate session stores
//! and cookies.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use vietlong_storage::User;

/// Session lifetime: 24 hours, renewed on each login.
pub const SESSION_DURATION_MS: i64 = 24 * 60 * 60 * 1000;

/// Session-stored user identity with absolute expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    /// The logged-in admin, as snapshotted at login time.
    pub user: User,
    /// Millisecond epoch after which this session is invalid.
    pub expires_at_ms: i64,
}

impl SessionUser {
    /// Create a session record expiring 24 hours from now.
    #[must_use]
    pub fn new(user: User) -> Self {
        Self {
            user,
            expires_at_ms: Utc::now().timestamp_millis() + SESSION_DURATION_MS,
        }
    }

    /// Whether the expiry has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in admin (with expiry).
    pub const CURRENT_USER: &str = "current_user";
}
