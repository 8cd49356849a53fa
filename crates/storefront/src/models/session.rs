//! Session-related types.
//!
//! The session record pairs the serialized user with an absolute expiry
//! timestamp (millisecond epoch). Either being absent, or the expiry lying
//! in the past, means "no session" - the record is then cleared.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use vietlong_storage::User;

/// Session lifetime: 24 hours, renewed on each login.
pub const SESSION_DURATION_MS: i64 = 24 * 60 * 60 * 1000;

/// Session-stored user identity with absolute expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    /// The logged-in user, as snapshotted at login time.
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
    /// Key for storing the current logged-in user (with expiry).
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the shopping cart.
    pub const CART: &str = "cart";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use vietlong_core::{Email, Role, UserId};

    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::new("customer-1"),
            email: Email::parse("a@example.com").unwrap(),
            name: "Nguyễn Văn A".to_owned(),
            phone: None,
            role: Role::Customer,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_fresh_session_is_not_expired() {
        let session = SessionUser::new(sample_user());
        assert!(!session.is_expired());
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let session = SessionUser {
            user: sample_user(),
            expires_at_ms: Utc::now().timestamp_millis() - 1_000,
        };
        assert!(session.is_expired());
    }
}
