//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring a logged-in user in route handlers,
//! plus helpers to set, resolve, and clear the session record.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use vietlong_storage::User;

use crate::models::{SessionUser, session_keys};

/// Extractor that requires a logged-in user.
///
/// Returns 401 if there is no session or the session has expired.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub User);

/// Error returned when authentication is required but absent.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Vui lòng đăng nhập" })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts.extensions.get::<Session>().ok_or(AuthRejection)?;

        let user = resolve_session(session).await.ok_or(AuthRejection)?;

        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this never rejects the request.
pub struct OptionalAuth(pub Option<User>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => resolve_session(session).await,
            None => None,
        };

        Ok(Self(user))
    }
}

/// Resolve the logged-in user from the session.
///
/// An absent record yields `None`; an expired record is cleared and also
/// yields `None` (expiry is "logged out", not an error).
pub async fn resolve_session(session: &Session) -> Option<User> {
    let stored: Option<SessionUser> = session
        .get(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten();

    match stored {
        Some(record) if !record.is_expired() => Some(record.user),
        Some(_) => {
            let _ = session
                .remove::<SessionUser>(session_keys::CURRENT_USER)
                .await;
            None
        }
        None => None,
    }
}

/// Store the user in the session with a fresh rolling 24-hour expiry.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &User,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::CURRENT_USER, SessionUser::new(user.clone()))
        .await
}

/// Clear the session record (logout). Unconditional.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<SessionUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use tower_sessions::MemoryStore;
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

    fn fresh_session() -> Session {
        let store = Arc::new(MemoryStore::default());
        Session::new(None, store, None)
    }

    #[tokio::test]
    async fn test_resolve_without_record_is_none() {
        let session = fresh_session();
        assert!(resolve_session(&session).await.is_none());
    }

    #[tokio::test]
    async fn test_set_then_resolve() {
        let session = fresh_session();
        let user = sample_user();
        set_current_user(&session, &user).await.unwrap();

        let resolved = resolve_session(&session).await.unwrap();
        assert_eq!(resolved.id, user.id);
    }

    #[tokio::test]
    async fn test_expired_record_is_cleared() {
        let session = fresh_session();
        let expired = SessionUser {
            user: sample_user(),
            expires_at_ms: Utc::now().timestamp_millis() - 1_000,
        };
        session
            .insert(session_keys::CURRENT_USER, expired)
            .await
            .unwrap();

        assert!(resolve_session(&session).await.is_none());

        // The record itself must be gone afterwards.
        let remaining: Option<SessionUser> = session
            .get(session_keys::CURRENT_USER)
            .await
            .unwrap();
        assert!(remaining.is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_unconditionally() {
        let session = fresh_session();
        set_current_user(&session, &sample_user()).await.unwrap();
        clear_current_user(&session).await.unwrap();
        assert!(resolve_session(&session).await.is_none());
        // Clearing an already-empty session is fine too.
        clear_current_user(&session).await.unwrap();
    }
}
