//! Admin authentication extractor.
//!
//! Every management route requires a logged-in user with the admin role;
//! the extractor enforces both in one place.

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

/// Extractor that requires an authenticated admin.
///
/// Rejects with 401 when there is no valid session, 403 when the session
/// user is not an admin.
pub struct RequireAdminAuth(pub User);

/// Rejection for [`RequireAdminAuth`].
pub enum AdminAuthRejection {
    /// No session, or expired.
    Unauthorized,
    /// Logged in, but not an admin.
    Forbidden,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Vui lòng đăng nhập" })),
            )
                .into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Tài khoản không có quyền quản trị" })),
            )
                .into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection::Unauthorized)?;

        let user = resolve_session(session)
            .await
            .ok_or(AdminAuthRejection::Unauthorized)?;

        if !user.role.is_admin() {
            return Err(AdminAuthRejection::Forbidden);
        }

        Ok(Self(user))
    }
}

/// Resolve the logged-in user, clearing an expired record.
async fn resolve_session(session: &Session) -> Option<User> {
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
