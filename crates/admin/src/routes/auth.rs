//! Admin authentication handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use vietlong_storage::User;

use crate::error::{AppError, Result};
use crate::middleware::{clear_current_user, set_current_user};
use crate::services::auth;
use crate::state::AppState;

/// Login input.
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Admin login.
#[instrument(skip(state, session, input))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<LoginInput>,
) -> Result<Json<User>> {
    let user = auth::login(state.store().as_ref(), &input.email, &input.password).await?;

    set_current_user(&session, &user)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store session: {e}")))?;

    Ok(Json(user))
}

/// Clear the session. Always succeeds.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> StatusCode {
    if let Err(e) = clear_current_user(&session).await {
        tracing::warn!(error = %e, "failed to clear session on logout");
    }
    StatusCode::NO_CONTENT
}
