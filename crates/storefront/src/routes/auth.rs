//! Authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use vietlong_storage::User;

use crate::error::{AppError, Result};
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::services::auth::{AuthService, RegisterData};
use crate::state::AppState;

/// Login input.
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Registration input.
#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: Option<String>,
}

/// Login and establish a session with a rolling 24-hour expiry.
#[instrument(skip(state, session, input))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<LoginInput>,
) -> Result<Json<User>> {
    let user = AuthService::new(state.store().as_ref())
        .login(&input.email, &input.password)
        .await?;

    set_current_user(&session, &user)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store session: {e}")))?;

    Ok(Json(user))
}

/// Register a customer account and establish a session.
#[instrument(skip(state, session, input))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<RegisterInput>,
) -> Result<Json<User>> {
    let user = AuthService::new(state.store().as_ref())
        .register(RegisterData {
            email: input.email,
            password: input.password,
            name: input.name,
            phone: input.phone,
        })
        .await?;

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

/// The current session user, if any.
#[instrument(skip(user))]
pub async fn me(OptionalAuth(user): OptionalAuth) -> Json<Option<User>> {
    Json(user)
}
