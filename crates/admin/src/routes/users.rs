//! User management handlers.
//!
//! Responses carry the credential-free [`User`] shape; the stored password
//! hash never crosses the API boundary.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use vietlong_core::UserId;
use vietlong_storage::{StorageBackend, User};

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// All users.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<Json<Vec<User>>> {
    let records = state.store().get_users().await?;
    Ok(Json(records.into_iter().map(|r| r.user).collect()))
}

/// Delete a user.
#[instrument(skip(state, _admin))]
pub async fn remove(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Path(id): Path<String>,
) -> Result<Json<Vec<User>>> {
    let id = UserId::new(id);
    let records = state.store().delete_user(&id).await?;
    tracing::info!(user_id = %id, "user deleted");
    Ok(Json(records.into_iter().map(|r| r.user).collect()))
}
