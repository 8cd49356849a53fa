//! Assistant chat handler.
//!
//! Degrades instead of failing: when the bridge is not configured, or the
//! generation call errors out, the shopper gets a fixed apology reply with
//! a 200 - never a raw error.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use vietlong_storage::StorageBackend;

use crate::assistant::catalog_context;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Fixed apology reply when the assistant is unavailable.
pub const APOLOGY_VI: &str = "Xin lỗi, trợ lý đang gặp sự cố. Vui lòng thử lại sau.";

/// Chat input.
#[derive(Debug, Deserialize)]
pub struct ChatInput {
    pub message: String,
}

/// Chat reply.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Ask the assistant a product question.
#[instrument(skip(state, input))]
pub async fn ask(
    State(state): State<AppState>,
    Json(input): Json<ChatInput>,
) -> Result<Json<ChatReply>> {
    if input.message.trim().is_empty() {
        return Err(AppError::BadRequest("message must not be empty".to_owned()));
    }

    let Some(client) = state.assistant() else {
        tracing::debug!("assistant not configured, returning apology");
        return Ok(Json(ChatReply {
            reply: APOLOGY_VI.to_owned(),
        }));
    };

    // Context failure degrades to an empty catalog rather than a failed chat.
    let context = match state.store().get_products().await {
        Ok(products) => catalog_context(&products),
        Err(e) => {
            tracing::warn!(error = %e, "catalog unavailable for assistant context");
            String::new()
        }
    };

    let reply = match client.ask(&input.message, &context).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, "assistant call failed");
            APOLOGY_VI.to_owned()
        }
    };

    Ok(Json(ChatReply { reply }))
}
