//! Unified error handling for the admin API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use vietlong_storage::StorageError;

use crate::services::auth::AuthError;
use crate::services::export::ExportError;
use crate::services::orders::OrderUpdateError;

/// Generic localized failure message shown for server-side errors.
pub const GENERIC_ERROR_VI: &str = "Đã có lỗi xảy ra. Vui lòng thử lại sau.";

/// Application-level error type for the admin API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage backend operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Spreadsheet export failed.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Order status change rejected (strict transitions).
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<OrderUpdateError> for AppError {
    fn from(err: OrderUpdateError) -> Self {
        match err {
            OrderUpdateError::Storage(e) => Self::Storage(e),
            OrderUpdateError::InvalidTransition { from, to } => {
                Self::InvalidTransition(format!("{from} -> {to}"))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Storage(_) | Self::Internal(_) | Self::Export(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Storage(_) | Self::Internal(_) | Self::Export(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::NotAdmin => StatusCode::FORBIDDEN,
                AuthError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
                AuthError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::InvalidTransition(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Storage(_) | Self::Internal(_) => GENERIC_ERROR_VI.to_owned(),
            Self::Export(_) => "Không thể xuất file Excel. Vui lòng thử lại.".to_owned(),
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Email hoặc mật khẩu không đúng".to_owned(),
                AuthError::NotAdmin => "Tài khoản không có quyền quản trị".to_owned(),
                AuthError::InvalidEmail(_) => "Địa chỉ email không hợp lệ".to_owned(),
                AuthError::Storage(_) => GENERIC_ERROR_VI.to_owned(),
            },
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use vietlong_core::OrderStatus;

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("x".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::NotAdmin)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::InvalidTransition("COMPLETED -> PENDING".to_owned())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_invalid_transition_conversion() {
        let err: AppError = OrderUpdateError::InvalidTransition {
            from: OrderStatus::Completed,
            to: OrderStatus::Pending,
        }
        .into();
        assert!(matches!(err, AppError::InvalidTransition(ref s) if s == "COMPLETED -> PENDING"));
    }
}
