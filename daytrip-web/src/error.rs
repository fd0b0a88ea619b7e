//! Error type returned by request handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use daytrip_core::DaytripError;

/// Failures that abort a request. Warnings and provider errors are normally
/// rendered into the page as outcomes; input errors that escape as
/// `DaytripError` map to 400.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
}

impl From<DaytripError> for AppError {
    fn from(e: DaytripError) -> Self {
        if e.is_user_warning() {
            AppError::BadRequest(e.to_string())
        } else {
            AppError::Internal(e.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            AppError::Internal(message) => {
                tracing::error!("[Web] Request failed: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong while building the page.",
                )
                    .into_response()
            }
        }
    }
}
