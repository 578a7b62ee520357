// ── HTTP error mapping ──

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use greenpulse_core::CoreError;

/// Errors a handler can return. Bodies are fixed strings; details go to
/// the log only.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing image_base64")]
    MissingImage,

    #[error("room_id is not a string")]
    InvalidRoomId,

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::MissingImage => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Missing image_base64" }),
            ),
            Self::InvalidRoomId => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid room_id" }),
            ),
            Self::Core(CoreError::RoomNotFound { .. }) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Room not found" }),
            ),
            Self::Core(CoreError::ClassificationUnavailable { .. }) => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": "Vision API unavailable", "count": 0, "confidence": 0 }),
            ),
            Self::Core(CoreError::ImageUnavailable { .. }) => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": "Image unavailable" }),
            ),
            Self::Core(CoreError::Config { .. }) => {
                error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
