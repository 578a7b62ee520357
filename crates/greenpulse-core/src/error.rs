// ── Core error types ──
//
// Caller-facing errors from greenpulse-core. API errors are translated by
// call site (classification or image fetch); there is no blanket `From`.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Domain errors ────────────────────────────────────────────────
    #[error("Room not found: {room_id}")]
    RoomNotFound { room_id: String },

    #[error("Classification unavailable: {reason}")]
    ClassificationUnavailable { reason: String },

    #[error("Image unavailable for room {room_id}: {reason}")]
    ImageUnavailable { room_id: String, reason: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn room_not_found(room_id: &str) -> Self {
        Self::RoomNotFound {
            room_id: room_id.to_owned(),
        }
    }

    pub(crate) fn classification(err: &greenpulse_api::Error) -> Self {
        Self::ClassificationUnavailable {
            reason: err.to_string(),
        }
    }

    pub(crate) fn image(room_id: &str, reason: impl Into<String>) -> Self {
        Self::ImageUnavailable {
            room_id: room_id.to_owned(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the addressed room does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RoomNotFound { .. })
    }

    /// Returns `true` if an external collaborator (classification provider
    /// or image source) could not serve the request.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::ClassificationUnavailable { .. } | Self::ImageUnavailable { .. }
        )
    }
}
