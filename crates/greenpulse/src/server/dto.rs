// ── Wire shapes that differ from the core model ──

use serde::Serialize;
use serde_json::Value;

use greenpulse_core::seed::DEFAULT_LIVE_ROOM;
use greenpulse_core::{RoomStatus, SnapshotFeed, SnapshotView};

use super::error::ApiError;

/// `POST /analyze` body. Both fields are optional on the wire so a missing
/// frame can be answered with the documented 400 body.
#[derive(Debug, Default)]
pub struct AnalyzeRequest {
    pub room_id: Option<String>,
    pub image_base64: Option<String>,
}

impl AnalyzeRequest {
    /// Field-by-field parse. A body that is not a JSON object counts as
    /// empty and a non-string `image_base64` as absent. A `room_id` that is
    /// present but not a string is rejected.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) else {
            return Ok(Self::default());
        };

        let room_id = match fields.get("room_id") {
            None | Some(Value::Null) => None,
            Some(Value::String(id)) => Some(id.clone()),
            Some(_) => return Err(ApiError::InvalidRoomId),
        };
        let image_base64 = fields
            .get("image_base64")
            .and_then(Value::as_str)
            .map(str::to_owned);

        Ok(Self {
            room_id,
            image_base64,
        })
    }

    pub fn room_id(&self) -> &str {
        self.room_id.as_deref().unwrap_or(DEFAULT_LIVE_ROOM)
    }

    /// The frame, if one was sent and is non-empty.
    pub fn image(&self) -> Option<&str> {
        self.image_base64.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub room_id: String,
    pub room_name: String,
    pub image_base64: Option<String>,
    pub image_source: SnapshotFeed,
    pub is_live: bool,
    pub occupancy: u32,
    pub capacity: u32,
    pub status: RoomStatus,
    pub confidence: f64,
    pub timestamp: String,
}

impl From<SnapshotView> for SnapshotResponse {
    fn from(view: SnapshotView) -> Self {
        Self {
            image_base64: view.image_base64().map(str::to_owned),
            image_source: view.feed(),
            is_live: view.is_live(),
            room_id: view.room.code().to_owned(),
            room_name: view.room.name().to_owned(),
            occupancy: view.room.occupancy(),
            capacity: view.room.capacity(),
            status: view.room.status(),
            confidence: view.room.confidence(),
            timestamp: view.timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
