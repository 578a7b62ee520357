// ── Route handlers ──

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use tracing::debug;

use greenpulse_core::{
    Alert, ImageSource, Monitor, Observation, OccupancySummary, OccupantDetector, Room,
};

use super::dto::{AnalyzeRequest, HealthResponse, SnapshotResponse};
use super::error::ApiError;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn list_rooms<D: OccupantDetector, S: ImageSource>(
    State(monitor): State<Monitor<D, S>>,
) -> Json<Vec<Room>> {
    Json(monitor.list_rooms().await)
}

/// Newest first.
pub async fn list_alerts<D: OccupantDetector, S: ImageSource>(
    State(monitor): State<Monitor<D, S>>,
) -> Json<Vec<Alert>> {
    Json(monitor.list_alerts().await)
}

pub async fn summary<D: OccupantDetector, S: ImageSource>(
    State(monitor): State<Monitor<D, S>>,
) -> Json<OccupancySummary> {
    Json(monitor.summary().await)
}

/// Classify a browser frame. Any request without a frame gets the same
/// 400; a non-string `room_id` gets its own.
pub async fn analyze<D: OccupantDetector, S: ImageSource>(
    State(monitor): State<Monitor<D, S>>,
    body: Bytes,
) -> Result<Json<Observation>, ApiError> {
    let request = AnalyzeRequest::from_body(&body)?;
    let image = request.image().ok_or(ApiError::MissingImage)?;

    debug!(room_id = request.room_id(), bytes = image.len(), "frame received");
    let observation = monitor.analyze(request.room_id(), image).await?;
    Ok(Json(observation))
}

pub async fn snapshot<D: OccupantDetector, S: ImageSource>(
    State(monitor): State<Monitor<D, S>>,
    Path(room_id): Path<String>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let view = monitor.snapshot(&room_id).await?;
    Ok(Json(view.into()))
}
