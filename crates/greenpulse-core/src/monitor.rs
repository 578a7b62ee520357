// ── Monitor facade ──
//
// Owns every store, the engine and the snapshot resolver. The transport
// layer holds one clone and calls into it per request; `start` and
// `shutdown` manage the background preload task.

use std::sync::Arc;

use greenpulse_api::{ImageClient, TransportConfig, VisionClient};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::classify::OccupantDetector;
use crate::config::MonitorConfig;
use crate::engine::OccupancyEngine;
use crate::error::CoreError;
use crate::model::{Alert, Observation, OccupancySummary, Room, SnapshotView};
use crate::snapshot::{ImageSource, PreloadReport, SnapshotResolver};
use crate::store::{AlertLog, ImageCache, RoomStore};

/// Monitor wired to the real provider and image clients.
pub type LiveMonitor = Monitor<VisionClient, ImageClient>;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<MonitorInner>`. Room identifiers are
/// upper-cased on the way in, so `b2` and `B2` address the same room.
pub struct Monitor<D, S> {
    inner: Arc<MonitorInner<D, S>>,
}

struct MonitorInner<D, S> {
    rooms: Arc<RoomStore>,
    alerts: Arc<AlertLog>,
    engine: OccupancyEngine<D>,
    snapshots: SnapshotResolver<S>,
    preload_images: bool,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl<D, S> Clone for Monitor<D, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl LiveMonitor {
    /// Build the reqwest clients and a seeded monitor from configuration.
    /// Does NOT start background work; call [`start()`](Self::start).
    pub fn from_config(config: MonitorConfig) -> Result<Self, CoreError> {
        let vision = VisionClient::new(
            config.vision_endpoint.clone(),
            config.vision_api_key.clone(),
            &TransportConfig::with_timeout(config.vision_timeout),
        )
        .map_err(|e| CoreError::Config {
            message: format!("vision client: {e}"),
        })?;

        let images = ImageClient::new(&TransportConfig::with_timeout(config.image_timeout))
            .map_err(|e| CoreError::Config {
                message: format!("image client: {e}"),
            })?;

        debug!(endpoint = %vision.endpoint(), "live clients built");
        Ok(Self::new(vision, images, config))
    }
}

impl<D: OccupantDetector, S: ImageSource> Monitor<D, S> {
    /// Seeded monitor over the given capabilities.
    pub fn new(detector: D, images: S, config: MonitorConfig) -> Self {
        Self::with_rooms(RoomStore::seeded(), detector, images, config)
    }

    pub fn with_rooms(rooms: RoomStore, detector: D, images: S, config: MonitorConfig) -> Self {
        let rooms = Arc::new(rooms);
        let alerts = Arc::new(AlertLog::new(config.alert_capacity));
        let engine = OccupancyEngine::new(Arc::clone(&rooms), Arc::clone(&alerts), detector);
        let snapshots =
            SnapshotResolver::new(images, Arc::new(ImageCache::new()), config.room_images);

        Self {
            inner: Arc::new(MonitorInner {
                rooms,
                alerts,
                engine,
                snapshots,
                preload_images: config.preload_images,
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn rooms(&self) -> &Arc<RoomStore> {
        &self.inner.rooms
    }

    pub fn alerts(&self) -> &Arc<AlertLog> {
        &self.inner.alerts
    }

    pub fn image_cache(&self) -> &Arc<ImageCache> {
        self.inner.snapshots.cache()
    }

    // ── Queries ──────────────────────────────────────────────────

    pub async fn list_rooms(&self) -> Vec<Room> {
        self.inner.rooms.list().await
    }

    /// Newest first.
    pub async fn list_alerts(&self) -> Vec<Alert> {
        self.inner.alerts.list().await
    }

    pub async fn summary(&self) -> OccupancySummary {
        self.inner.rooms.summary().await
    }

    pub async fn snapshot(&self, room_id: &str) -> Result<SnapshotView, CoreError> {
        let room = self.inner.rooms.get(&normalize_id(room_id)).await?;
        self.inner.snapshots.resolve(room).await
    }

    // ── Commands ─────────────────────────────────────────────────

    pub async fn analyze(
        &self,
        room_id: &str,
        image_base64: &str,
    ) -> Result<Observation, CoreError> {
        self.inner
            .engine
            .analyze(&normalize_id(room_id), image_base64)
            .await
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Spawn background work. Preload runs once when enabled.
    pub async fn start(&self) {
        if !self.inner.preload_images {
            debug!("image preload disabled");
            return;
        }

        let monitor = self.clone();
        let cancel = self.inner.cancel.child_token();
        let handle = tokio::spawn(async move {
            monitor.inner.snapshots.preload(&cancel).await;
        });
        self.inner.task_handles.lock().await.push(handle);
        info!("image preload started");
    }

    /// Run a preload pass inline.
    pub async fn preload_images(&self) -> PreloadReport {
        self.inner.snapshots.preload(&self.inner.cancel).await
    }

    /// Cancel background work and wait for it to finish.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            if let Err(e) = handle.await {
                warn!(error = %e, "background task ended abnormally");
            }
        }
        debug!("monitor shut down");
    }
}

fn normalize_id(room_id: &str) -> String {
    room_id.trim().to_ascii_uppercase()
}
