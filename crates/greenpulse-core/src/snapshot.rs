// ── Snapshot resolution ──
//
// Pairs a room with its picture. Live rooms get a marker, static rooms a
// cached reference image fetched on first use (or by the preload task).

use std::future::Future;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use greenpulse_api::ImageClient;
use indexmap::IndexMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::CoreError;
use crate::model::{OccupancySource, Room, SnapshotView};
use crate::store::ImageCache;

/// A capability that downloads raw image bytes.
pub trait ImageSource: Send + Sync + 'static {
    fn fetch(
        &self,
        url: &Url,
    ) -> impl Future<Output = Result<Bytes, greenpulse_api::Error>> + Send;
}

impl ImageSource for ImageClient {
    fn fetch(
        &self,
        url: &Url,
    ) -> impl Future<Output = Result<Bytes, greenpulse_api::Error>> + Send {
        ImageClient::fetch(self, url)
    }
}

/// Outcome of a preload pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreloadReport {
    pub loaded: usize,
    pub failed: usize,
    pub cancelled: bool,
}

/// Resolves snapshots against the image cache and an [`ImageSource`].
pub struct SnapshotResolver<S> {
    source: S,
    cache: Arc<ImageCache>,
    images: IndexMap<String, Url>,
}

impl<S: ImageSource> SnapshotResolver<S> {
    pub fn new(source: S, cache: Arc<ImageCache>, images: IndexMap<String, Url>) -> Self {
        Self {
            source,
            cache,
            images,
        }
    }

    pub fn cache(&self) -> &Arc<ImageCache> {
        &self.cache
    }

    /// Snapshot for a room record.
    ///
    /// A room fed by a browser webcam always resolves live and never
    /// touches the cache.
    pub async fn resolve(&self, room: Room) -> Result<SnapshotView, CoreError> {
        if room.source() == OccupancySource::BrowserWebcam {
            return Ok(SnapshotView::live(room));
        }

        let image = self.image(room.code()).await?;
        Ok(SnapshotView::simulated(room, image))
    }

    /// Base64 reference image for a room, fetching and caching on a miss.
    pub async fn image(&self, room_id: &str) -> Result<Arc<str>, CoreError> {
        if let Some(cached) = self.cache.get(room_id) {
            return Ok(cached);
        }

        let Some(url) = self.images.get(room_id) else {
            return Err(CoreError::image(room_id, "no reference image configured"));
        };

        let bytes = self.source.fetch(url).await.map_err(|e| {
            warn!(room_id, error = %e, "reference image fetch failed");
            CoreError::image(room_id, e.to_string())
        })?;

        let encoded: Arc<str> = Arc::from(STANDARD.encode(&bytes));
        debug!(room_id, bytes = bytes.len(), "reference image cached");
        Ok(self.cache.insert(room_id, encoded))
    }

    /// Warm the cache for every configured room.
    ///
    /// Failures are logged and left for a lazy retry on the next request.
    /// Stops between rooms once `cancel` fires.
    pub async fn preload(&self, cancel: &CancellationToken) -> PreloadReport {
        let mut report = PreloadReport::default();

        for room_id in self.images.keys() {
            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => None,
                outcome = self.image(room_id) => Some(outcome),
            };
            let Some(outcome) = outcome else {
                report.cancelled = true;
                break;
            };

            match outcome {
                Ok(_) => report.loaded += 1,
                Err(e) => {
                    warn!(room_id = %room_id, error = %e, "preload skipped room");
                    report.failed += 1;
                }
            }
        }

        info!(
            loaded = report.loaded,
            failed = report.failed,
            cancelled = report.cancelled,
            "image preload finished"
        );
        report
    }
}
