// ── Reference image cache ──

use std::sync::Arc;

use dashmap::DashMap;

/// Room code to base64-encoded reference image.
///
/// Entries are written once and kept for the life of the process. When two
/// fetches for the same room race, the first insert wins and both callers
/// get the stored value.
#[derive(Debug, Default)]
pub struct ImageCache {
    images: DashMap<String, Arc<str>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, room_id: &str) -> Option<Arc<str>> {
        self.images.get(room_id).map(|r| Arc::clone(r.value()))
    }

    /// Insert unless already present; returns the cached value either way.
    pub fn insert(&self, room_id: &str, image_base64: Arc<str>) -> Arc<str> {
        Arc::clone(
            self.images
                .entry(room_id.to_owned())
                .or_insert(image_base64)
                .value(),
        )
    }

    pub fn contains(&self, room_id: &str) -> bool {
        self.images.contains_key(room_id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
