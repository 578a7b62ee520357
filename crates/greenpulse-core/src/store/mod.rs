// ── In-memory state ──
//
// Room records, the alert log and the reference-image cache. Each store
// owns its own synchronization; callers receive owned clones.

mod alerts;
mod image_cache;
mod rooms;

pub use alerts::{AlertLog, DEFAULT_ALERT_CAPACITY};
pub use image_cache::ImageCache;
pub use rooms::RoomStore;
