// ── Domain model ──
//
// Canonical types shared by the engine, the stores and the transport layer.

pub mod alert;
pub mod observation;
pub mod room;
pub mod snapshot;

pub use alert::{Alert, AlertKind};
pub use observation::{Classification, Observation, OccupancySummary};
pub use room::{OccupancySource, Room, RoomSpec, RoomStatus, RoomUpdate, StatusChange};
pub use snapshot::{SnapshotFeed, SnapshotFrame, SnapshotView};

/// Local wall-clock `HH:MM:SS`, the timestamp format of observations and
/// snapshots.
pub(crate) fn clock_timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
