//! Room-state engine between `greenpulse-api` and the HTTP server.
//!
//! This crate owns the domain model and every piece of state the backend
//! keeps in memory:
//!
//! - **[`Monitor`]**: Cheaply cloneable facade over the whole engine. The
//!   transport layer calls [`list_rooms()`](Monitor::list_rooms),
//!   [`analyze()`](Monitor::analyze), [`snapshot()`](Monitor::snapshot), etc.
//!   [`start()`](Monitor::start) spawns the background image preload.
//!
//! - **[`RoomStore`]**: Insertion-ordered room records behind an async
//!   `RwLock`. The only place a room's occupancy fields are written.
//!
//! - **[`determine_status`]**: The single status rule. Every path that
//!   computes a [`RoomStatus`] goes through it.
//!
//! - **[`OccupancyEngine`]**: Classifies a frame, applies the observation
//!   and raises an [`Alert`] on the transition into `waste`.
//!
//! - **[`AlertLog`]** / **[`ImageCache`]**: Bounded newest-first alert log
//!   and the process-lifetime cache of reference images.
//!
//! External capabilities are consumed through the [`OccupantDetector`] and
//! [`ImageSource`] traits, implemented for the reqwest clients in
//! `greenpulse-api` and by fakes in tests.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod monitor;
pub mod seed;
pub mod snapshot;
pub mod status;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use classify::{ClassificationAdapter, OccupantDetector};
pub use config::MonitorConfig;
pub use engine::OccupancyEngine;
pub use error::CoreError;
pub use monitor::{LiveMonitor, Monitor};
pub use snapshot::{ImageSource, PreloadReport, SnapshotResolver};
pub use status::determine_status;
pub use store::{AlertLog, ImageCache, RoomStore};

pub use model::{
    Alert, AlertKind, Classification, Observation, OccupancySource, OccupancySummary, Room,
    RoomSpec, RoomStatus, RoomUpdate, SnapshotFeed, SnapshotFrame, SnapshotView, StatusChange,
};
