// ── Snapshot view ──

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use super::room::Room;

/// Where a snapshot's picture comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SnapshotFeed {
    /// The client already holds the frame it captured; nothing is served.
    BrowserWebcam,
    /// Cached static reference image.
    SimulatedFeed,
}

/// Either a live marker or an encoded image, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotFrame {
    Live,
    Simulated { image_base64: Arc<str> },
}

/// A room record paired with its current picture.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotView {
    pub room: Room,
    pub frame: SnapshotFrame,
    /// Local wall-clock `HH:MM:SS`.
    pub timestamp: String,
}

impl SnapshotView {
    pub(crate) fn live(room: Room) -> Self {
        Self {
            room,
            frame: SnapshotFrame::Live,
            timestamp: super::clock_timestamp(),
        }
    }

    pub(crate) fn simulated(room: Room, image_base64: Arc<str>) -> Self {
        Self {
            room,
            frame: SnapshotFrame::Simulated { image_base64 },
            timestamp: super::clock_timestamp(),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.frame, SnapshotFrame::Live)
    }

    pub fn feed(&self) -> SnapshotFeed {
        match self.frame {
            SnapshotFrame::Live => SnapshotFeed::BrowserWebcam,
            SnapshotFrame::Simulated { .. } => SnapshotFeed::SimulatedFeed,
        }
    }

    /// The encoded image, `None` for a live room.
    pub fn image_base64(&self) -> Option<&str> {
        match &self.frame {
            SnapshotFrame::Live => None,
            SnapshotFrame::Simulated { image_base64 } => Some(image_base64),
        }
    }
}
