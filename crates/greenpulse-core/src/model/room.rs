// ── Room domain types ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::status::determine_status;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoomStatus {
    Occupied,
    Waste,
    Empty,
}

/// Provenance of a room's latest occupancy figure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OccupancySource {
    /// Seed value, never observed.
    Static,
    /// Frame captured by a browser webcam and classified server-side.
    BrowserWebcam,
}

/// Everything needed to build a [`Room`]. The status is not part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSpec {
    pub code: String,
    pub name: String,
    pub occupancy: u32,
    pub capacity: u32,
    pub lights: bool,
    pub ac: bool,
    pub energy: u32,
    pub confidence: f64,
    pub source: OccupancySource,
}

/// A monitored physical space.
///
/// Fields are read through accessors; `status` is recomputed from
/// `occupancy`, `lights` and `ac` whenever any of them is set, so it can
/// never drift from [`determine_status`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    code: String,
    name: String,
    occupancy: u32,
    capacity: u32,
    status: RoomStatus,
    lights: bool,
    ac: bool,
    energy: u32,
    confidence: f64,
    source: OccupancySource,
}

impl Room {
    pub fn new(spec: RoomSpec) -> Self {
        Self {
            status: determine_status(spec.occupancy, spec.lights, spec.ac),
            code: spec.code,
            name: spec.name,
            occupancy: spec.occupancy,
            capacity: spec.capacity,
            lights: spec.lights,
            ac: spec.ac,
            energy: spec.energy,
            confidence: spec.confidence,
            source: spec.source,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn occupancy(&self) -> u32 {
        self.occupancy
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn status(&self) -> RoomStatus {
        self.status
    }

    pub fn lights(&self) -> bool {
        self.lights
    }

    pub fn ac(&self) -> bool {
        self.ac
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn source(&self) -> OccupancySource {
        self.source
    }

    /// Apply a new occupancy observation, re-deriving the status.
    pub(crate) fn observe(
        &mut self,
        occupancy: u32,
        confidence: f64,
        source: OccupancySource,
    ) -> StatusChange {
        let previous = self.status;
        self.occupancy = occupancy;
        self.confidence = confidence;
        self.source = source;
        self.status = determine_status(self.occupancy, self.lights, self.ac);
        StatusChange {
            previous,
            current: self.status,
        }
    }
}

/// Status before and after a single observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub previous: RoomStatus,
    pub current: RoomStatus,
}

impl StatusChange {
    /// `true` only at the moment a room enters `waste`; staying in `waste`
    /// does not count.
    pub fn entered_waste(&self) -> bool {
        self.previous != RoomStatus::Waste && self.current == RoomStatus::Waste
    }
}

/// Result of [`RoomStore::update`](crate::RoomStore::update): the room as
/// written plus the transition it went through.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomUpdate {
    pub room: Room,
    pub change: StatusChange,
}
