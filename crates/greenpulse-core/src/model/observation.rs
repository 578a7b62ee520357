// ── Observation and aggregate types ──

use serde::{Deserialize, Serialize};

use super::room::{Room, RoomStatus};

/// Normalized output of the classification adapter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// People in frame.
    pub count: u32,
    /// In `[0, 1]`, rounded to two decimals.
    pub confidence: f64,
}

/// Outcome of a successful `analyze` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub room_id: String,
    pub count: u32,
    pub confidence: f64,
    pub status: RoomStatus,
    /// Local wall-clock `HH:MM:SS`.
    pub timestamp: String,
}

impl Observation {
    pub(crate) fn new(room_id: &str, classification: Classification, status: RoomStatus) -> Self {
        Self {
            room_id: room_id.to_owned(),
            count: classification.count,
            confidence: classification.confidence,
            status,
            timestamp: super::clock_timestamp(),
        }
    }
}

/// Building-wide counts derived from current room state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancySummary {
    pub total_rooms: usize,
    pub occupied: usize,
    pub waste: usize,
    pub waste_rooms: Vec<String>,
}

impl OccupancySummary {
    pub fn from_rooms<'a>(rooms: impl IntoIterator<Item = &'a Room>) -> Self {
        rooms
            .into_iter()
            .fold(Self::default(), |mut summary, room| {
                summary.total_rooms += 1;
                match room.status() {
                    RoomStatus::Occupied => summary.occupied += 1,
                    RoomStatus::Waste => {
                        summary.waste += 1;
                        summary.waste_rooms.push(room.code().to_owned());
                    }
                    RoomStatus::Empty => {}
                }
                summary
            })
    }
}
