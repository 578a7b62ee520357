// ── Room store ──

use indexmap::IndexMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{OccupancySource, OccupancySummary, Room, RoomUpdate};

/// Insertion-ordered room records keyed by room code.
///
/// `update` is the only write path for occupancy fields, and it runs as a
/// single write-locked section so readers never see a half-applied
/// observation.
#[derive(Debug, Default)]
pub struct RoomStore {
    rooms: RwLock<IndexMap<String, Room>>,
}

impl RoomStore {
    pub fn new(rooms: impl IntoIterator<Item = Room>) -> Self {
        let rooms = rooms
            .into_iter()
            .map(|room| (room.code().to_owned(), room))
            .collect();
        Self {
            rooms: RwLock::new(rooms),
        }
    }

    /// Store pre-populated with the default building.
    pub fn seeded() -> Self {
        Self::new(crate::seed::rooms())
    }

    pub async fn get(&self, room_id: &str) -> Result<Room, CoreError> {
        self.rooms
            .read()
            .await
            .get(room_id)
            .cloned()
            .ok_or_else(|| CoreError::room_not_found(room_id))
    }

    pub async fn contains(&self, room_id: &str) -> bool {
        self.rooms.read().await.contains_key(room_id)
    }

    /// All rooms in insertion order.
    pub async fn list(&self) -> Vec<Room> {
        self.rooms.read().await.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.rooms.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rooms.read().await.is_empty()
    }

    /// Record an observation, re-deriving the status.
    ///
    /// Returns the room as written plus its `(previous, current)` status.
    pub async fn update(
        &self,
        room_id: &str,
        occupancy: u32,
        confidence: f64,
        source: OccupancySource,
    ) -> Result<RoomUpdate, CoreError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| CoreError::room_not_found(room_id))?;

        let change = room.observe(occupancy, confidence, source);
        debug!(
            room_id,
            occupancy,
            previous = %change.previous,
            status = %change.current,
            "room updated"
        );

        Ok(RoomUpdate {
            room: room.clone(),
            change,
        })
    }

    pub async fn summary(&self) -> OccupancySummary {
        OccupancySummary::from_rooms(self.rooms.read().await.values())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::RoomStatus;

    #[tokio::test]
    async fn list_preserves_seed_order() {
        let store = RoomStore::seeded();
        let codes: Vec<String> = store
            .list()
            .await
            .iter()
            .map(|r| r.code().to_owned())
            .collect();
        assert_eq!(codes, ["A1", "A2", "B1", "B2", "C1", "C2"]);
        assert_eq!(store.len().await, 6);
    }

    #[tokio::test]
    async fn get_unknown_room_is_not_found() {
        let store = RoomStore::seeded();
        let err = store.get("Z9").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!store.contains("Z9").await);
    }

    #[tokio::test]
    async fn update_rederives_status_and_reports_change() {
        let store = RoomStore::seeded();

        let update = store
            .update("A1", 0, 0.91, OccupancySource::BrowserWebcam)
            .await
            .unwrap();
        assert_eq!(update.change.previous, RoomStatus::Occupied);
        assert_eq!(update.change.current, RoomStatus::Waste);
        assert_eq!(update.room.occupancy(), 0);

        let stored = store.get("A1").await.unwrap();
        assert_eq!(stored, update.room);
        assert_eq!(stored.source(), OccupancySource::BrowserWebcam);
    }

    #[tokio::test]
    async fn update_unknown_room_leaves_store_untouched() {
        let store = RoomStore::seeded();
        let before = store.list().await;

        let err = store
            .update("Z9", 3, 0.5, OccupancySource::BrowserWebcam)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.list().await, before);
    }

    #[tokio::test]
    async fn summary_matches_room_filter() {
        let store = RoomStore::seeded();
        store
            .update("A2", 0, 0.8, OccupancySource::BrowserWebcam)
            .await
            .unwrap();

        let rooms = store.list().await;
        let summary = store.summary().await;

        let waste: Vec<String> = rooms
            .iter()
            .filter(|r| r.status() == RoomStatus::Waste)
            .map(|r| r.code().to_owned())
            .collect();
        let occupied = rooms
            .iter()
            .filter(|r| r.status() == RoomStatus::Occupied)
            .count();

        assert_eq!(summary.total_rooms, rooms.len());
        assert_eq!(summary.occupied, occupied);
        assert_eq!(summary.waste, waste.len());
        assert_eq!(summary.waste_rooms, waste);
        assert_eq!(summary.waste_rooms, ["A2", "B1", "B2", "C2"]);
    }
}
