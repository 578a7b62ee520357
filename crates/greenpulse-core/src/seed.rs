// ── Seed data ──
//
// The building the backend starts with. Room records are rebuilt from this
// table on every process start; nothing is persisted.

use indexmap::IndexMap;
use url::Url;

use crate::model::{OccupancySource, Room, RoomSpec};

/// Room whose occupancy is fed by a browser webcam out of the box.
pub const DEFAULT_LIVE_ROOM: &str = "B2";

#[allow(clippy::too_many_arguments)]
fn room(
    code: &str,
    name: &str,
    occupancy: u32,
    capacity: u32,
    lights: bool,
    ac: bool,
    energy: u32,
    confidence: f64,
    source: OccupancySource,
) -> Room {
    Room::new(RoomSpec {
        code: code.to_owned(),
        name: name.to_owned(),
        occupancy,
        capacity,
        lights,
        ac,
        energy,
        confidence,
        source,
    })
}

/// The six seeded rooms in display order.
pub fn rooms() -> Vec<Room> {
    use OccupancySource::{BrowserWebcam, Static};

    vec![
        room("A1", "Conference Room A", 8, 12, true, true, 18, 0.95, Static),
        room("A2", "Open Office A", 24, 40, true, true, 32, 0.92, Static),
        room("B1", "Server Room", 0, 4, false, true, 45, 0.99, Static),
        room("B2", "Break Room", 0, 20, true, true, 12, 0.0, BrowserWebcam),
        room("C1", "Lab Space", 6, 15, true, true, 28, 0.88, Static),
        room("C2", "Training Room", 0, 30, true, true, 22, 0.0, Static),
    ]
}

const DEFAULT_IMAGE_URLS: &[(&str, &str)] = &[
    (
        "A1",
        "https://images.unsplash.com/photo-1517502884422-41eaead166d4?w=640&q=80",
    ),
    (
        "A2",
        "https://images.unsplash.com/photo-1497366216548-37526070297c?w=640&q=80",
    ),
    (
        "B1",
        "https://images.unsplash.com/photo-1558494949-ef010cbdcc31?w=640&q=80",
    ),
    (
        "C1",
        "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158?w=640&q=80",
    ),
    (
        "C2",
        "https://images.unsplash.com/photo-1524758631624-e2822e304c36?w=640&q=80",
    ),
];

/// Static reference image per room. The live room has none.
pub fn default_room_images() -> IndexMap<String, Url> {
    DEFAULT_IMAGE_URLS
        .iter()
        .filter_map(|(code, raw)| Url::parse(raw).ok().map(|url| ((*code).to_owned(), url)))
        .collect()
}
