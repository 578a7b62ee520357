// ── Alert domain types ──

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use super::room::Room;

/// Fixed message for a room that just became wasteful.
pub const ENERGY_WASTE_MESSAGE: &str =
    "Room is empty but lights/AC still ON \u{2014} energy waste detected by Vision AI.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum AlertKind {
    Warning,
}

/// An immutable record of a detected status transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub room_id: String,
    pub room_name: String,
    pub message: String,
    /// Local wall-clock `HH:MM` at which the alert was raised.
    pub time: String,
    pub raised_at: DateTime<Utc>,
}

impl Alert {
    /// Warning for a room that just entered the `waste` state.
    pub fn energy_waste(room: &Room) -> Self {
        let raised_at = Utc::now();
        Self {
            kind: AlertKind::Warning,
            room_id: room.code().to_owned(),
            room_name: room.name().to_owned(),
            message: ENERGY_WASTE_MESSAGE.to_owned(),
            time: raised_at.with_timezone(&Local).format("%H:%M").to_string(),
            raised_at,
        }
    }
}
