// ── Status derivation ──

use crate::model::RoomStatus;

/// Derive a room's status from its occupancy and fixture state.
///
/// Any occupant makes the room `Occupied`. An empty room with lights or AC
/// still on is `Waste`; with everything off it is `Empty`.
///
/// This is the only place the rule lives. [`Room`](crate::Room) calls it on
/// construction and on every observation; nothing else writes a status.
pub fn determine_status(occupancy: u32, lights_on: bool, ac_on: bool) -> RoomStatus {
    if occupancy > 0 {
        RoomStatus::Occupied
    } else if lights_on || ac_on {
        RoomStatus::Waste
    } else {
        RoomStatus::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_occupant_means_occupied() {
        for occupancy in [1, 2, 40, u32::MAX] {
            for (lights, ac) in [(false, false), (true, false), (false, true), (true, true)] {
                assert_eq!(
                    determine_status(occupancy, lights, ac),
                    RoomStatus::Occupied,
                    "occupancy={occupancy} lights={lights} ac={ac}"
                );
            }
        }
    }

    #[test]
    fn empty_room_with_fixture_on_is_waste() {
        assert_eq!(determine_status(0, true, false), RoomStatus::Waste);
        assert_eq!(determine_status(0, false, true), RoomStatus::Waste);
        assert_eq!(determine_status(0, true, true), RoomStatus::Waste);
    }

    #[test]
    fn empty_room_with_everything_off_is_empty() {
        assert_eq!(determine_status(0, false, false), RoomStatus::Empty);
    }
}
