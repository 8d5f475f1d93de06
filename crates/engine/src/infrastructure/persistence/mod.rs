//! SQLite persistence repositories.
//!
//! One repository per entity, all speaking parameterized SQL through the
//! shared [`Db`](crate::infrastructure::db::Db) pool. Row mapping is always
//! by column name, never positional.

mod clock_repository;
mod game_repository;
mod location_repository;
mod person_repository;
mod player_repository;
mod row;
mod ship_repository;
mod system_repository;

pub use clock_repository::{ClockRepository, NewEventClock, NewEventClockGroup};
pub use game_repository::{GamePatch, GameRepository, NewGame};
pub use location_repository::{LocationPatch, LocationRepository, NewLocation};
pub use person_repository::{NewCrew, NewPerson, NewPersonSkill, PersonPatch, PersonRepository};
pub use player_repository::{NewPlayer, PlayerPatch, PlayerRepository};
pub use ship_repository::{
    NewShip, NewShipCargo, NewShipCrew, NewShipDefence, NewShipFitting, NewShipFittingLimit,
    NewShipModification, NewShipWeapon, ShipPage, ShipPatch, ShipRepository,
};
pub use system_repository::{NewSystem, SystemPatch, SystemRepository};

/// 1-based pagination with the service-wide defaults.
pub fn page_offset(page: u32, page_size: u32) -> i64 {
    let page = page.max(1);
    i64::from(page - 1) * i64::from(page_size)
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(2, 10), 10);
        assert_eq!(page_offset(3, 25), 50);
        // page 0 is treated as page 1
        assert_eq!(page_offset(0, 10), 0);
    }
}
