//! Application state and composition.

use crate::infrastructure::db::Db;
use crate::infrastructure::persistence::{
    ClockRepository, GameRepository, LocationRepository, PersonRepository, PlayerRepository,
    ShipRepository, SystemRepository,
};

/// Main application state.
///
/// Holds one repository per aggregate, all sharing the same pool. Passed to
/// HTTP handlers via axum state.
pub struct App {
    pub people: PersonRepository,
    pub ships: ShipRepository,
    pub clocks: ClockRepository,
    pub games: GameRepository,
    pub players: PlayerRepository,
    pub systems: SystemRepository,
    pub locations: LocationRepository,
}

impl App {
    pub fn new(db: Db) -> Self {
        Self {
            people: PersonRepository::new(db.clone()),
            ships: ShipRepository::new(db.clone()),
            clocks: ClockRepository::new(db.clone()),
            games: GameRepository::new(db.clone()),
            players: PlayerRepository::new(db.clone()),
            systems: SystemRepository::new(db.clone()),
            locations: LocationRepository::new(db),
        }
    }
}
