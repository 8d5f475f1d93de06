mod clock;
mod game;
mod person;
mod ship;
mod system;

pub use clock::{EventClock, EventClockGroup};
pub use game::{Game, Player};
pub use person::{Crew, Person, PersonSkill};
pub use ship::{
    FittingUsage, Ship, ShipCargo, ShipDefence, ShipFitting, ShipFittingLimit, ShipModification,
    ShipWeapon,
};
pub use system::{Location, StarSystem, SystemRef};
