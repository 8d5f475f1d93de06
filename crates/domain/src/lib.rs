//! Starhold domain types.
//!
//! Entities and typed ids shared by the engine. No I/O lives here;
//! persistence and HTTP concerns belong to the engine crate.

pub mod entities;
pub mod ids;

pub use entities::{
    Crew, EventClock, EventClockGroup, FittingUsage, Game, Location, Person, PersonSkill, Player,
    Ship, ShipCargo, ShipDefence, ShipFitting, ShipFittingLimit, ShipModification, ShipWeapon,
    StarSystem, SystemRef,
};
pub use ids::{
    CargoId, ClockGroupId, ClockId, CrewId, DefenceId, FittingId, FittingLimitId, GameId,
    LocationId, ModificationId, PersonId, PlayerId, ShipId, SkillId, SystemId, WeaponId,
};
