//! Ships and their owned equipment collections.
//!
//! A ship aggregate carries five owned collections (weapons, defences,
//! fittings, modifications, cargo), its crew postings, and at most one
//! fitting limit. Owned rows reference the ship and are removed with it.

use serde::{Deserialize, Serialize};

use crate::entities::person::Crew;
use crate::ids::{
    CargoId, DefenceId, FittingId, FittingLimitId, LocationId, ModificationId, PersonId, ShipId,
    WeaponId,
};

/// A ship and everything bolted onto it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub captain: PersonId,
    pub registry: String,
    pub hull: String,
    pub class: String,
    pub location: Option<LocationId>,
    pub value: i64,
    pub speed: i64,
    pub bounty: i64,
    pub armour: i64,
    pub current_hp: i64,
    pub max_hp: i64,
    pub armour_class: i64,
    pub cargo_mass_limit: i64,
    pub crew: Vec<Crew>,
    pub fittings: Vec<ShipFitting>,
    pub fitting_limit: Option<ShipFittingLimit>,
    pub modifications: Vec<ShipModification>,
    pub weapons: Vec<ShipWeapon>,
    pub defences: Vec<ShipDefence>,
    pub cargo: Vec<ShipCargo>,
}

impl Ship {
    /// Total mass/power/hardpoints consumed by installed fittings.
    ///
    /// The limits themselves are not enforced anywhere; this is the hook
    /// callers can compare against [`Ship::fitting_limit`].
    pub fn fitting_usage(&self) -> FittingUsage {
        let mut usage = FittingUsage::default();
        for fitting in &self.fittings {
            usage.mass += fitting.mass;
            usage.power += fitting.power;
            usage.hardpoints += fitting.hardpoints;
        }
        usage
    }
}

/// Summed fitting consumption, comparable against a [`ShipFittingLimit`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FittingUsage {
    pub mass: i64,
    pub power: i64,
    pub hardpoints: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipFitting {
    pub id: FittingId,
    pub ship: ShipId,
    pub name: String,
    pub description: Option<String>,
    pub mass: i64,
    pub power: i64,
    pub hardpoints: i64,
}

/// Capacity ceiling for a ship's fittings. Zero or one per ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipFittingLimit {
    pub id: FittingLimitId,
    pub ship: ShipId,
    pub power: i64,
    pub mass: i64,
    pub hardpoints: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipModification {
    pub id: ModificationId,
    pub ship: ShipId,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipWeapon {
    pub id: WeaponId,
    pub ship: ShipId,
    pub name: String,
    pub description: Option<String>,
    pub cost: i64,
    pub damage_die: Option<String>,
    pub damage_die_quantity: Option<i64>,
    pub mass: i64,
    pub power: i64,
    pub hardpoints: i64,
    pub minimum_class: Option<String>,
    pub tech_level: Option<i64>,
    pub qualities: Option<String>,
    pub current_ammunition: Option<i64>,
    pub max_ammunition: Option<i64>,
    pub replenishment_cost: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipDefence {
    pub id: DefenceId,
    pub ship: ShipId,
    pub name: String,
    pub description: Option<String>,
    pub cost: i64,
    pub power: i64,
    pub mass: i64,
    pub minimum_class: Option<String>,
    pub effect: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipCargo {
    pub id: CargoId,
    pub ship: ShipId,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i64,
    pub cost: i64,
    pub space_occupied: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitting(mass: i64, power: i64, hardpoints: i64) -> ShipFitting {
        ShipFitting {
            id: FittingId::new(),
            ship: ShipId::new(),
            name: "Drive upgrade".into(),
            description: None,
            mass,
            power,
            hardpoints,
        }
    }

    #[test]
    fn test_fitting_usage_sums_installed_fittings() {
        let mut ship = Ship {
            id: ShipId::new(),
            captain: PersonId::new(),
            registry: "SWN-001".into(),
            hull: "Free Merchant".into(),
            class: "Frigate".into(),
            location: None,
            value: 0,
            speed: 2,
            bounty: 0,
            armour: 5,
            current_hp: 20,
            max_hp: 20,
            armour_class: 14,
            cargo_mass_limit: 200,
            crew: vec![],
            fittings: vec![fitting(2, 1, 0), fitting(3, 2, 1)],
            fitting_limit: None,
            modifications: vec![],
            weapons: vec![],
            defences: vec![],
            cargo: vec![],
        };

        assert_eq!(
            ship.fitting_usage(),
            FittingUsage {
                mass: 5,
                power: 3,
                hardpoints: 1
            }
        );

        ship.fittings.clear();
        assert_eq!(ship.fitting_usage(), FittingUsage::default());
    }
}
