//! Ship repository.
//!
//! A ship aggregate is one primary row plus seven related row sets
//! (weapons, defences, fittings, zero-or-one fitting limit, modifications,
//! crew, cargo). The related tables are disjoint, so the fetches are
//! independent and list order is irrelevant.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::QueryBuilder;
use starhold_domain::{
    CargoId, Crew, CrewId, DefenceId, FittingId, FittingLimitId, LocationId, ModificationId,
    PersonId, Ship, ShipCargo, ShipDefence, ShipFitting, ShipFittingLimit, ShipId,
    ShipModification, ShipWeapon, WeaponId,
};

use super::row::{get, get_id, get_opt_id};
use crate::infrastructure::db::Db;
use crate::infrastructure::error::RepoError;

pub struct ShipRepository {
    db: Db,
}

/// One page of ships plus the total ship count.
#[derive(Debug, Serialize)]
pub struct ShipPage {
    pub ships: Vec<Ship>,
    pub total: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewShip {
    pub captain: PersonId,
    pub registry: String,
    pub hull: String,
    pub class: String,
    pub location: Option<LocationId>,
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub speed: i64,
    #[serde(default)]
    pub bounty: i64,
    #[serde(default)]
    pub armour: i64,
    #[serde(default)]
    pub current_hp: i64,
    #[serde(default)]
    pub max_hp: i64,
    #[serde(default)]
    pub armour_class: i64,
    #[serde(default)]
    pub cargo_mass_limit: i64,
    /// Crew postings created in the same transaction; each binds the named
    /// person to the new ship.
    #[serde(default)]
    pub crew: Vec<NewShipCrew>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewShipCrew {
    pub person: PersonId,
    #[serde(default)]
    pub experience: i64,
    #[serde(default)]
    pub payrate: i64,
    pub role: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShipPatch {
    pub captain: Option<PersonId>,
    pub registry: Option<String>,
    pub hull: Option<String>,
    pub class: Option<String>,
    pub location: Option<LocationId>,
    pub value: Option<i64>,
    pub speed: Option<i64>,
    pub bounty: Option<i64>,
    pub armour: Option<i64>,
    pub current_hp: Option<i64>,
    pub max_hp: Option<i64>,
    pub armour_class: Option<i64>,
    pub cargo_mass_limit: Option<i64>,
}

impl ShipPatch {
    pub fn is_empty(&self) -> bool {
        self.captain.is_none()
            && self.registry.is_none()
            && self.hull.is_none()
            && self.class.is_none()
            && self.location.is_none()
            && self.value.is_none()
            && self.speed.is_none()
            && self.bounty.is_none()
            && self.armour.is_none()
            && self.current_hp.is_none()
            && self.max_hp.is_none()
            && self.armour_class.is_none()
            && self.cargo_mass_limit.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewShipWeapon {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub cost: i64,
    pub damage_die: Option<String>,
    pub damage_die_quantity: Option<i64>,
    #[serde(default)]
    pub mass: i64,
    #[serde(default)]
    pub power: i64,
    #[serde(default)]
    pub hardpoints: i64,
    pub minimum_class: Option<String>,
    pub tech_level: Option<i64>,
    pub qualities: Option<String>,
    pub current_ammunition: Option<i64>,
    pub max_ammunition: Option<i64>,
    pub replenishment_cost: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewShipDefence {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub cost: i64,
    #[serde(default)]
    pub power: i64,
    #[serde(default)]
    pub mass: i64,
    pub minimum_class: Option<String>,
    pub effect: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewShipFitting {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub mass: i64,
    #[serde(default)]
    pub power: i64,
    #[serde(default)]
    pub hardpoints: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewShipFittingLimit {
    #[serde(default)]
    pub power: i64,
    #[serde(default)]
    pub mass: i64,
    #[serde(default)]
    pub hardpoints: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewShipModification {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewShipCargo {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub cost: i64,
    #[serde(default)]
    pub space_occupied: i64,
}

impl ShipRepository {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Insert a batch of ships and their crew postings in one transaction.
    pub async fn create(&self, ships: Vec<NewShip>) -> Result<Vec<Ship>, RepoError> {
        let mut tx = self.db.begin().await?;
        let mut created = Vec::with_capacity(ships.len());

        for new_ship in ships {
            let ship_id = ShipId::new();
            sqlx::query(
                "INSERT INTO ship (id, captain, registry, hull, class, location, value, speed, \
                 bounty, armour, current_hp, max_hp, armour_class, cargo_mass_limit) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(ship_id.to_string())
            .bind(new_ship.captain.to_string())
            .bind(&new_ship.registry)
            .bind(&new_ship.hull)
            .bind(&new_ship.class)
            .bind(new_ship.location.map(|l| l.to_string()))
            .bind(new_ship.value)
            .bind(new_ship.speed)
            .bind(new_ship.bounty)
            .bind(new_ship.armour)
            .bind(new_ship.current_hp)
            .bind(new_ship.max_hp)
            .bind(new_ship.armour_class)
            .bind(new_ship.cargo_mass_limit)
            .execute(&mut *tx)
            .await?;

            let mut crew = Vec::with_capacity(new_ship.crew.len());
            for posting in &new_ship.crew {
                let crew_id = CrewId::new();
                sqlx::query(
                    "INSERT INTO crew (id, person, ship, experience, payrate, role) \
                     VALUES (?, ?, ?, ?, ?, ?)",
                )
                .bind(crew_id.to_string())
                .bind(posting.person.to_string())
                .bind(ship_id.to_string())
                .bind(posting.experience)
                .bind(posting.payrate)
                .bind(&posting.role)
                .execute(&mut *tx)
                .await?;

                crew.push(Crew {
                    id: crew_id,
                    person: posting.person,
                    ship: ship_id,
                    experience: posting.experience,
                    payrate: posting.payrate,
                    role: posting.role.clone(),
                });
            }

            created.push(Ship {
                id: ship_id,
                captain: new_ship.captain,
                registry: new_ship.registry,
                hull: new_ship.hull,
                class: new_ship.class,
                location: new_ship.location,
                value: new_ship.value,
                speed: new_ship.speed,
                bounty: new_ship.bounty,
                armour: new_ship.armour,
                current_hp: new_ship.current_hp,
                max_hp: new_ship.max_hp,
                armour_class: new_ship.armour_class,
                cargo_mass_limit: new_ship.cargo_mass_limit,
                crew,
                fittings: Vec::new(),
                fitting_limit: None,
                modifications: Vec::new(),
                weapons: Vec::new(),
                defences: Vec::new(),
                cargo: Vec::new(),
            });
        }

        tx.commit().await?;
        tracing::info!("Created {} ships", created.len());
        Ok(created)
    }

    /// Fetch one ship with all owned collections. `None` when the primary
    /// row is absent; related rows are never touched in that case.
    pub async fn fetch_one(&self, id: ShipId) -> Result<Option<Ship>, RepoError> {
        let row = sqlx::query("SELECT * FROM ship WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(self.db.pool())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(self.assemble(ship_from_row(&row)?).await?))
    }

    /// Fetch a page of ships (id order) plus the total count.
    pub async fn fetch_many(&self, page: u32, page_size: u32) -> Result<ShipPage, RepoError> {
        let offset = super::page_offset(page, page_size);
        let rows = sqlx::query("SELECT * FROM ship ORDER BY id LIMIT ? OFFSET ?")
            .bind(i64::from(page_size))
            .bind(offset)
            .fetch_all(self.db.pool())
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ship")
            .fetch_one(self.db.pool())
            .await?;

        let mut ships = Vec::with_capacity(rows.len());
        for row in &rows {
            ships.push(self.assemble(ship_from_row(row)?).await?);
        }

        Ok(ShipPage { ships, total })
    }

    /// Attach the seven related row sets to a mapped primary row.
    async fn assemble(&self, mut ship: Ship) -> Result<Ship, RepoError> {
        let id = ship.id.to_string();
        let pool = self.db.pool();

        let (weapons, defences, fittings, limit, modifications, crew, cargo) = tokio::try_join!(
            sqlx::query("SELECT * FROM ship_weapons WHERE ship = ?")
                .bind(&id)
                .fetch_all(pool),
            sqlx::query("SELECT * FROM ship_defences WHERE ship = ?")
                .bind(&id)
                .fetch_all(pool),
            sqlx::query("SELECT * FROM ship_fittings WHERE ship = ?")
                .bind(&id)
                .fetch_all(pool),
            sqlx::query("SELECT * FROM ship_fitting_limits WHERE ship = ?")
                .bind(&id)
                .fetch_optional(pool),
            sqlx::query("SELECT * FROM ship_modifications WHERE ship = ?")
                .bind(&id)
                .fetch_all(pool),
            sqlx::query("SELECT * FROM crew WHERE ship = ?")
                .bind(&id)
                .fetch_all(pool),
            sqlx::query("SELECT * FROM ship_cargo WHERE ship = ?")
                .bind(&id)
                .fetch_all(pool),
        )?;

        ship.weapons = weapons
            .iter()
            .map(weapon_from_row)
            .collect::<Result<_, _>>()?;
        ship.defences = defences
            .iter()
            .map(defence_from_row)
            .collect::<Result<_, _>>()?;
        ship.fittings = fittings
            .iter()
            .map(fitting_from_row)
            .collect::<Result<_, _>>()?;
        ship.fitting_limit = limit.as_ref().map(fitting_limit_from_row).transpose()?;
        ship.modifications = modifications
            .iter()
            .map(modification_from_row)
            .collect::<Result<_, _>>()?;
        ship.crew = crew.iter().map(crew_from_row).collect::<Result<_, _>>()?;
        ship.cargo = cargo.iter().map(cargo_from_row).collect::<Result<_, _>>()?;

        Ok(ship)
    }

    /// Partial update of the primary row; empty patch is a no-op.
    pub async fn update(&self, id: ShipId, patch: ShipPatch) -> Result<Option<Ship>, RepoError> {
        if patch.is_empty() {
            return self.fetch_one(id).await;
        }

        let mut builder: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE ship SET ");
        {
            let mut sep = builder.separated(", ");
            if let Some(v) = patch.captain {
                sep.push("captain = ").push_bind_unseparated(v.to_string());
            }
            if let Some(v) = patch.registry {
                sep.push("registry = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.hull {
                sep.push("hull = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.class {
                sep.push("class = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.location {
                sep.push("location = ").push_bind_unseparated(v.to_string());
            }
            if let Some(v) = patch.value {
                sep.push("value = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.speed {
                sep.push("speed = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.bounty {
                sep.push("bounty = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.armour {
                sep.push("armour = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.current_hp {
                sep.push("current_hp = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.max_hp {
                sep.push("max_hp = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.armour_class {
                sep.push("armour_class = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.cargo_mass_limit {
                sep.push("cargo_mass_limit = ").push_bind_unseparated(v);
            }
        }
        builder.push(" WHERE id = ").push_bind(id.to_string());

        let result = builder.build().execute(self.db.pool()).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        tracing::debug!("Updated ship {id}");
        self.fetch_one(id).await
    }

    /// Hard delete. Owned rows cascade via their foreign keys; the checked
    /// row count distinguishes a real delete from a missing id.
    pub async fn delete(&self, id: ShipId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM ship WHERE id = ?")
            .bind(id.to_string())
            .execute(self.db.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Ship", id));
        }
        tracing::info!("Deleted ship {id}");
        Ok(())
    }

    pub async fn move_to_location(
        &self,
        ship: ShipId,
        location: LocationId,
    ) -> Result<(), RepoError> {
        let result = sqlx::query("UPDATE ship SET location = ? WHERE id = ?")
            .bind(location.to_string())
            .bind(ship.to_string())
            .execute(self.db.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Ship", ship));
        }
        Ok(())
    }

    pub async fn add_weapon(
        &self,
        ship: ShipId,
        weapon: NewShipWeapon,
    ) -> Result<ShipWeapon, RepoError> {
        let id = WeaponId::new();
        sqlx::query(
            "INSERT INTO ship_weapons (id, ship, name, description, cost, damage_die, \
             damage_die_quantity, mass, power, hardpoints, minimum_class, tech_level, qualities, \
             current_ammunition, max_ammunition, replenishment_cost) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(ship.to_string())
        .bind(&weapon.name)
        .bind(&weapon.description)
        .bind(weapon.cost)
        .bind(&weapon.damage_die)
        .bind(weapon.damage_die_quantity)
        .bind(weapon.mass)
        .bind(weapon.power)
        .bind(weapon.hardpoints)
        .bind(&weapon.minimum_class)
        .bind(weapon.tech_level)
        .bind(&weapon.qualities)
        .bind(weapon.current_ammunition)
        .bind(weapon.max_ammunition)
        .bind(weapon.replenishment_cost)
        .execute(self.db.pool())
        .await?;

        Ok(ShipWeapon {
            id,
            ship,
            name: weapon.name,
            description: weapon.description,
            cost: weapon.cost,
            damage_die: weapon.damage_die,
            damage_die_quantity: weapon.damage_die_quantity,
            mass: weapon.mass,
            power: weapon.power,
            hardpoints: weapon.hardpoints,
            minimum_class: weapon.minimum_class,
            tech_level: weapon.tech_level,
            qualities: weapon.qualities,
            current_ammunition: weapon.current_ammunition,
            max_ammunition: weapon.max_ammunition,
            replenishment_cost: weapon.replenishment_cost,
        })
    }

    pub async fn remove_weapon(&self, ship: ShipId, weapon: WeaponId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM ship_weapons WHERE ship = ? AND id = ?")
            .bind(ship.to_string())
            .bind(weapon.to_string())
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    pub async fn add_defence(
        &self,
        ship: ShipId,
        defence: NewShipDefence,
    ) -> Result<ShipDefence, RepoError> {
        let id = DefenceId::new();
        sqlx::query(
            "INSERT INTO ship_defences (id, ship, name, description, cost, power, mass, \
             minimum_class, effect) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(ship.to_string())
        .bind(&defence.name)
        .bind(&defence.description)
        .bind(defence.cost)
        .bind(defence.power)
        .bind(defence.mass)
        .bind(&defence.minimum_class)
        .bind(&defence.effect)
        .execute(self.db.pool())
        .await?;

        Ok(ShipDefence {
            id,
            ship,
            name: defence.name,
            description: defence.description,
            cost: defence.cost,
            power: defence.power,
            mass: defence.mass,
            minimum_class: defence.minimum_class,
            effect: defence.effect,
        })
    }

    pub async fn remove_defence(&self, ship: ShipId, defence: DefenceId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM ship_defences WHERE ship = ? AND id = ?")
            .bind(ship.to_string())
            .bind(defence.to_string())
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    pub async fn add_fitting(
        &self,
        ship: ShipId,
        fitting: NewShipFitting,
    ) -> Result<ShipFitting, RepoError> {
        let id = FittingId::new();
        sqlx::query(
            "INSERT INTO ship_fittings (id, ship, name, description, mass, power, hardpoints) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(ship.to_string())
        .bind(&fitting.name)
        .bind(&fitting.description)
        .bind(fitting.mass)
        .bind(fitting.power)
        .bind(fitting.hardpoints)
        .execute(self.db.pool())
        .await?;

        Ok(ShipFitting {
            id,
            ship,
            name: fitting.name,
            description: fitting.description,
            mass: fitting.mass,
            power: fitting.power,
            hardpoints: fitting.hardpoints,
        })
    }

    pub async fn remove_fitting(&self, ship: ShipId, fitting: FittingId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM ship_fittings WHERE ship = ? AND id = ?")
            .bind(ship.to_string())
            .bind(fitting.to_string())
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    pub async fn add_modification(
        &self,
        ship: ShipId,
        modification: NewShipModification,
    ) -> Result<ShipModification, RepoError> {
        let id = ModificationId::new();
        sqlx::query(
            "INSERT INTO ship_modifications (id, ship, name, description) VALUES (?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(ship.to_string())
        .bind(&modification.name)
        .bind(&modification.description)
        .execute(self.db.pool())
        .await?;

        Ok(ShipModification {
            id,
            ship,
            name: modification.name,
            description: modification.description,
        })
    }

    pub async fn remove_modification(
        &self,
        ship: ShipId,
        modification: ModificationId,
    ) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM ship_modifications WHERE ship = ? AND id = ?")
            .bind(ship.to_string())
            .bind(modification.to_string())
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    pub async fn add_cargo(&self, ship: ShipId, cargo: NewShipCargo) -> Result<ShipCargo, RepoError> {
        let id = CargoId::new();
        sqlx::query(
            "INSERT INTO ship_cargo (id, ship, name, description, quantity, cost, space_occupied) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(ship.to_string())
        .bind(&cargo.name)
        .bind(&cargo.description)
        .bind(cargo.quantity)
        .bind(cargo.cost)
        .bind(cargo.space_occupied)
        .execute(self.db.pool())
        .await?;

        Ok(ShipCargo {
            id,
            ship,
            name: cargo.name,
            description: cargo.description,
            quantity: cargo.quantity,
            cost: cargo.cost,
            space_occupied: cargo.space_occupied,
        })
    }

    pub async fn remove_cargo(&self, ship: ShipId, cargo: CargoId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM ship_cargo WHERE ship = ? AND id = ?")
            .bind(ship.to_string())
            .bind(cargo.to_string())
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    /// Define (or replace) the single fitting-limit row for a ship.
    pub async fn define_fitting_limits(
        &self,
        ship: ShipId,
        limits: NewShipFittingLimit,
    ) -> Result<ShipFittingLimit, RepoError> {
        let id = FittingLimitId::new();
        sqlx::query(
            "INSERT INTO ship_fitting_limits (id, ship, power, mass, hardpoints) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT(ship) DO UPDATE SET power = excluded.power, mass = excluded.mass, \
             hardpoints = excluded.hardpoints",
        )
        .bind(id.to_string())
        .bind(ship.to_string())
        .bind(limits.power)
        .bind(limits.mass)
        .bind(limits.hardpoints)
        .execute(self.db.pool())
        .await?;

        let row = sqlx::query("SELECT * FROM ship_fitting_limits WHERE ship = ?")
            .bind(ship.to_string())
            .fetch_one(self.db.pool())
            .await?;
        fitting_limit_from_row(&row)
    }
}

fn ship_from_row(row: &SqliteRow) -> Result<Ship, RepoError> {
    Ok(Ship {
        id: get_id(row, "id")?,
        captain: get_id(row, "captain")?,
        registry: get(row, "registry")?,
        hull: get(row, "hull")?,
        class: get(row, "class")?,
        location: get_opt_id(row, "location")?,
        value: get(row, "value")?,
        speed: get(row, "speed")?,
        bounty: get(row, "bounty")?,
        armour: get(row, "armour")?,
        current_hp: get(row, "current_hp")?,
        max_hp: get(row, "max_hp")?,
        armour_class: get(row, "armour_class")?,
        cargo_mass_limit: get(row, "cargo_mass_limit")?,
        crew: Vec::new(),
        fittings: Vec::new(),
        fitting_limit: None,
        modifications: Vec::new(),
        weapons: Vec::new(),
        defences: Vec::new(),
        cargo: Vec::new(),
    })
}

fn weapon_from_row(row: &SqliteRow) -> Result<ShipWeapon, RepoError> {
    Ok(ShipWeapon {
        id: get_id(row, "id")?,
        ship: get_id(row, "ship")?,
        name: get(row, "name")?,
        description: get(row, "description")?,
        cost: get(row, "cost")?,
        damage_die: get(row, "damage_die")?,
        damage_die_quantity: get(row, "damage_die_quantity")?,
        mass: get(row, "mass")?,
        power: get(row, "power")?,
        hardpoints: get(row, "hardpoints")?,
        minimum_class: get(row, "minimum_class")?,
        tech_level: get(row, "tech_level")?,
        qualities: get(row, "qualities")?,
        current_ammunition: get(row, "current_ammunition")?,
        max_ammunition: get(row, "max_ammunition")?,
        replenishment_cost: get(row, "replenishment_cost")?,
    })
}

fn defence_from_row(row: &SqliteRow) -> Result<ShipDefence, RepoError> {
    Ok(ShipDefence {
        id: get_id(row, "id")?,
        ship: get_id(row, "ship")?,
        name: get(row, "name")?,
        description: get(row, "description")?,
        cost: get(row, "cost")?,
        power: get(row, "power")?,
        mass: get(row, "mass")?,
        minimum_class: get(row, "minimum_class")?,
        effect: get(row, "effect")?,
    })
}

fn fitting_from_row(row: &SqliteRow) -> Result<ShipFitting, RepoError> {
    Ok(ShipFitting {
        id: get_id(row, "id")?,
        ship: get_id(row, "ship")?,
        name: get(row, "name")?,
        description: get(row, "description")?,
        mass: get(row, "mass")?,
        power: get(row, "power")?,
        hardpoints: get(row, "hardpoints")?,
    })
}

fn fitting_limit_from_row(row: &SqliteRow) -> Result<ShipFittingLimit, RepoError> {
    Ok(ShipFittingLimit {
        id: get_id(row, "id")?,
        ship: get_id(row, "ship")?,
        power: get(row, "power")?,
        mass: get(row, "mass")?,
        hardpoints: get(row, "hardpoints")?,
    })
}

fn modification_from_row(row: &SqliteRow) -> Result<ShipModification, RepoError> {
    Ok(ShipModification {
        id: get_id(row, "id")?,
        ship: get_id(row, "ship")?,
        name: get(row, "name")?,
        description: get(row, "description")?,
    })
}

fn crew_from_row(row: &SqliteRow) -> Result<Crew, RepoError> {
    Ok(Crew {
        id: get_id(row, "id")?,
        person: get_id(row, "person")?,
        ship: get_id(row, "ship")?,
        experience: get(row, "experience")?,
        payrate: get(row, "payrate")?,
        role: get(row, "role")?,
    })
}

fn cargo_from_row(row: &SqliteRow) -> Result<ShipCargo, RepoError> {
    Ok(ShipCargo {
        id: get_id(row, "id")?,
        ship: get_id(row, "ship")?,
        name: get(row, "name")?,
        description: get(row, "description")?,
        quantity: get(row, "quantity")?,
        cost: get(row, "cost")?,
        space_occupied: get(row, "space_occupied")?,
    })
}
