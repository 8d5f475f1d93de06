//! SQLite connection management.
//!
//! One pool is constructed at process start and handed to every repository;
//! there is no hidden global. Cascades are declared at the schema level, so
//! deleting a parent never needs hand-rolled child sweeps outside the
//! clock-group path (which deletes inside one transaction instead).

use std::str::FromStr;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};

use crate::infrastructure::error::RepoError;

/// Shared SQLite connection pool.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        tracing::info!("Connected to SQLite at {}", url);

        Ok(Self { pool })
    }

    /// In-memory database on a single connection, for tests.
    pub async fn connect_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Open a scoped transaction. Commit explicitly on success; dropping the
    /// handle without committing rolls everything back, including on error
    /// return paths.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, RepoError> {
        Ok(self.pool.begin().await?)
    }

    /// Initialize the database schema (create tables and indexes)
    pub async fn ensure_schema(&self) -> Result<()> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS game (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS players (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT,
                game_id TEXT NOT NULL REFERENCES game(id) ON DELETE CASCADE
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS person (
                id TEXT PRIMARY KEY,
                first_name TEXT NOT NULL,
                nickname TEXT,
                last_name TEXT NOT NULL,
                vice TEXT,
                description TEXT,
                regret TEXT,
                goal TEXT,
                age INTEGER CHECK (age IS NULL OR age >= 0),
                sex TEXT,
                gender TEXT,
                living INTEGER NOT NULL DEFAULT 1
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS person_skills (
                id TEXT PRIMARY KEY,
                person TEXT NOT NULL REFERENCES person(id) ON DELETE CASCADE,
                skill TEXT NOT NULL,
                description TEXT
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS systems (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS neighboring_systems (
                system_a TEXT NOT NULL REFERENCES systems(id) ON DELETE CASCADE,
                system_b TEXT NOT NULL REFERENCES systems(id) ON DELETE CASCADE,
                PRIMARY KEY (system_a, system_b)
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS location (
                id TEXT PRIMARY KEY,
                system TEXT NOT NULL REFERENCES systems(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                description TEXT
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS ship (
                id TEXT PRIMARY KEY,
                captain TEXT NOT NULL REFERENCES person(id),
                registry TEXT NOT NULL,
                hull TEXT NOT NULL,
                class TEXT NOT NULL,
                location TEXT REFERENCES location(id) ON DELETE SET NULL,
                value INTEGER NOT NULL DEFAULT 0,
                speed INTEGER NOT NULL DEFAULT 0,
                bounty INTEGER NOT NULL DEFAULT 0,
                armour INTEGER NOT NULL DEFAULT 0,
                current_hp INTEGER NOT NULL DEFAULT 0,
                max_hp INTEGER NOT NULL DEFAULT 0,
                armour_class INTEGER NOT NULL DEFAULT 0,
                cargo_mass_limit INTEGER NOT NULL DEFAULT 0
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS crew (
                id TEXT PRIMARY KEY,
                person TEXT NOT NULL REFERENCES person(id) ON DELETE CASCADE,
                ship TEXT NOT NULL REFERENCES ship(id) ON DELETE CASCADE,
                experience INTEGER NOT NULL DEFAULT 0,
                payrate INTEGER NOT NULL DEFAULT 0,
                role TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS ship_weapons (
                id TEXT PRIMARY KEY,
                ship TEXT NOT NULL REFERENCES ship(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                description TEXT,
                cost INTEGER NOT NULL DEFAULT 0,
                damage_die TEXT,
                damage_die_quantity INTEGER,
                mass INTEGER NOT NULL DEFAULT 0,
                power INTEGER NOT NULL DEFAULT 0,
                hardpoints INTEGER NOT NULL DEFAULT 0,
                minimum_class TEXT,
                tech_level INTEGER,
                qualities TEXT,
                current_ammunition INTEGER,
                max_ammunition INTEGER,
                replenishment_cost INTEGER
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS ship_defences (
                id TEXT PRIMARY KEY,
                ship TEXT NOT NULL REFERENCES ship(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                description TEXT,
                cost INTEGER NOT NULL DEFAULT 0,
                power INTEGER NOT NULL DEFAULT 0,
                mass INTEGER NOT NULL DEFAULT 0,
                minimum_class TEXT,
                effect TEXT
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS ship_fittings (
                id TEXT PRIMARY KEY,
                ship TEXT NOT NULL REFERENCES ship(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                description TEXT,
                mass INTEGER NOT NULL DEFAULT 0,
                power INTEGER NOT NULL DEFAULT 0,
                hardpoints INTEGER NOT NULL DEFAULT 0
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS ship_fitting_limits (
                id TEXT PRIMARY KEY,
                ship TEXT NOT NULL UNIQUE REFERENCES ship(id) ON DELETE CASCADE,
                power INTEGER NOT NULL DEFAULT 0,
                mass INTEGER NOT NULL DEFAULT 0,
                hardpoints INTEGER NOT NULL DEFAULT 0
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS ship_modifications (
                id TEXT PRIMARY KEY,
                ship TEXT NOT NULL REFERENCES ship(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                description TEXT
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS ship_cargo (
                id TEXT PRIMARY KEY,
                ship TEXT NOT NULL REFERENCES ship(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                description TEXT,
                quantity INTEGER NOT NULL DEFAULT 0,
                cost INTEGER NOT NULL DEFAULT 0,
                space_occupied INTEGER NOT NULL DEFAULT 0
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS event_clock_group (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                game_id TEXT NOT NULL REFERENCES game(id) ON DELETE CASCADE
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS event_clock (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                segments INTEGER NOT NULL,
                elapsed_segments INTEGER NOT NULL DEFAULT 0,
                game_id TEXT NOT NULL REFERENCES game(id) ON DELETE CASCADE,
                group_id TEXT REFERENCES event_clock_group(id) ON DELETE CASCADE
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_person_skills_person ON person_skills(person)",
            "CREATE INDEX IF NOT EXISTS idx_crew_person ON crew(person)",
            "CREATE INDEX IF NOT EXISTS idx_crew_ship ON crew(ship)",
            "CREATE INDEX IF NOT EXISTS idx_ship_weapons_ship ON ship_weapons(ship)",
            "CREATE INDEX IF NOT EXISTS idx_ship_defences_ship ON ship_defences(ship)",
            "CREATE INDEX IF NOT EXISTS idx_ship_fittings_ship ON ship_fittings(ship)",
            "CREATE INDEX IF NOT EXISTS idx_ship_modifications_ship ON ship_modifications(ship)",
            "CREATE INDEX IF NOT EXISTS idx_ship_cargo_ship ON ship_cargo(ship)",
            "CREATE INDEX IF NOT EXISTS idx_event_clock_group_id ON event_clock(group_id)",
            "CREATE INDEX IF NOT EXISTS idx_players_game_id ON players(game_id)",
            "CREATE INDEX IF NOT EXISTS idx_location_system ON location(system)",
        ];

        for statement in statements {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        tracing::info!("Database schema initialized");
        Ok(())
    }
}
