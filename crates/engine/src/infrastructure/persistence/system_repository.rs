//! Star system repository.
//!
//! Neighbor adjacency is symmetric: one logical edge is stored as two rows,
//! written together in a transaction so the map can never hold a one-way
//! hyperspace lane.

use serde::Deserialize;
use sqlx::sqlite::SqliteRow;
use starhold_domain::{StarSystem, SystemId, SystemRef};

use super::location_repository::location_from_row;
use super::row::{get, get_id};
use crate::infrastructure::db::Db;
use crate::infrastructure::error::RepoError;

pub struct SystemRepository {
    db: Db,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSystem {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemPatch {
    pub name: Option<String>,
}

impl SystemRepository {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn create(&self, system: NewSystem) -> Result<StarSystem, RepoError> {
        let id = SystemId::new();
        sqlx::query("INSERT INTO systems (id, name) VALUES (?, ?)")
            .bind(id.to_string())
            .bind(&system.name)
            .execute(self.db.pool())
            .await?;

        tracing::info!("Created system {id} ({})", system.name);
        Ok(StarSystem {
            id,
            name: system.name,
            neighbors: Vec::new(),
            locations: Vec::new(),
        })
    }

    /// Fetch a system with its neighbors and locations. `None` when the
    /// primary row is absent.
    pub async fn fetch_one(&self, id: SystemId) -> Result<Option<StarSystem>, RepoError> {
        let row = sqlx::query("SELECT * FROM systems WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(self.db.pool())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut system = StarSystem {
            id: get_id(&row, "id")?,
            name: get(&row, "name")?,
            neighbors: Vec::new(),
            locations: Vec::new(),
        };

        let neighbor_rows = sqlx::query(
            "SELECT s.id, s.name FROM neighboring_systems n \
             JOIN systems s ON s.id = n.system_b WHERE n.system_a = ?",
        )
        .bind(id.to_string())
        .fetch_all(self.db.pool())
        .await?;
        for row in &neighbor_rows {
            system.neighbors.push(SystemRef {
                id: get_id(row, "id")?,
                name: get(row, "name")?,
            });
        }

        let location_rows = sqlx::query("SELECT * FROM location WHERE system = ?")
            .bind(id.to_string())
            .fetch_all(self.db.pool())
            .await?;
        for row in &location_rows {
            system.locations.push(location_from_row(row)?);
        }

        Ok(Some(system))
    }

    pub async fn update(
        &self,
        id: SystemId,
        patch: SystemPatch,
    ) -> Result<Option<StarSystem>, RepoError> {
        let Some(name) = patch.name else {
            return self.fetch_one(id).await;
        };

        let result = sqlx::query("UPDATE systems SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id.to_string())
            .execute(self.db.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch_one(id).await
    }

    pub async fn delete(&self, id: SystemId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM systems WHERE id = ?")
            .bind(id.to_string())
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    /// Record a symmetric adjacency between two systems.
    pub async fn add_neighbor(&self, a: SystemId, b: SystemId) -> Result<(), RepoError> {
        let mut tx = self.db.begin().await?;
        sqlx::query("INSERT OR IGNORE INTO neighboring_systems (system_a, system_b) VALUES (?, ?)")
            .bind(a.to_string())
            .bind(b.to_string())
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT OR IGNORE INTO neighboring_systems (system_a, system_b) VALUES (?, ?)")
            .bind(b.to_string())
            .bind(a.to_string())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::Db;
    use crate::infrastructure::persistence::{LocationRepository, NewLocation};

    async fn test_db() -> Db {
        let db = Db::connect_in_memory().await.expect("in-memory pool");
        db.ensure_schema().await.expect("schema");
        db
    }

    #[tokio::test]
    async fn test_neighbors_are_symmetric() {
        let db = test_db().await;
        let repo = SystemRepository::new(db);

        let cresence = repo
            .create(NewSystem {
                name: "Cresence".into(),
            })
            .await
            .expect("system");
        let tartarus = repo
            .create(NewSystem {
                name: "Tartarus".into(),
            })
            .await
            .expect("system");

        repo.add_neighbor(cresence.id, tartarus.id)
            .await
            .expect("edge");

        let a = repo
            .fetch_one(cresence.id)
            .await
            .expect("fetch")
            .expect("present");
        let b = repo
            .fetch_one(tartarus.id)
            .await
            .expect("fetch")
            .expect("present");
        assert_eq!(a.neighbors.len(), 1);
        assert_eq!(a.neighbors[0].id, tartarus.id);
        assert_eq!(b.neighbors.len(), 1);
        assert_eq!(b.neighbors[0].id, cresence.id);
    }

    #[tokio::test]
    async fn test_fetch_includes_locations() {
        let db = test_db().await;
        let repo = SystemRepository::new(db.clone());
        let locations = LocationRepository::new(db);

        let system = repo
            .create(NewSystem {
                name: "Cresence".into(),
            })
            .await
            .expect("system");
        locations
            .create(NewLocation {
                system_id: system.id,
                name: "Highpoint Station".into(),
                description: None,
            })
            .await
            .expect("location");

        let fetched = repo
            .fetch_one(system.id)
            .await
            .expect("fetch")
            .expect("present");
        assert_eq!(fetched.locations.len(), 1);
        assert_eq!(fetched.locations[0].name, "Highpoint Station");
    }

    #[tokio::test]
    async fn test_delete_cascades_edges_and_locations() {
        let db = test_db().await;
        let repo = SystemRepository::new(db.clone());

        let a = repo.create(NewSystem { name: "A".into() }).await.expect("a");
        let b = repo.create(NewSystem { name: "B".into() }).await.expect("b");
        repo.add_neighbor(a.id, b.id).await.expect("edge");

        repo.delete(a.id).await.expect("delete");

        let edges: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM neighboring_systems")
            .fetch_one(db.pool())
            .await
            .expect("count");
        assert_eq!(edges, 0);

        let remaining = repo
            .fetch_one(b.id)
            .await
            .expect("fetch")
            .expect("present");
        assert!(remaining.neighbors.is_empty());
    }
}
