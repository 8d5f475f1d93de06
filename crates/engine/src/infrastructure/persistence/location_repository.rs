//! Location repository. Locations belong to exactly one system and cascade
//! with it; batch creation is transactional like the other multi-row paths.

use serde::Deserialize;
use sqlx::sqlite::SqliteRow;
use sqlx::QueryBuilder;
use starhold_domain::{Location, LocationId, SystemId};

use super::row::{get, get_id};
use crate::infrastructure::db::Db;
use crate::infrastructure::error::RepoError;

pub struct LocationRepository {
    db: Db,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLocation {
    pub system_id: SystemId,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationPatch {
    pub system_id: Option<SystemId>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl LocationPatch {
    pub fn is_empty(&self) -> bool {
        self.system_id.is_none() && self.name.is_none() && self.description.is_none()
    }
}

impl LocationRepository {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn create(&self, location: NewLocation) -> Result<Location, RepoError> {
        let id = LocationId::new();
        sqlx::query("INSERT INTO location (id, system, name, description) VALUES (?, ?, ?, ?)")
            .bind(id.to_string())
            .bind(location.system_id.to_string())
            .bind(&location.name)
            .bind(&location.description)
            .execute(self.db.pool())
            .await?;

        tracing::info!("Created location {id} ({})", location.name);
        Ok(Location {
            id,
            system_id: location.system_id,
            name: location.name,
            description: location.description,
        })
    }

    /// Insert a batch of locations in one transaction, all-or-nothing.
    pub async fn create_many(&self, locations: Vec<NewLocation>) -> Result<Vec<Location>, RepoError> {
        let mut tx = self.db.begin().await?;
        let mut created = Vec::with_capacity(locations.len());

        for location in locations {
            let id = LocationId::new();
            sqlx::query("INSERT INTO location (id, system, name, description) VALUES (?, ?, ?, ?)")
                .bind(id.to_string())
                .bind(location.system_id.to_string())
                .bind(&location.name)
                .bind(&location.description)
                .execute(&mut *tx)
                .await?;

            created.push(Location {
                id,
                system_id: location.system_id,
                name: location.name,
                description: location.description,
            });
        }

        tx.commit().await?;
        tracing::info!("Created {} locations", created.len());
        Ok(created)
    }

    pub async fn fetch_one(&self, id: LocationId) -> Result<Option<Location>, RepoError> {
        let row = sqlx::query("SELECT * FROM location WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(self.db.pool())
            .await?;
        row.as_ref().map(location_from_row).transpose()
    }

    pub async fn fetch_many_by_system(&self, system: SystemId) -> Result<Vec<Location>, RepoError> {
        let rows = sqlx::query("SELECT * FROM location WHERE system = ?")
            .bind(system.to_string())
            .fetch_all(self.db.pool())
            .await?;
        rows.iter().map(location_from_row).collect()
    }

    pub async fn update(
        &self,
        id: LocationId,
        patch: LocationPatch,
    ) -> Result<Option<Location>, RepoError> {
        if patch.is_empty() {
            return self.fetch_one(id).await;
        }

        let mut builder: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE location SET ");
        {
            let mut sep = builder.separated(", ");
            if let Some(v) = patch.system_id {
                sep.push("system = ").push_bind_unseparated(v.to_string());
            }
            if let Some(v) = patch.name {
                sep.push("name = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.description {
                sep.push("description = ").push_bind_unseparated(v);
            }
        }
        builder.push(" WHERE id = ").push_bind(id.to_string());

        let result = builder.build().execute(self.db.pool()).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch_one(id).await
    }

    pub async fn delete(&self, id: LocationId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM location WHERE id = ?")
            .bind(id.to_string())
            .execute(self.db.pool())
            .await?;
        tracing::info!("Deleted location {id}");
        Ok(())
    }
}

pub(crate) fn location_from_row(row: &SqliteRow) -> Result<Location, RepoError> {
    Ok(Location {
        id: get_id(row, "id")?,
        system_id: get_id(row, "system")?,
        name: get(row, "name")?,
        description: get(row, "description")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::Db;
    use crate::infrastructure::persistence::{NewSystem, SystemRepository};

    async fn test_db() -> Db {
        let db = Db::connect_in_memory().await.expect("in-memory pool");
        db.ensure_schema().await.expect("schema");
        db
    }

    #[tokio::test]
    async fn test_create_many_is_transactional() {
        let db = test_db().await;
        let systems = SystemRepository::new(db.clone());
        let repo = LocationRepository::new(db);

        let system = systems
            .create(NewSystem {
                name: "Cresence".into(),
            })
            .await
            .expect("system");

        // second row references a system that does not exist
        let result = repo
            .create_many(vec![
                NewLocation {
                    system_id: system.id,
                    name: "Highpoint Station".into(),
                    description: None,
                },
                NewLocation {
                    system_id: SystemId::new(),
                    name: "Ghost Port".into(),
                    description: None,
                },
            ])
            .await;
        assert!(result.is_err());

        let remaining = repo
            .fetch_many_by_system(system.id)
            .await
            .expect("list");
        assert!(remaining.is_empty(), "first row must not survive rollback");
    }

    #[tokio::test]
    async fn test_update_and_fetch() {
        let db = test_db().await;
        let systems = SystemRepository::new(db.clone());
        let repo = LocationRepository::new(db);

        let system = systems
            .create(NewSystem {
                name: "Cresence".into(),
            })
            .await
            .expect("system");
        let location = repo
            .create(NewLocation {
                system_id: system.id,
                name: "Highpoint Station".into(),
                description: None,
            })
            .await
            .expect("location");

        let updated = repo
            .update(
                location.id,
                LocationPatch {
                    description: Some("Orbital trade hub".into()),
                    ..LocationPatch::default()
                },
            )
            .await
            .expect("update")
            .expect("present");
        assert_eq!(updated.description.as_deref(), Some("Orbital trade hub"));
        assert_eq!(updated.name, "Highpoint Station");
    }
}
