//! Game repository. Plain CRUD; players, clocks, and clock groups cascade
//! with their game at the store level.

use serde::Deserialize;
use sqlx::sqlite::SqliteRow;
use sqlx::QueryBuilder;
use starhold_domain::{Game, GameId};

use super::row::{get, get_id};
use crate::infrastructure::db::Db;
use crate::infrastructure::error::RepoError;

pub struct GameRepository {
    db: Db,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGame {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GamePatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl GamePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

impl GameRepository {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn create(&self, game: NewGame) -> Result<Game, RepoError> {
        let id = GameId::new();
        sqlx::query("INSERT INTO game (id, name, description) VALUES (?, ?, ?)")
            .bind(id.to_string())
            .bind(&game.name)
            .bind(&game.description)
            .execute(self.db.pool())
            .await?;

        tracing::info!("Created game {id} ({})", game.name);
        Ok(Game {
            id,
            name: game.name,
            description: game.description,
        })
    }

    pub async fn fetch_one(&self, id: GameId) -> Result<Option<Game>, RepoError> {
        let row = sqlx::query("SELECT * FROM game WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(self.db.pool())
            .await?;
        row.as_ref().map(game_from_row).transpose()
    }

    pub async fn fetch_all(&self) -> Result<Vec<Game>, RepoError> {
        let rows = sqlx::query("SELECT * FROM game ORDER BY name")
            .fetch_all(self.db.pool())
            .await?;
        rows.iter().map(game_from_row).collect()
    }

    pub async fn update(&self, id: GameId, patch: GamePatch) -> Result<Option<Game>, RepoError> {
        if patch.is_empty() {
            return self.fetch_one(id).await;
        }

        let mut builder: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE game SET ");
        {
            let mut sep = builder.separated(", ");
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

    /// Returns whether a row was actually removed.
    pub async fn delete(&self, id: GameId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM game WHERE id = ?")
            .bind(id.to_string())
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn game_from_row(row: &SqliteRow) -> Result<Game, RepoError> {
    Ok(Game {
        id: get_id(row, "id")?,
        name: get(row, "name")?,
        description: get(row, "description")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::Db;

    async fn test_repo() -> GameRepository {
        let db = Db::connect_in_memory().await.expect("in-memory pool");
        db.ensure_schema().await.expect("schema");
        GameRepository::new(db)
    }

    #[tokio::test]
    async fn test_crud_round_trip() {
        let repo = test_repo().await;

        let game = repo
            .create(NewGame {
                name: "Polychrome Run".into(),
                description: Some("SWN campaign".into()),
            })
            .await
            .expect("create");

        let fetched = repo
            .fetch_one(game.id)
            .await
            .expect("fetch")
            .expect("present");
        assert_eq!(fetched.name, "Polychrome Run");

        let updated = repo
            .update(
                game.id,
                GamePatch {
                    name: Some("Polychrome Rundown".into()),
                    description: None,
                },
            )
            .await
            .expect("update")
            .expect("present");
        assert_eq!(updated.name, "Polychrome Rundown");
        assert_eq!(updated.description.as_deref(), Some("SWN campaign"));

        assert!(repo.delete(game.id).await.expect("delete"));
        assert!(!repo.delete(game.id).await.expect("second delete"));
    }

    #[tokio::test]
    async fn test_fetch_all() {
        let repo = test_repo().await;
        for name in ["B game", "A game"] {
            repo.create(NewGame {
                name: name.into(),
                description: None,
            })
            .await
            .expect("create");
        }
        let games = repo.fetch_all().await.expect("all");
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].name, "A game");
    }
}
