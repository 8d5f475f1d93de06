//! Player repository. Players belong to exactly one game and cascade with
//! it; deleting a player reports whether a row was removed.

use serde::Deserialize;
use sqlx::sqlite::SqliteRow;
use sqlx::QueryBuilder;
use starhold_domain::{GameId, Player, PlayerId};

use super::row::{get, get_id};
use crate::infrastructure::db::Db;
use crate::infrastructure::error::RepoError;

pub struct PlayerRepository {
    db: Db,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    pub email: Option<String>,
    pub game_id: GameId,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl PlayerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

impl PlayerRepository {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn create(&self, player: NewPlayer) -> Result<Player, RepoError> {
        let id = PlayerId::new();
        sqlx::query("INSERT INTO players (id, name, email, game_id) VALUES (?, ?, ?, ?)")
            .bind(id.to_string())
            .bind(&player.name)
            .bind(&player.email)
            .bind(player.game_id.to_string())
            .execute(self.db.pool())
            .await?;

        tracing::info!("Created player {id} ({})", player.name);
        Ok(Player {
            id,
            name: player.name,
            email: player.email,
            game_id: player.game_id,
        })
    }

    pub async fn fetch_one(&self, id: PlayerId) -> Result<Option<Player>, RepoError> {
        let row = sqlx::query("SELECT * FROM players WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(self.db.pool())
            .await?;
        row.as_ref().map(player_from_row).transpose()
    }

    pub async fn fetch_many_by_game(&self, game: GameId) -> Result<Vec<Player>, RepoError> {
        let rows = sqlx::query("SELECT * FROM players WHERE game_id = ?")
            .bind(game.to_string())
            .fetch_all(self.db.pool())
            .await?;
        rows.iter().map(player_from_row).collect()
    }

    pub async fn update(
        &self,
        id: PlayerId,
        patch: PlayerPatch,
    ) -> Result<Option<Player>, RepoError> {
        if patch.is_empty() {
            return self.fetch_one(id).await;
        }

        let mut builder: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE players SET ");
        {
            let mut sep = builder.separated(", ");
            if let Some(v) = patch.name {
                sep.push("name = ").push_bind_unseparated(v);
            }
            if let Some(v) = patch.email {
                sep.push("email = ").push_bind_unseparated(v);
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
    pub async fn delete(&self, id: PlayerId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id.to_string())
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn player_from_row(row: &SqliteRow) -> Result<Player, RepoError> {
    Ok(Player {
        id: get_id(row, "id")?,
        name: get(row, "name")?,
        email: get(row, "email")?,
        game_id: get_id(row, "game_id")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::Db;
    use crate::infrastructure::persistence::{GameRepository, NewGame};

    async fn test_db() -> Db {
        let db = Db::connect_in_memory().await.expect("in-memory pool");
        db.ensure_schema().await.expect("schema");
        db
    }

    #[tokio::test]
    async fn test_players_scoped_to_game() {
        let db = test_db().await;
        let games = GameRepository::new(db.clone());
        let repo = PlayerRepository::new(db);

        let game_a = games
            .create(NewGame {
                name: "A".into(),
                description: None,
            })
            .await
            .expect("game");
        let game_b = games
            .create(NewGame {
                name: "B".into(),
                description: None,
            })
            .await
            .expect("game");

        repo.create(NewPlayer {
            name: "Sam".into(),
            email: Some("sam@example.com".into()),
            game_id: game_a.id,
        })
        .await
        .expect("player");
        repo.create(NewPlayer {
            name: "Noor".into(),
            email: None,
            game_id: game_b.id,
        })
        .await
        .expect("player");

        let players = repo.fetch_many_by_game(game_a.id).await.expect("list");
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Sam");
    }

    #[tokio::test]
    async fn test_delete_reports_row_count() {
        let db = test_db().await;
        let games = GameRepository::new(db.clone());
        let repo = PlayerRepository::new(db);

        let game = games
            .create(NewGame {
                name: "A".into(),
                description: None,
            })
            .await
            .expect("game");
        let player = repo
            .create(NewPlayer {
                name: "Sam".into(),
                email: None,
                game_id: game.id,
            })
            .await
            .expect("player");

        assert!(repo.delete(player.id).await.expect("delete"));
        assert!(!repo.delete(player.id).await.expect("second delete"));
    }

    #[tokio::test]
    async fn test_players_cascade_with_game() {
        let db = test_db().await;
        let games = GameRepository::new(db.clone());
        let repo = PlayerRepository::new(db);

        let game = games
            .create(NewGame {
                name: "A".into(),
                description: None,
            })
            .await
            .expect("game");
        let player = repo
            .create(NewPlayer {
                name: "Sam".into(),
                email: None,
                game_id: game.id,
            })
            .await
            .expect("player");

        games.delete(game.id).await.expect("delete game");
        assert!(repo.fetch_one(player.id).await.expect("fetch").is_none());
    }
}
