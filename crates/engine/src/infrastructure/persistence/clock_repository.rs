//! Event clock repository.
//!
//! Advancing is a plain additive increment done store-side, so two calls
//! with n1 then n2 land exactly where one call with n1+n2 would. Advancing
//! a group touches every clock whose group reference matches and returns
//! the group itself, not the clocks; callers re-fetch when they need them.

use serde::Deserialize;
use sqlx::sqlite::SqliteRow;
use starhold_domain::{ClockGroupId, ClockId, EventClock, EventClockGroup, GameId};

use super::row::{get, get_id, get_opt_id};
use crate::infrastructure::db::Db;
use crate::infrastructure::error::RepoError;

pub struct ClockRepository {
    db: Db,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEventClock {
    pub name: String,
    pub description: Option<String>,
    pub segments: i64,
    pub game_id: GameId,
    pub group_id: Option<ClockGroupId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEventClockGroup {
    pub name: String,
    pub description: Option<String>,
    pub game_id: GameId,
}

impl ClockRepository {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn create_clock(&self, clock: NewEventClock) -> Result<EventClock, RepoError> {
        let id = ClockId::new();
        sqlx::query(
            "INSERT INTO event_clock (id, name, description, segments, elapsed_segments, game_id, \
             group_id) VALUES (?, ?, ?, ?, 0, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&clock.name)
        .bind(&clock.description)
        .bind(clock.segments)
        .bind(clock.game_id.to_string())
        .bind(clock.group_id.map(|g| g.to_string()))
        .execute(self.db.pool())
        .await?;

        tracing::info!("Created event clock {id} ({})", clock.name);
        Ok(EventClock {
            id,
            name: clock.name,
            description: clock.description,
            segments: clock.segments,
            elapsed_segments: 0,
            game_id: clock.game_id,
            group_id: clock.group_id,
        })
    }

    pub async fn create_group(
        &self,
        group: NewEventClockGroup,
    ) -> Result<EventClockGroup, RepoError> {
        let id = ClockGroupId::new();
        sqlx::query(
            "INSERT INTO event_clock_group (id, name, description, game_id) VALUES (?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&group.name)
        .bind(&group.description)
        .bind(group.game_id.to_string())
        .execute(self.db.pool())
        .await?;

        tracing::info!("Created event clock group {id} ({})", group.name);
        Ok(EventClockGroup {
            id,
            name: group.name,
            description: group.description,
            game_id: group.game_id,
        })
    }

    pub async fn fetch_clock(&self, id: ClockId) -> Result<Option<EventClock>, RepoError> {
        let row = sqlx::query("SELECT * FROM event_clock WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(self.db.pool())
            .await?;
        row.as_ref().map(clock_from_row).transpose()
    }

    pub async fn fetch_group(
        &self,
        id: ClockGroupId,
    ) -> Result<Option<EventClockGroup>, RepoError> {
        let row = sqlx::query("SELECT * FROM event_clock_group WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(self.db.pool())
            .await?;
        row.as_ref().map(group_from_row).transpose()
    }

    pub async fn fetch_clocks_by_group(
        &self,
        group: ClockGroupId,
    ) -> Result<Vec<EventClock>, RepoError> {
        let rows = sqlx::query("SELECT * FROM event_clock WHERE group_id = ?")
            .bind(group.to_string())
            .fetch_all(self.db.pool())
            .await?;
        rows.iter().map(clock_from_row).collect()
    }

    pub async fn attach_to_group(
        &self,
        clock: ClockId,
        group: ClockGroupId,
    ) -> Result<EventClock, RepoError> {
        let row = sqlx::query("UPDATE event_clock SET group_id = ? WHERE id = ? RETURNING *")
            .bind(group.to_string())
            .bind(clock.to_string())
            .fetch_optional(self.db.pool())
            .await?
            .ok_or_else(|| RepoError::not_found("EventClock", clock))?;
        clock_from_row(&row)
    }

    pub async fn detach_from_group(&self, clock: ClockId) -> Result<EventClock, RepoError> {
        let row = sqlx::query("UPDATE event_clock SET group_id = NULL WHERE id = ? RETURNING *")
            .bind(clock.to_string())
            .fetch_optional(self.db.pool())
            .await?
            .ok_or_else(|| RepoError::not_found("EventClock", clock))?;
        clock_from_row(&row)
    }

    /// Additive advance; elapsed segments are not clamped to the total.
    pub async fn advance_clock(&self, clock: ClockId, segments: i64) -> Result<EventClock, RepoError> {
        let row = sqlx::query(
            "UPDATE event_clock SET elapsed_segments = elapsed_segments + ? WHERE id = ? \
             RETURNING *",
        )
        .bind(segments)
        .bind(clock.to_string())
        .fetch_optional(self.db.pool())
        .await?
        .ok_or_else(|| RepoError::not_found("EventClock", clock))?;
        clock_from_row(&row)
    }

    /// Advance every clock currently in the group. Returns the group, not
    /// the updated clocks; callers re-fetch via
    /// [`ClockRepository::fetch_clocks_by_group`] when they need them.
    pub async fn advance_group(
        &self,
        group: ClockGroupId,
        segments: i64,
    ) -> Result<EventClockGroup, RepoError> {
        sqlx::query("UPDATE event_clock SET elapsed_segments = elapsed_segments + ? WHERE group_id = ?")
            .bind(segments)
            .bind(group.to_string())
            .execute(self.db.pool())
            .await?;

        self.fetch_group(group)
            .await?
            .ok_or_else(|| RepoError::not_found("EventClockGroup", group))
    }

    pub async fn delete_clock(&self, clock: ClockId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM event_clock WHERE id = ?")
            .bind(clock.to_string())
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    /// Delete a group and its member clocks, child rows first, in one
    /// transaction.
    pub async fn delete_group(&self, group: ClockGroupId) -> Result<(), RepoError> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM event_clock WHERE group_id = ?")
            .bind(group.to_string())
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM event_clock_group WHERE id = ?")
            .bind(group.to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!("Deleted event clock group {group}");
        Ok(())
    }
}

fn clock_from_row(row: &SqliteRow) -> Result<EventClock, RepoError> {
    Ok(EventClock {
        id: get_id(row, "id")?,
        name: get(row, "name")?,
        description: get(row, "description")?,
        segments: get(row, "segments")?,
        elapsed_segments: get(row, "elapsed_segments")?,
        game_id: get_id(row, "game_id")?,
        group_id: get_opt_id(row, "group_id")?,
    })
}

fn group_from_row(row: &SqliteRow) -> Result<EventClockGroup, RepoError> {
    Ok(EventClockGroup {
        id: get_id(row, "id")?,
        name: get(row, "name")?,
        description: get(row, "description")?,
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

    async fn game(db: &Db) -> GameId {
        let repo = GameRepository::new(db.clone());
        repo.create(NewGame {
            name: "Polychrome Run".into(),
            description: None,
        })
        .await
        .expect("game")
        .id
    }

    fn new_clock(game_id: GameId, name: &str) -> NewEventClock {
        NewEventClock {
            name: name.into(),
            description: None,
            segments: 8,
            game_id,
            group_id: None,
        }
    }

    #[tokio::test]
    async fn test_advance_is_additive() {
        let db = test_db().await;
        let game_id = game(&db).await;
        let repo = ClockRepository::new(db);

        let a = repo
            .create_clock(new_clock(game_id, "Warmind wakes"))
            .await
            .expect("clock");
        let b = repo
            .create_clock(new_clock(game_id, "Warmind wakes (control)"))
            .await
            .expect("clock");

        repo.advance_clock(a.id, 2).await.expect("advance");
        let split = repo.advance_clock(a.id, 3).await.expect("advance");
        let single = repo.advance_clock(b.id, 5).await.expect("advance");

        assert_eq!(split.elapsed_segments, 5);
        assert_eq!(split.elapsed_segments, single.elapsed_segments);
    }

    #[tokio::test]
    async fn test_advance_does_not_clamp() {
        let db = test_db().await;
        let game_id = game(&db).await;
        let repo = ClockRepository::new(db);

        let clock = repo
            .create_clock(new_clock(game_id, "Overrun"))
            .await
            .expect("clock");
        let advanced = repo.advance_clock(clock.id, 12).await.expect("advance");
        assert_eq!(advanced.elapsed_segments, 12);
        assert!(advanced.is_filled());
    }

    #[tokio::test]
    async fn test_advance_missing_clock_is_not_found() {
        let db = test_db().await;
        let repo = ClockRepository::new(db);
        let err = repo
            .advance_clock(ClockId::new(), 1)
            .await
            .expect_err("missing");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_group_advance_scopes_to_members() {
        let db = test_db().await;
        let game_id = game(&db).await;
        let repo = ClockRepository::new(db);

        let group = repo
            .create_group(NewEventClockGroup {
                name: "Faction turn".into(),
                description: None,
                game_id,
            })
            .await
            .expect("group");

        let member_a = repo
            .create_clock(new_clock(game_id, "Blockade tightens"))
            .await
            .expect("clock");
        let member_b = repo
            .create_clock(new_clock(game_id, "Strike brews"))
            .await
            .expect("clock");
        let outsider = repo
            .create_clock(new_clock(game_id, "Totally unrelated"))
            .await
            .expect("clock");

        repo.attach_to_group(member_a.id, group.id)
            .await
            .expect("attach");
        repo.attach_to_group(member_b.id, group.id)
            .await
            .expect("attach");

        let returned = repo.advance_group(group.id, 3).await.expect("advance");
        assert_eq!(returned.id, group.id);

        let members = repo
            .fetch_clocks_by_group(group.id)
            .await
            .expect("members");
        assert_eq!(members.len(), 2);
        assert!(members.iter().all(|c| c.elapsed_segments == 3));

        let untouched = repo
            .fetch_clock(outsider.id)
            .await
            .expect("fetch")
            .expect("present");
        assert_eq!(untouched.elapsed_segments, 0);
    }

    #[tokio::test]
    async fn test_attach_detach_round_trip() {
        let db = test_db().await;
        let game_id = game(&db).await;
        let repo = ClockRepository::new(db);

        let group = repo
            .create_group(NewEventClockGroup {
                name: "Faction turn".into(),
                description: None,
                game_id,
            })
            .await
            .expect("group");
        let clock = repo
            .create_clock(new_clock(game_id, "Blockade tightens"))
            .await
            .expect("clock");

        let attached = repo
            .attach_to_group(clock.id, group.id)
            .await
            .expect("attach");
        assert_eq!(attached.group_id, Some(group.id));

        let detached = repo.detach_from_group(clock.id).await.expect("detach");
        assert_eq!(detached.group_id, None);
    }

    #[tokio::test]
    async fn test_delete_group_removes_member_clocks() {
        let db = test_db().await;
        let game_id = game(&db).await;
        let repo = ClockRepository::new(db);

        let group = repo
            .create_group(NewEventClockGroup {
                name: "Faction turn".into(),
                description: None,
                game_id,
            })
            .await
            .expect("group");
        let member = repo
            .create_clock(NewEventClock {
                group_id: Some(group.id),
                ..new_clock(game_id, "Blockade tightens")
            })
            .await
            .expect("clock");
        let loose = repo
            .create_clock(new_clock(game_id, "Loose clock"))
            .await
            .expect("clock");

        repo.delete_group(group.id).await.expect("delete");

        assert!(repo.fetch_group(group.id).await.expect("fetch").is_none());
        assert!(repo.fetch_clock(member.id).await.expect("fetch").is_none());
        assert!(repo.fetch_clock(loose.id).await.expect("fetch").is_some());
    }
}
