use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use starhold_domain::{GameId, Player, PlayerId};

use crate::app::App;
use crate::infrastructure::http::ApiError;
use crate::infrastructure::persistence::{NewPlayer, PlayerPatch};

#[derive(Deserialize)]
pub struct PlayerListQuery {
    pub game_id: GameId,
}

pub async fn create_player(
    State(state): State<Arc<App>>,
    Json(player): Json<NewPlayer>,
) -> Result<Json<Player>, ApiError> {
    let player = state
        .players
        .create(player)
        .await
        .map_err(|e| ApiError::from_write("Failed to create player", e))?;
    Ok(Json(player))
}

pub async fn list_players(
    State(state): State<Arc<App>>,
    Query(query): Query<PlayerListQuery>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = state
        .players
        .fetch_many_by_game(query.game_id)
        .await
        .map_err(|e| ApiError::from_read("Failed to fetch players", e))?;
    Ok(Json(players))
}

pub async fn get_player(
    State(state): State<Arc<App>>,
    Path(id): Path<PlayerId>,
) -> Result<Json<Player>, ApiError> {
    let player = state
        .players
        .fetch_one(id)
        .await
        .map_err(|e| ApiError::from_read("Failed to fetch player", e))?
        .ok_or_else(|| ApiError::not_found(format!("Player {id} not found")))?;
    Ok(Json(player))
}

pub async fn update_player(
    State(state): State<Arc<App>>,
    Path(id): Path<PlayerId>,
    Json(patch): Json<PlayerPatch>,
) -> Result<Json<Player>, ApiError> {
    let player = state
        .players
        .update(id, patch)
        .await
        .map_err(|e| ApiError::from_write("Failed to update player", e))?
        .ok_or_else(|| ApiError::not_found(format!("Player {id} not found")))?;
    Ok(Json(player))
}

pub async fn delete_player(
    State(state): State<Arc<App>>,
    Path(id): Path<PlayerId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state
        .players
        .delete(id)
        .await
        .map_err(|e| ApiError::from_write("Failed to delete player", e))?;
    if !deleted {
        return Err(ApiError::not_found(format!("Player {id} not found")));
    }
    Ok(Json(serde_json::json!({ "deleted": id })))
}
