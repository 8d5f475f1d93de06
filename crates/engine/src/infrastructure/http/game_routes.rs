use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use starhold_domain::{Game, GameId};

use crate::app::App;
use crate::infrastructure::http::ApiError;
use crate::infrastructure::persistence::{GamePatch, NewGame};

pub async fn create_game(
    State(state): State<Arc<App>>,
    Json(game): Json<NewGame>,
) -> Result<Json<Game>, ApiError> {
    let game = state
        .games
        .create(game)
        .await
        .map_err(|e| ApiError::from_write("Failed to create game", e))?;
    Ok(Json(game))
}

pub async fn list_games(State(state): State<Arc<App>>) -> Result<Json<Vec<Game>>, ApiError> {
    let games = state
        .games
        .fetch_all()
        .await
        .map_err(|e| ApiError::from_read("Failed to fetch games", e))?;
    Ok(Json(games))
}

pub async fn get_game(
    State(state): State<Arc<App>>,
    Path(id): Path<GameId>,
) -> Result<Json<Game>, ApiError> {
    let game = state
        .games
        .fetch_one(id)
        .await
        .map_err(|e| ApiError::from_read("Failed to fetch game", e))?
        .ok_or_else(|| ApiError::not_found(format!("Game {id} not found")))?;
    Ok(Json(game))
}

pub async fn update_game(
    State(state): State<Arc<App>>,
    Path(id): Path<GameId>,
    Json(patch): Json<GamePatch>,
) -> Result<Json<Game>, ApiError> {
    let game = state
        .games
        .update(id, patch)
        .await
        .map_err(|e| ApiError::from_write("Failed to update game", e))?
        .ok_or_else(|| ApiError::not_found(format!("Game {id} not found")))?;
    Ok(Json(game))
}

pub async fn delete_game(
    State(state): State<Arc<App>>,
    Path(id): Path<GameId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state
        .games
        .delete(id)
        .await
        .map_err(|e| ApiError::from_write("Failed to delete game", e))?;
    if !deleted {
        return Err(ApiError::not_found(format!("Game {id} not found")));
    }
    Ok(Json(serde_json::json!({ "deleted": id })))
}
