use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use starhold_domain::{StarSystem, SystemId};

use crate::app::App;
use crate::infrastructure::http::ApiError;
use crate::infrastructure::persistence::{NewSystem, SystemPatch};

pub async fn create_system(
    State(state): State<Arc<App>>,
    Json(system): Json<NewSystem>,
) -> Result<Json<StarSystem>, ApiError> {
    let system = state
        .systems
        .create(system)
        .await
        .map_err(|e| ApiError::from_write("Failed to create system", e))?;
    Ok(Json(system))
}

pub async fn get_system(
    State(state): State<Arc<App>>,
    Path(id): Path<SystemId>,
) -> Result<Json<StarSystem>, ApiError> {
    let system = state
        .systems
        .fetch_one(id)
        .await
        .map_err(|e| ApiError::from_read("Failed to fetch system", e))?
        .ok_or_else(|| ApiError::not_found(format!("StarSystem {id} not found")))?;
    Ok(Json(system))
}

pub async fn update_system(
    State(state): State<Arc<App>>,
    Path(id): Path<SystemId>,
    Json(patch): Json<SystemPatch>,
) -> Result<Json<StarSystem>, ApiError> {
    let system = state
        .systems
        .update(id, patch)
        .await
        .map_err(|e| ApiError::from_write("Failed to update system", e))?
        .ok_or_else(|| ApiError::not_found(format!("StarSystem {id} not found")))?;
    Ok(Json(system))
}

pub async fn delete_system(
    State(state): State<Arc<App>>,
    Path(id): Path<SystemId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .systems
        .delete(id)
        .await
        .map_err(|e| ApiError::from_write("Failed to delete system", e))?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

#[derive(Deserialize)]
pub struct AddNeighbor {
    pub neighbor: SystemId,
}

/// Adjacency is symmetric; adding a neighbor links both directions.
pub async fn add_neighbor(
    State(state): State<Arc<App>>,
    Path(id): Path<SystemId>,
    Json(body): Json<AddNeighbor>,
) -> Result<Json<StarSystem>, ApiError> {
    state
        .systems
        .add_neighbor(id, body.neighbor)
        .await
        .map_err(|e| ApiError::from_write("Failed to add neighbor", e))?;
    let system = state
        .systems
        .fetch_one(id)
        .await
        .map_err(|e| ApiError::from_read("Failed to fetch system", e))?
        .ok_or_else(|| ApiError::not_found(format!("StarSystem {id} not found")))?;
    Ok(Json(system))
}
