use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use starhold_domain::{Location, LocationId, SystemId};

use crate::app::App;
use crate::infrastructure::http::ApiError;
use crate::infrastructure::persistence::{LocationPatch, NewLocation};

pub async fn create_locations(
    State(state): State<Arc<App>>,
    Json(locations): Json<Vec<NewLocation>>,
) -> Result<Json<Vec<Location>>, ApiError> {
    if locations.is_empty() {
        return Err(ApiError::bad_request(
            "Failed to create locations",
            "request body must contain at least one location",
        ));
    }
    let created = state
        .locations
        .create_many(locations)
        .await
        .map_err(|e| ApiError::from_write("Failed to create locations", e))?;
    Ok(Json(created))
}

#[derive(Deserialize)]
pub struct LocationListQuery {
    pub system_id: SystemId,
}

pub async fn list_locations(
    State(state): State<Arc<App>>,
    Query(query): Query<LocationListQuery>,
) -> Result<Json<Vec<Location>>, ApiError> {
    let locations = state
        .locations
        .fetch_many_by_system(query.system_id)
        .await
        .map_err(|e| ApiError::from_read("Failed to fetch locations", e))?;
    Ok(Json(locations))
}

pub async fn get_location(
    State(state): State<Arc<App>>,
    Path(id): Path<LocationId>,
) -> Result<Json<Location>, ApiError> {
    let location = state
        .locations
        .fetch_one(id)
        .await
        .map_err(|e| ApiError::from_read("Failed to fetch location", e))?
        .ok_or_else(|| ApiError::not_found(format!("Location {id} not found")))?;
    Ok(Json(location))
}

pub async fn update_location(
    State(state): State<Arc<App>>,
    Path(id): Path<LocationId>,
    Json(patch): Json<LocationPatch>,
) -> Result<Json<Location>, ApiError> {
    let location = state
        .locations
        .update(id, patch)
        .await
        .map_err(|e| ApiError::from_write("Failed to update location", e))?
        .ok_or_else(|| ApiError::not_found(format!("Location {id} not found")))?;
    Ok(Json(location))
}

pub async fn delete_location(
    State(state): State<Arc<App>>,
    Path(id): Path<LocationId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .locations
        .delete(id)
        .await
        .map_err(|e| ApiError::from_write("Failed to delete location", e))?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}
