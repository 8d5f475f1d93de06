use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use starhold_domain::{
    CargoId, DefenceId, FittingId, LocationId, ModificationId, Ship, ShipCargo, ShipDefence,
    ShipFitting, ShipFittingLimit, ShipId, ShipModification, ShipWeapon, WeaponId,
};

use crate::app::App;
use crate::infrastructure::http::{ApiError, Pagination};
use crate::infrastructure::persistence::{
    NewShip, NewShipCargo, NewShipDefence, NewShipFitting, NewShipFittingLimit,
    NewShipModification, NewShipWeapon, ShipPage, ShipPatch,
};

pub async fn create_ships(
    State(state): State<Arc<App>>,
    Json(ships): Json<Vec<NewShip>>,
) -> Result<(StatusCode, Json<Vec<Ship>>), ApiError> {
    if ships.is_empty() {
        return Err(ApiError::bad_request(
            "Failed to create ships",
            "request body must contain at least one ship",
        ));
    }
    let created = state
        .ships
        .create(ships)
        .await
        .map_err(|e| ApiError::from_write("Failed to create ships", e))?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_ships(
    State(state): State<Arc<App>>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ShipPage>, ApiError> {
    let page = state
        .ships
        .fetch_many(pagination.page(), pagination.limit())
        .await
        .map_err(|e| ApiError::from_read("Failed to fetch ships", e))?;
    Ok(Json(page))
}

pub async fn get_ship(
    State(state): State<Arc<App>>,
    Path(id): Path<ShipId>,
) -> Result<Json<Ship>, ApiError> {
    let ship = state
        .ships
        .fetch_one(id)
        .await
        .map_err(|e| ApiError::from_read("Failed to fetch ship", e))?
        .ok_or_else(|| ApiError::not_found(format!("Ship {id} not found")))?;
    Ok(Json(ship))
}

pub async fn update_ship(
    State(state): State<Arc<App>>,
    Path(id): Path<ShipId>,
    Json(patch): Json<ShipPatch>,
) -> Result<Json<Ship>, ApiError> {
    let ship = state
        .ships
        .update(id, patch)
        .await
        .map_err(|e| ApiError::from_write("Failed to update ship", e))?
        .ok_or_else(|| ApiError::not_found(format!("Ship {id} not found")))?;
    Ok(Json(ship))
}

pub async fn delete_ship(
    State(state): State<Arc<App>>,
    Path(id): Path<ShipId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .ships
        .delete(id)
        .await
        .map_err(|e| ApiError::from_write("Failed to delete ship", e))?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

#[derive(Deserialize)]
pub struct MoveShip {
    pub location: LocationId,
}

pub async fn move_ship(
    State(state): State<Arc<App>>,
    Path(id): Path<ShipId>,
    Json(body): Json<MoveShip>,
) -> Result<Json<Ship>, ApiError> {
    state
        .ships
        .move_to_location(id, body.location)
        .await
        .map_err(|e| ApiError::from_write("Failed to move ship", e))?;
    let ship = state
        .ships
        .fetch_one(id)
        .await
        .map_err(|e| ApiError::from_read("Failed to fetch ship", e))?
        .ok_or_else(|| ApiError::not_found(format!("Ship {id} not found")))?;
    Ok(Json(ship))
}

#[derive(Deserialize)]
pub struct AddWeapons {
    pub weapons: Vec<NewShipWeapon>,
}

pub async fn add_weapon(
    State(state): State<Arc<App>>,
    Path(id): Path<ShipId>,
    Json(body): Json<AddWeapons>,
) -> Result<Json<Vec<ShipWeapon>>, ApiError> {
    let mut added = Vec::with_capacity(body.weapons.len());
    for weapon in body.weapons {
        let weapon = state
            .ships
            .add_weapon(id, weapon)
            .await
            .map_err(|e| ApiError::from_write("Failed to add weapon", e))?;
        added.push(weapon);
    }
    Ok(Json(added))
}

#[derive(Deserialize)]
pub struct RemoveWeapons {
    pub weapon_ids: Vec<WeaponId>,
}

pub async fn remove_weapon(
    State(state): State<Arc<App>>,
    Path(id): Path<ShipId>,
    Json(body): Json<RemoveWeapons>,
) -> Result<Json<serde_json::Value>, ApiError> {
    for weapon in &body.weapon_ids {
        state
            .ships
            .remove_weapon(id, *weapon)
            .await
            .map_err(|e| ApiError::from_write("Failed to remove weapon", e))?;
    }
    Ok(Json(serde_json::json!({ "removed": body.weapon_ids })))
}

#[derive(Deserialize)]
pub struct AddDefences {
    pub defences: Vec<NewShipDefence>,
}

pub async fn add_defence(
    State(state): State<Arc<App>>,
    Path(id): Path<ShipId>,
    Json(body): Json<AddDefences>,
) -> Result<Json<Vec<ShipDefence>>, ApiError> {
    let mut added = Vec::with_capacity(body.defences.len());
    for defence in body.defences {
        let defence = state
            .ships
            .add_defence(id, defence)
            .await
            .map_err(|e| ApiError::from_write("Failed to add defence", e))?;
        added.push(defence);
    }
    Ok(Json(added))
}

#[derive(Deserialize)]
pub struct RemoveDefences {
    pub defence_ids: Vec<DefenceId>,
}

pub async fn remove_defence(
    State(state): State<Arc<App>>,
    Path(id): Path<ShipId>,
    Json(body): Json<RemoveDefences>,
) -> Result<Json<serde_json::Value>, ApiError> {
    for defence in &body.defence_ids {
        state
            .ships
            .remove_defence(id, *defence)
            .await
            .map_err(|e| ApiError::from_write("Failed to remove defence", e))?;
    }
    Ok(Json(serde_json::json!({ "removed": body.defence_ids })))
}

#[derive(Deserialize)]
pub struct AddFittings {
    pub fittings: Vec<NewShipFitting>,
}

pub async fn add_fitting(
    State(state): State<Arc<App>>,
    Path(id): Path<ShipId>,
    Json(body): Json<AddFittings>,
) -> Result<Json<Vec<ShipFitting>>, ApiError> {
    let mut added = Vec::with_capacity(body.fittings.len());
    for fitting in body.fittings {
        let fitting = state
            .ships
            .add_fitting(id, fitting)
            .await
            .map_err(|e| ApiError::from_write("Failed to add fitting", e))?;
        added.push(fitting);
    }
    Ok(Json(added))
}

#[derive(Deserialize)]
pub struct RemoveFittings {
    pub fitting_ids: Vec<FittingId>,
}

pub async fn remove_fitting(
    State(state): State<Arc<App>>,
    Path(id): Path<ShipId>,
    Json(body): Json<RemoveFittings>,
) -> Result<Json<serde_json::Value>, ApiError> {
    for fitting in &body.fitting_ids {
        state
            .ships
            .remove_fitting(id, *fitting)
            .await
            .map_err(|e| ApiError::from_write("Failed to remove fitting", e))?;
    }
    Ok(Json(serde_json::json!({ "removed": body.fitting_ids })))
}

#[derive(Deserialize)]
pub struct AddModifications {
    pub modifications: Vec<NewShipModification>,
}

pub async fn add_modification(
    State(state): State<Arc<App>>,
    Path(id): Path<ShipId>,
    Json(body): Json<AddModifications>,
) -> Result<Json<Vec<ShipModification>>, ApiError> {
    let mut added = Vec::with_capacity(body.modifications.len());
    for modification in body.modifications {
        let modification = state
            .ships
            .add_modification(id, modification)
            .await
            .map_err(|e| ApiError::from_write("Failed to add modification", e))?;
        added.push(modification);
    }
    Ok(Json(added))
}

#[derive(Deserialize)]
pub struct RemoveModifications {
    pub modification_ids: Vec<ModificationId>,
}

pub async fn remove_modification(
    State(state): State<Arc<App>>,
    Path(id): Path<ShipId>,
    Json(body): Json<RemoveModifications>,
) -> Result<Json<serde_json::Value>, ApiError> {
    for modification in &body.modification_ids {
        state
            .ships
            .remove_modification(id, *modification)
            .await
            .map_err(|e| ApiError::from_write("Failed to remove modification", e))?;
    }
    Ok(Json(serde_json::json!({ "removed": body.modification_ids })))
}

#[derive(Deserialize)]
pub struct AddCargo {
    pub cargo: Vec<NewShipCargo>,
}

pub async fn add_cargo(
    State(state): State<Arc<App>>,
    Path(id): Path<ShipId>,
    Json(body): Json<AddCargo>,
) -> Result<Json<Vec<ShipCargo>>, ApiError> {
    let mut added = Vec::with_capacity(body.cargo.len());
    for cargo in body.cargo {
        let cargo = state
            .ships
            .add_cargo(id, cargo)
            .await
            .map_err(|e| ApiError::from_write("Failed to add cargo", e))?;
        added.push(cargo);
    }
    Ok(Json(added))
}

#[derive(Deserialize)]
pub struct RemoveCargo {
    pub cargo_ids: Vec<CargoId>,
}

pub async fn remove_cargo(
    State(state): State<Arc<App>>,
    Path(id): Path<ShipId>,
    Json(body): Json<RemoveCargo>,
) -> Result<Json<serde_json::Value>, ApiError> {
    for cargo in &body.cargo_ids {
        state
            .ships
            .remove_cargo(id, *cargo)
            .await
            .map_err(|e| ApiError::from_write("Failed to remove cargo", e))?;
    }
    Ok(Json(serde_json::json!({ "removed": body.cargo_ids })))
}

pub async fn define_fitting_limits(
    State(state): State<Arc<App>>,
    Path(id): Path<ShipId>,
    Json(limits): Json<NewShipFittingLimit>,
) -> Result<Json<ShipFittingLimit>, ApiError> {
    let limits = state
        .ships
        .define_fitting_limits(id, limits)
        .await
        .map_err(|e| ApiError::from_write("Failed to define fitting limits", e))?;
    Ok(Json(limits))
}
