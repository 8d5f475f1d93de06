use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use starhold_domain::{ClockGroupId, ClockId, EventClock, EventClockGroup};

use crate::app::App;
use crate::infrastructure::http::ApiError;
use crate::infrastructure::persistence::{NewEventClock, NewEventClockGroup};

/// Targets a clock or a group, never both. Used by reads and deletes.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ClockTarget {
    pub clock_id: Option<ClockId>,
    pub group_id: Option<ClockGroupId>,
}

pub async fn create_clock(
    State(state): State<Arc<App>>,
    Json(clock): Json<NewEventClock>,
) -> Result<Json<EventClock>, ApiError> {
    let clock = state
        .clocks
        .create_clock(clock)
        .await
        .map_err(|e| ApiError::from_write("Failed to create clock", e))?;
    Ok(Json(clock))
}

pub async fn create_group(
    State(state): State<Arc<App>>,
    Json(group): Json<NewEventClockGroup>,
) -> Result<Json<EventClockGroup>, ApiError> {
    let group = state
        .clocks
        .create_group(group)
        .await
        .map_err(|e| ApiError::from_write("Failed to create clock group", e))?;
    Ok(Json(group))
}

/// `?clock_id=` returns the one clock; `?group_id=` returns the group's
/// clocks. Supplying neither is a bad request.
pub async fn get_clocks(
    State(state): State<Arc<App>>,
    Query(target): Query<ClockTarget>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Some(clock_id) = target.clock_id {
        let clock = state
            .clocks
            .fetch_clock(clock_id)
            .await
            .map_err(|e| ApiError::from_read("Failed to fetch clock", e))?
            .ok_or_else(|| ApiError::not_found(format!("EventClock {clock_id} not found")))?;
        return Ok(Json(serde_json::json!(clock)));
    }
    if let Some(group_id) = target.group_id {
        let group = state
            .clocks
            .fetch_group(group_id)
            .await
            .map_err(|e| ApiError::from_read("Failed to fetch clock group", e))?
            .ok_or_else(|| ApiError::not_found(format!("EventClockGroup {group_id} not found")))?;
        let clocks = state
            .clocks
            .fetch_clocks_by_group(group_id)
            .await
            .map_err(|e| ApiError::from_read("Failed to fetch clocks", e))?;
        return Ok(Json(serde_json::json!({ "group": group, "clocks": clocks })));
    }
    Err(ApiError::bad_request(
        "Failed to fetch clocks",
        "either clock_id or group_id is required",
    ))
}

#[derive(Deserialize)]
pub struct AdvanceClock {
    pub clock_id: ClockId,
    pub segments: i64,
}

pub async fn advance_clock(
    State(state): State<Arc<App>>,
    Json(body): Json<AdvanceClock>,
) -> Result<Json<EventClock>, ApiError> {
    let clock = state
        .clocks
        .advance_clock(body.clock_id, body.segments)
        .await
        .map_err(|e| ApiError::from_write("Failed to advance clock", e))?;
    Ok(Json(clock))
}

#[derive(Deserialize)]
pub struct AdvanceGroup {
    pub group_id: ClockGroupId,
    pub segments: i64,
}

pub async fn advance_group(
    State(state): State<Arc<App>>,
    Json(body): Json<AdvanceGroup>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let group = state
        .clocks
        .advance_group(body.group_id, body.segments)
        .await
        .map_err(|e| ApiError::from_write("Failed to advance clock group", e))?;
    let clocks = state
        .clocks
        .fetch_clocks_by_group(body.group_id)
        .await
        .map_err(|e| ApiError::from_read("Failed to fetch clocks", e))?;
    Ok(Json(serde_json::json!({ "group": group, "clocks": clocks })))
}

#[derive(Deserialize)]
pub struct AttachToGroup {
    pub clock_id: ClockId,
    pub group_id: ClockGroupId,
}

pub async fn attach_to_group(
    State(state): State<Arc<App>>,
    Json(body): Json<AttachToGroup>,
) -> Result<Json<EventClock>, ApiError> {
    let clock = state
        .clocks
        .attach_to_group(body.clock_id, body.group_id)
        .await
        .map_err(|e| ApiError::from_write("Failed to attach clock to group", e))?;
    Ok(Json(clock))
}

#[derive(Deserialize)]
pub struct DetachFromGroup {
    pub clock_id: ClockId,
}

pub async fn detach_from_group(
    State(state): State<Arc<App>>,
    Json(body): Json<DetachFromGroup>,
) -> Result<Json<EventClock>, ApiError> {
    let clock = state
        .clocks
        .detach_from_group(body.clock_id)
        .await
        .map_err(|e| ApiError::from_write("Failed to detach clock from group", e))?;
    Ok(Json(clock))
}

pub async fn delete_clock(
    State(state): State<Arc<App>>,
    Query(target): Query<ClockTarget>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let clock_id = target.clock_id.ok_or_else(|| {
        ApiError::bad_request("Failed to delete clock", "clock_id is required")
    })?;
    state
        .clocks
        .delete_clock(clock_id)
        .await
        .map_err(|e| ApiError::from_write("Failed to delete clock", e))?;
    Ok(Json(serde_json::json!({ "deleted": clock_id })))
}

pub async fn delete_group(
    State(state): State<Arc<App>>,
    Query(target): Query<ClockTarget>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let group_id = target.group_id.ok_or_else(|| {
        ApiError::bad_request("Failed to delete clock group", "group_id is required")
    })?;
    state
        .clocks
        .delete_group(group_id)
        .await
        .map_err(|e| ApiError::from_write("Failed to delete clock group", e))?;
    Ok(Json(serde_json::json!({ "deleted": group_id })))
}
