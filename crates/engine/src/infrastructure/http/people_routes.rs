use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use starhold_domain::{Crew, CrewId, Person, PersonId, PersonSkill, SkillId};

use crate::app::App;
use crate::infrastructure::http::{ApiError, Pagination};
use crate::infrastructure::persistence::{NewCrew, NewPerson, NewPersonSkill, PersonPatch};

pub async fn create_people(
    State(state): State<Arc<App>>,
    Json(people): Json<Vec<NewPerson>>,
) -> Result<(StatusCode, Json<Vec<Person>>), ApiError> {
    if people.is_empty() {
        return Err(ApiError::bad_request(
            "Failed to create people",
            "request body must contain at least one person",
        ));
    }
    let created = state
        .people
        .create(people)
        .await
        .map_err(|e| ApiError::from_write("Failed to create people", e))?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_people(
    State(state): State<Arc<App>>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Person>>, ApiError> {
    let people = state
        .people
        .fetch_many(pagination.page(), pagination.limit())
        .await
        .map_err(|e| ApiError::from_read("Failed to fetch people", e))?;
    Ok(Json(people))
}

pub async fn get_person(
    State(state): State<Arc<App>>,
    Path(id): Path<PersonId>,
) -> Result<Json<Person>, ApiError> {
    let person = state
        .people
        .fetch_one(id)
        .await
        .map_err(|e| ApiError::from_read("Failed to fetch person", e))?
        .ok_or_else(|| ApiError::not_found(format!("Person {id} not found")))?;
    Ok(Json(person))
}

pub async fn update_person(
    State(state): State<Arc<App>>,
    Path(id): Path<PersonId>,
    Json(patch): Json<PersonPatch>,
) -> Result<Json<Person>, ApiError> {
    let person = state
        .people
        .update(id, patch)
        .await
        .map_err(|e| ApiError::from_write("Failed to update person", e))?
        .ok_or_else(|| ApiError::not_found(format!("Person {id} not found")))?;
    Ok(Json(person))
}

/// Marks the person as no longer living; the record itself is kept so the
/// campaign history stays intact.
pub async fn kill_person(
    State(state): State<Arc<App>>,
    Path(id): Path<PersonId>,
) -> Result<Json<Person>, ApiError> {
    let patch = PersonPatch {
        living: Some(false),
        ..PersonPatch::default()
    };
    let person = state
        .people
        .update(id, patch)
        .await
        .map_err(|e| ApiError::from_write("Failed to kill person", e))?
        .ok_or_else(|| ApiError::not_found(format!("Person {id} not found")))?;
    Ok(Json(person))
}

pub async fn add_skill(
    State(state): State<Arc<App>>,
    Path(id): Path<PersonId>,
    Json(skill): Json<NewPersonSkill>,
) -> Result<Json<PersonSkill>, ApiError> {
    let skill = state
        .people
        .add_skill(id, skill)
        .await
        .map_err(|e| ApiError::from_write("Failed to add skill", e))?;
    Ok(Json(skill))
}

#[derive(Deserialize)]
pub struct RemoveSkill {
    pub skill: SkillId,
}

pub async fn remove_skill(
    State(state): State<Arc<App>>,
    Path(id): Path<PersonId>,
    Json(body): Json<RemoveSkill>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .people
        .remove_skill(id, body.skill)
        .await
        .map_err(|e| ApiError::from_write("Failed to remove skill", e))?;
    Ok(Json(serde_json::json!({ "removed": body.skill })))
}

pub async fn add_job(
    State(state): State<Arc<App>>,
    Path(id): Path<PersonId>,
    Json(job): Json<NewCrew>,
) -> Result<Json<Crew>, ApiError> {
    let crew = state
        .people
        .add_job(id, job)
        .await
        .map_err(|e| ApiError::from_write("Failed to add job", e))?;
    Ok(Json(crew))
}

#[derive(Deserialize)]
pub struct RemoveJob {
    pub crew: CrewId,
}

pub async fn remove_job(
    State(state): State<Arc<App>>,
    Path(id): Path<PersonId>,
    Json(body): Json<RemoveJob>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .people
        .remove_job(id, body.crew)
        .await
        .map_err(|e| ApiError::from_write("Failed to remove job", e))?;
    Ok(Json(serde_json::json!({ "removed": body.crew })))
}
