use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use persona_common::error::PersonaError;

use crate::error::ApiError;
use crate::extractors::PersonId;
use crate::people::requests::{CreatePersonRequest, ListPeopleQuery, UpdatePersonRequest};
use crate::people::responses::PersonResponse;
use crate::AppState;

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError(PersonaError::Validation(format!(
        "invalid request body: {}",
        rejection.body_text()
    )))
}

// ── Handlers ────────────────────────────────────────────────────

pub async fn list_people(
    State(state): State<AppState>,
    query: Result<Query<ListPeopleQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        ApiError(PersonaError::Validation(format!(
            "invalid query: {}",
            rejection.body_text()
        )))
    })?;
    let (filter, pagination) = query.into_parts();

    let page = state.people.list(filter, pagination).await?;
    let data: Vec<PersonResponse> = page.people.into_iter().map(Into::into).collect();

    Ok((
        [(TOTAL_COUNT_HEADER, page.total.to_string())],
        Json(data),
    ))
}

pub async fn get_person(
    State(state): State<AppState>,
    PersonId(id): PersonId,
) -> Result<Json<PersonResponse>, ApiError> {
    let person = state.people.get(id).await?;
    Ok(Json(person.into()))
}

pub async fn create_person(
    State(state): State<AppState>,
    body: Result<Json<CreatePersonRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.map_err(bad_body)?;
    let created = state.people.create(body).await?;
    Ok((StatusCode::CREATED, Json(PersonResponse::from(created))))
}

pub async fn update_person(
    State(state): State<AppState>,
    PersonId(id): PersonId,
    body: Result<Json<UpdatePersonRequest>, JsonRejection>,
) -> Result<Json<PersonResponse>, ApiError> {
    let Json(body) = body.map_err(bad_body)?;
    let updated = state.people.update(id, body).await?;
    Ok(Json(updated.into()))
}

pub async fn delete_person(
    State(state): State<AppState>,
    PersonId(id): PersonId,
) -> Result<StatusCode, ApiError> {
    state.people.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
