//! Handlers for the `/people` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cinema_core::error::CoreError;
use cinema_core::search::DEFAULT_SEARCH_LIMIT;
use cinema_core::types::DbId;
use cinema_db::models::person::{
    Actor, ActorDetails, CreatePerson, PersonPage, PersonSearchHit, UpdatePerson,
};
use cinema_db::repositories::PersonRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::PageParams;
use crate::response::{Created, DataResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Person",
        id,
    })
}

/// GET /api/v1/people
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<DataResponse<PersonPage>>> {
    let people = PersonRepo::list(&state.pool, params.page()).await?;
    let count = PersonRepo::count(&state.pool).await?;
    Ok(DataResponse::json(PersonPage { people, count }))
}

/// GET /api/v1/people/{id}
///
/// Includes the titles of the movies the person appears in.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ActorDetails>>> {
    let details = PersonRepo::find_details(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(DataResponse::json(details))
}

/// GET /api/v1/people/search/{text}
pub async fn search(
    State(state): State<AppState>,
    Path(text): Path<String>,
) -> AppResult<Json<DataResponse<Vec<PersonSearchHit>>>> {
    let hits = PersonRepo::search(&state.pool, &text, DEFAULT_SEARCH_LIMIT).await?;
    Ok(DataResponse::json(hits))
}

/// POST /api/v1/people
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePerson>,
) -> AppResult<Created<Actor>> {
    input.validate()?;
    let person = PersonRepo::create(&state.pool, &input).await?;
    tracing::info!(person_id = person.id, "Person created");
    Ok(DataResponse::created(person.into()))
}

/// PUT /api/v1/people/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePerson>,
) -> AppResult<Json<DataResponse<Actor>>> {
    input.validate()?;
    let person = PersonRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(DataResponse::json(person.into()))
}

/// DELETE /api/v1/people/{id}
///
/// The person is also removed from every movie cast they belong to.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if PersonRepo::delete(&state.pool, id).await? {
        tracing::info!(person_id = id, "Person deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
