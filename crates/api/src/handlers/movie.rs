//! Handlers for the `/movies` resource, including poster uploads.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cinema_core::error::CoreError;
use cinema_core::poster::{
    poster_size_allowed, validate_poster_filename, POSTER_TOO_LARGE_MESSAGE,
};
use cinema_core::types::DbId;
use cinema_db::models::movie::{CreateMovie, MovieDetails, MoviePage, UpdateMovie};
use cinema_db::repositories::MovieRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::PageParams;
use crate::response::{Created, DataResponse};
use crate::state::AppState;

/// Multipart field names accepted for the poster file.
const POSTER_FIELDS: &[&str] = &["imageFile", "file"];

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Movie", id })
}

/// Response body for a stored poster.
#[derive(Debug, Serialize)]
pub struct PosterUploaded {
    pub profile_image: String,
}

/// GET /api/v1/movies
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<DataResponse<MoviePage>>> {
    let movies = MovieRepo::list(&state.pool, params.page()).await?;
    let count = MovieRepo::count(&state.pool).await?;
    Ok(DataResponse::json(MoviePage { movies, count }))
}

/// GET /api/v1/movies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MovieDetails>>> {
    let movie = MovieRepo::find_details(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(DataResponse::json(movie))
}

/// POST /api/v1/movies
///
/// Every id in `actors` must reference an existing person; otherwise the
/// request fails with `INVALID_REFERENCE` and nothing is stored.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateMovie>,
) -> AppResult<Created<MovieDetails>> {
    input.validate()?;
    let movie = MovieRepo::create(&state.pool, &input).await?;
    tracing::info!(movie_id = movie.id, "Movie created");
    Ok(DataResponse::created(movie))
}

/// PUT /api/v1/movies/{id}
///
/// Replaces the movie's fields and reconciles its cast to `actors`.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMovie>,
) -> AppResult<Json<DataResponse<MovieDetails>>> {
    input.validate()?;
    let update = MovieRepo::update(&state.pool, id, &input).await?;
    tracing::info!(
        movie_id = id,
        removed = update.delta.to_remove.len(),
        added = update.delta.to_add.len(),
        "Movie updated"
    );
    Ok(DataResponse::json(update.movie))
}

/// DELETE /api/v1/movies/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if MovieRepo::delete(&state.pool, id).await? {
        tracing::info!(movie_id = id, "Movie deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/movies/upload-movie-poster
///
/// Accepts a multipart `imageFile` (or `file`) field holding a `.jpg`,
/// `.jpeg` or `.png` image of at most 10 MiB and returns the URL it is
/// served from. Oversized uploads get `413`.
pub async fn upload_poster(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<PosterUploaded>>> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        if !POSTER_FIELDS.contains(&name.as_str()) {
            continue;
        }

        let filename = field.file_name().unwrap_or("").to_string();
        let data = field.bytes().await?;
        upload = Some((filename, data.to_vec()));
    }

    let (filename, data) = match upload {
        Some((filename, data)) if !data.is_empty() => (filename, data),
        _ => return Err(AppError::BadRequest("No file uploaded.".into())),
    };

    if !poster_size_allowed(data.len()) {
        return Err(AppError::PayloadTooLarge(POSTER_TOO_LARGE_MESSAGE.into()));
    }
    let extension = validate_poster_filename(&filename)?;

    let stored = state
        .posters
        .save(&extension, &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store poster: {e}")))?;

    Ok(DataResponse::json(PosterUploaded {
        profile_image: stored.url,
    }))
}
