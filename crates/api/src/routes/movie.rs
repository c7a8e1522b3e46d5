//! Route definitions for the `/movies` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use cinema_core::poster::MAX_POSTER_BYTES;

use crate::handlers::movie;
use crate::state::AppState;

/// Multipart framing allowance on top of the poster size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/movies`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// POST   /upload-movie-poster     -> upload_poster
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movie::list).post(movie::create))
        .route(
            "/{id}",
            get(movie::get_by_id)
                .put(movie::update)
                .delete(movie::delete),
        )
        .route(
            "/upload-movie-poster",
            post(movie::upload_poster)
                .layer(DefaultBodyLimit::max(MAX_POSTER_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
}
