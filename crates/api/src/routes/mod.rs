pub mod health;
pub mod movie;
pub mod person;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /movies                                          list, create
/// /movies/{id}                                     get, update (reconciles cast), delete
/// /movies/upload-movie-poster                      poster upload (multipart)
///
/// /people                                          list, create
/// /people/{id}                                     get (with movie titles), update, delete
/// /people/search/{text}                            name search
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/movies", movie::router())
        .nest("/people", person::router())
}
