//! Movie entity model, projections, and DTOs.

use cinema_core::cast::CastDelta;
use cinema_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::person::Actor;

/// A movie row from the `movies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub language: String,
    pub release_date: Date,
    pub cover_image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A movie with its resolved cast, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetails {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub language: String,
    pub release_date: Date,
    pub cover_image: Option<String>,
    pub actors: Vec<Actor>,
}

impl MovieDetails {
    /// Combine a movie row with its cast. Actors are ordered by name, then id.
    pub fn new(movie: Movie, mut actors: Vec<Actor>) -> Self {
        actors.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Self {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            language: movie.language,
            release_date: movie.release_date,
            cover_image: movie.cover_image,
            actors,
        }
    }

    /// Ids of the cast members.
    pub fn actor_ids(&self) -> Vec<DbId> {
        self.actors.iter().map(|a| a.id).collect()
    }
}

/// One page of movies plus the total row count.
#[derive(Debug, Clone, Serialize)]
pub struct MoviePage {
    pub movies: Vec<MovieDetails>,
    pub count: i64,
}

/// Result of a successful movie update: the stored movie and the cast
/// changes that were applied.
#[derive(Debug, Clone)]
pub struct CastUpdate {
    pub movie: MovieDetails,
    pub delta: CastDelta,
}

/// DTO for creating a new movie.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMovie {
    #[validate(custom(
        function = "crate::models::validate_not_blank",
        message = "Name of the movie is required"
    ))]
    pub title: String,
    pub description: Option<String>,
    #[validate(custom(
        function = "crate::models::validate_not_blank",
        message = "Language of the movie is required"
    ))]
    pub language: String,
    pub release_date: Date,
    pub cover_image: Option<String>,
    /// Person ids making up the cast. Duplicates are ignored.
    #[serde(default)]
    pub actors: Vec<DbId>,
}

/// DTO for updating a movie.
///
/// All scalar fields are replaced, and the cast is reconciled to exactly
/// the (deduplicated) `actors` list. An omitted list clears the cast.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMovie {
    #[validate(custom(
        function = "crate::models::validate_not_blank",
        message = "Name of the movie is required"
    ))]
    pub title: String,
    pub description: Option<String>,
    #[validate(custom(
        function = "crate::models::validate_not_blank",
        message = "Language of the movie is required"
    ))]
    pub language: String,
    pub release_date: Date,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub actors: Vec<DbId>,
}
