//! Repository for the `movies` and `movie_cast` tables.
//!
//! Writes that touch the cast run in a single transaction: requested people
//! are resolved and validated first, and nothing is written unless every
//! requested id exists.

use std::collections::HashMap;

use cinema_core::cast::{self, CastDelta};
use cinema_core::error::CoreError;
use cinema_core::paging::Page;
use cinema_core::types::DbId;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::error::CastWriteError;
use crate::models::movie::{CastUpdate, CreateMovie, Movie, MovieDetails, UpdateMovie};
use crate::models::person::Actor;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, description, language, release_date, cover_image, created_at, updated_at";

/// A cast member tagged with the movie it belongs to.
#[derive(Debug, FromRow)]
struct CastRow {
    movie_id: DbId,
    #[sqlx(flatten)]
    actor: Actor,
}

/// Provides CRUD operations for movies and cast reconciliation.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie together with its cast.
    ///
    /// Fails with [`CoreError::InvalidReference`] before any insert if a
    /// requested person does not exist.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMovie,
    ) -> Result<MovieDetails, CastWriteError> {
        let mut tx = pool.begin().await?;

        let actors = Self::resolve_people(&mut tx, &input.actors).await?;
        let resolved: Vec<DbId> = actors.iter().map(|a| a.id).collect();
        cast::validate_resolution(&input.actors, &resolved)?;

        let query = format!(
            "INSERT INTO movies (title, description, language, release_date, cover_image)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(input.language.trim())
            .bind(input.release_date)
            .bind(&input.cover_image)
            .fetch_one(&mut *tx)
            .await?;

        Self::add_cast_members(&mut tx, movie.id, &resolved).await?;

        tx.commit().await?;
        tracing::debug!(movie_id = movie.id, cast_size = resolved.len(), "Movie created");
        Ok(MovieDetails::new(movie, actors))
    }

    /// Find a movie by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a movie by ID together with its cast.
    pub async fn find_details(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MovieDetails>, sqlx::Error> {
        let Some(movie) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let actors = Self::list_cast(pool, id).await?;
        Ok(Some(MovieDetails::new(movie, actors)))
    }

    /// List one page of movies (oldest first), each with its cast.
    pub async fn list(pool: &PgPool, page: Page) -> Result<Vec<MovieDetails>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies ORDER BY id LIMIT $1 OFFSET $2");
        let movies = sqlx::query_as::<_, Movie>(&query)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = movies.iter().map(|m| m.id).collect();
        let mut casts = Self::list_casts(pool, &ids).await?;

        Ok(movies
            .into_iter()
            .map(|movie| {
                let actors = casts.remove(&movie.id).unwrap_or_default();
                MovieDetails::new(movie, actors)
            })
            .collect())
    }

    /// Total number of movies.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movies")
            .fetch_one(pool)
            .await
    }

    /// The cast of a single movie, ordered by name.
    pub async fn list_cast(pool: &PgPool, movie_id: DbId) -> Result<Vec<Actor>, sqlx::Error> {
        sqlx::query_as::<_, Actor>(
            "SELECT p.id, p.name, p.date_of_birth
             FROM people p
             JOIN movie_cast mc ON mc.person_id = p.id
             WHERE mc.movie_id = $1
             ORDER BY p.name, p.id",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
    }

    /// Replace a movie's fields and reconcile its cast to `input.actors`.
    ///
    /// The movie row is locked for the duration of the transaction, so
    /// concurrent updates of the same movie are applied one after the other.
    /// Validation failures ([`CoreError::NotFound`],
    /// [`CoreError::InvalidReference`]) happen before any write.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMovie,
    ) -> Result<CastUpdate, CastWriteError> {
        let mut tx = pool.begin().await?;

        let locked: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM movies WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Err(CoreError::NotFound { entity: "Movie", id }.into());
        }

        let current = Self::current_cast_ids(&mut tx, id).await?;
        let actors = Self::resolve_people(&mut tx, &input.actors).await?;
        let resolved: Vec<DbId> = actors.iter().map(|a| a.id).collect();
        let delta = cast::reconcile(&current, &input.actors, &resolved)?;

        tracing::debug!(
            movie_id = id,
            to_remove = ?delta.to_remove,
            to_add = ?delta.to_add,
            "Reconciling movie cast"
        );

        let query = format!(
            "UPDATE movies SET
                title = $2,
                description = $3,
                language = $4,
                release_date = $5,
                cover_image = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(input.language.trim())
            .bind(input.release_date)
            .bind(&input.cover_image)
            .fetch_one(&mut *tx)
            .await?;

        Self::apply_delta(&mut tx, id, &delta).await?;

        tx.commit().await?;
        Ok(CastUpdate {
            movie: MovieDetails::new(movie, actors),
            delta,
        })
    }

    /// Permanently delete a movie. Cast rows go with it; people are kept.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Casts for several movies, keyed by movie id.
    async fn list_casts(
        pool: &PgPool,
        movie_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Actor>>, sqlx::Error> {
        if movie_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, CastRow>(
            "SELECT mc.movie_id, p.id, p.name, p.date_of_birth
             FROM movie_cast mc
             JOIN people p ON p.id = mc.person_id
             WHERE mc.movie_id = ANY($1)
             ORDER BY p.name, p.id",
        )
        .bind(movie_ids)
        .fetch_all(pool)
        .await?;

        let mut casts: HashMap<DbId, Vec<Actor>> = HashMap::new();
        for row in rows {
            casts.entry(row.movie_id).or_default().push(row.actor);
        }
        Ok(casts)
    }

    /// Person ids currently in a movie's cast, in insertion order.
    async fn current_cast_ids(
        tx: &mut Transaction<'_, Postgres>,
        movie_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT person_id FROM movie_cast
             WHERE movie_id = $1
             ORDER BY created_at, person_id",
        )
        .bind(movie_id)
        .fetch_all(&mut **tx)
        .await
    }

    /// Look up the requested people, holding a share lock so they cannot be
    /// deleted before the transaction commits.
    async fn resolve_people(
        tx: &mut Transaction<'_, Postgres>,
        ids: &[DbId],
    ) -> Result<Vec<Actor>, sqlx::Error> {
        let ids = cast::distinct_ids(ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Actor>(
            "SELECT id, name, date_of_birth FROM people
             WHERE id = ANY($1)
             ORDER BY id
             FOR SHARE",
        )
        .bind(&ids)
        .fetch_all(&mut **tx)
        .await
    }

    /// Remove then add cast members according to `delta`.
    async fn apply_delta(
        tx: &mut Transaction<'_, Postgres>,
        movie_id: DbId,
        delta: &CastDelta,
    ) -> Result<(), sqlx::Error> {
        if !delta.to_remove.is_empty() {
            sqlx::query("DELETE FROM movie_cast WHERE movie_id = $1 AND person_id = ANY($2)")
                .bind(movie_id)
                .bind(&delta.to_remove)
                .execute(&mut **tx)
                .await?;
        }
        Self::add_cast_members(tx, movie_id, &delta.to_add).await
    }

    /// Insert cast rows for `person_ids`.
    async fn add_cast_members(
        tx: &mut Transaction<'_, Postgres>,
        movie_id: DbId,
        person_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        if person_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO movie_cast (movie_id, person_id)
             SELECT $1, UNNEST($2::BIGINT[])",
        )
        .bind(movie_id)
        .bind(person_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
