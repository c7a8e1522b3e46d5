//! Repository for the `people` table.

use cinema_core::paging::Page;
use cinema_core::search::contains_pattern;
use cinema_core::types::DbId;
use sqlx::PgPool;

use crate::models::person::{
    Actor, ActorDetails, CreatePerson, Person, PersonSearchHit, UpdatePerson,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, date_of_birth, created_at, updated_at";

/// Column list for the [`Actor`] projection.
const ACTOR_COLUMNS: &str = "id, name, date_of_birth";

/// Provides CRUD and search operations for people.
pub struct PersonRepo;

impl PersonRepo {
    /// Insert a new person, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePerson) -> Result<Person, sqlx::Error> {
        let query = format!(
            "INSERT INTO people (name, date_of_birth)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(input.name.trim())
            .bind(input.date_of_birth)
            .fetch_one(pool)
            .await
    }

    /// Find a person by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM people WHERE id = $1");
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find every person whose id is in `ids`. Unknown ids are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Actor>, sqlx::Error> {
        let query = format!(
            "SELECT {ACTOR_COLUMNS} FROM people WHERE id = ANY($1) ORDER BY name, id"
        );
        sqlx::query_as::<_, Actor>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List one page of people ordered by name.
    pub async fn list(pool: &PgPool, page: Page) -> Result<Vec<Actor>, sqlx::Error> {
        let query = format!(
            "SELECT {ACTOR_COLUMNS} FROM people ORDER BY name, id LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Actor>(&query)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of people.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM people")
            .fetch_one(pool)
            .await
    }

    /// Case-insensitive substring search on name.
    pub async fn search(
        pool: &PgPool,
        text: &str,
        limit: i64,
    ) -> Result<Vec<PersonSearchHit>, sqlx::Error> {
        sqlx::query_as::<_, PersonSearchHit>(
            "SELECT id, name FROM people
             WHERE name ILIKE $1 ESCAPE '\\'
             ORDER BY name, id
             LIMIT $2",
        )
        .bind(contains_pattern(text))
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Titles of the movies a person appears in, alphabetically.
    pub async fn movie_titles(pool: &PgPool, person_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT m.title FROM movies m
             JOIN movie_cast mc ON mc.movie_id = m.id
             WHERE mc.person_id = $1
             ORDER BY m.title, m.id",
        )
        .bind(person_id)
        .fetch_all(pool)
        .await
    }

    /// A person with the titles of their movies. `None` if the person does not exist.
    pub async fn find_details(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ActorDetails>, sqlx::Error> {
        let Some(person) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let movies = Self::movie_titles(pool, id).await?;
        Ok(Some(ActorDetails {
            id: person.id,
            name: person.name,
            date_of_birth: person.date_of_birth,
            movies,
        }))
    }

    /// Replace a person's name and date of birth.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePerson,
    ) -> Result<Option<Person>, sqlx::Error> {
        let query = format!(
            "UPDATE people SET
                name = $2,
                date_of_birth = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .bind(input.name.trim())
            .bind(input.date_of_birth)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a person. Their cast memberships are removed by
    /// the `movie_cast` foreign key cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM people WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
