//! Person entity model, projections, and DTOs.

use cinema_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A person row from the `people` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    pub name: String,
    pub date_of_birth: Date,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A person as they appear in listings and in a movie's cast.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Actor {
    pub id: DbId,
    pub name: String,
    pub date_of_birth: Date,
}

impl From<Person> for Actor {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
            date_of_birth: person.date_of_birth,
        }
    }
}

/// A person together with the titles of the movies they appear in.
#[derive(Debug, Clone, Serialize)]
pub struct ActorDetails {
    pub id: DbId,
    pub name: String,
    pub date_of_birth: Date,
    pub movies: Vec<String>,
}

/// A name-search hit.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PersonSearchHit {
    pub id: DbId,
    pub name: String,
}

/// One page of people plus the total row count.
#[derive(Debug, Clone, Serialize)]
pub struct PersonPage {
    pub people: Vec<Actor>,
    pub count: i64,
}

/// DTO for creating a new person.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePerson {
    #[validate(custom(
        function = "crate::models::validate_not_blank",
        message = "Name of the person is required"
    ))]
    pub name: String,
    pub date_of_birth: Date,
}

/// DTO for updating a person. Both fields are replaced.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePerson {
    #[validate(custom(
        function = "crate::models::validate_not_blank",
        message = "Name of the person is required"
    ))]
    pub name: String,
    pub date_of_birth: Date,
}
