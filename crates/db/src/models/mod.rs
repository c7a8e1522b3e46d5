//! Entity row structs, response projections, and request DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Response projections used by the HTTP layer
//! - `Deserialize` + `Validate` DTOs for create and update requests

pub mod movie;
pub mod person;

use std::borrow::Cow;

use validator::ValidationError;

/// Reject strings that are empty or whitespace-only.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}
