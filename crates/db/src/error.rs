use cinema_core::error::CoreError;

/// Failure of a movie write that carries a cast (create or update).
///
/// `Rejected` covers the checks made before anything is written: the movie
/// does not exist, or requested actors do not resolve. `Database` is a
/// store failure; the surrounding transaction has been rolled back.
#[derive(Debug, thiserror::Error)]
pub enum CastWriteError {
    #[error(transparent)]
    Rejected(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
