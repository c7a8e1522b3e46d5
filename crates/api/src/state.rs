use std::sync::Arc;

use crate::config::ServerConfig;
use crate::uploads::PosterStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cinema_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Where uploaded posters are written.
    pub posters: Arc<PosterStore>,
}

impl AppState {
    pub fn new(pool: cinema_db::DbPool, config: ServerConfig) -> Self {
        let posters = PosterStore::new(config.upload_dir.clone(), &config.public_url);
        Self {
            pool,
            config: Arc::new(config),
            posters: Arc::new(posters),
        }
    }
}
