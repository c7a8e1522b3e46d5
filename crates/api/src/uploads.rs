//! Local-disk storage for uploaded poster images.
//!
//! Files are written to the configured upload directory and served back
//! under [`STATIC_FILES_PATH`] by the router.

use std::path::{Path, PathBuf};

use cinema_core::poster::stored_poster_name;

/// URL path prefix uploaded files are served from.
pub const STATIC_FILES_PATH: &str = "/static-files";

/// A poster that has been written to disk.
#[derive(Debug, Clone)]
pub struct StoredPoster {
    /// Generated file name inside the upload directory.
    pub file_name: String,
    /// Public URL the file can be fetched from.
    pub url: String,
}

/// Writes posters to a directory and builds their public URLs.
#[derive(Debug)]
pub struct PosterStore {
    dir: PathBuf,
    url_prefix: String,
}

impl PosterStore {
    pub fn new(dir: PathBuf, public_url: &str) -> Self {
        Self {
            dir,
            url_prefix: format!("{}{STATIC_FILES_PATH}", public_url.trim_end_matches('/')),
        }
    }

    /// The directory posters are stored in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store `data` under a freshly generated name with `extension`.
    ///
    /// `extension` must already have passed
    /// [`cinema_core::poster::validate_poster_filename`]. The upload
    /// directory is created on first use.
    pub async fn save(&self, extension: &str, data: &[u8]) -> std::io::Result<StoredPoster> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = stored_poster_name(extension);
        tokio::fs::write(self.dir.join(&file_name), data).await?;

        tracing::info!(file_name = %file_name, bytes = data.len(), "Poster stored");
        Ok(StoredPoster {
            url: format!("{}/{file_name}", self.url_prefix),
            file_name,
        })
    }
}
