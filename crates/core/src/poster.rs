//! Poster upload rules: extension whitelist and stored filename generation.
//!
//! The client-supplied filename is only ever used for its extension; the
//! stored file is always named `<uuid-v4><ext>`, so nothing the client sends
//! ends up in a filesystem path.

use crate::error::CoreError;

/// Extensions accepted for poster images (lowercase, with leading dot).
pub const ALLOWED_POSTER_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

/// Maximum accepted poster upload size (10 MiB).
pub const MAX_POSTER_BYTES: usize = 10 * 1024 * 1024;

/// Message returned when the extension is not whitelisted.
pub const UNSUPPORTED_EXTENSION_MESSAGE: &str =
    "Only .jpg, .jpeg and .png type files are allowed.";

/// Message returned when a poster exceeds [`MAX_POSTER_BYTES`].
pub const POSTER_TOO_LARGE_MESSAGE: &str = "Poster images may not exceed 10 MiB.";

/// `true` when a poster of `len` bytes is within [`MAX_POSTER_BYTES`].
pub fn poster_size_allowed(len: usize) -> bool {
    len <= MAX_POSTER_BYTES
}

/// Extract the lowercase extension (with leading dot) from `filename`.
///
/// Surrounding quotes, as sent in some `Content-Disposition` headers, are
/// ignored. Returns `None` when the name has no extension.
pub fn file_extension(filename: &str) -> Option<String> {
    let name = filename.trim().trim_matches('"');
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let dot = base.rfind('.')?;
    if dot == 0 || dot == base.len() - 1 {
        return None;
    }
    Some(base[dot..].to_lowercase())
}

/// Validate `filename` against the whitelist, returning its extension.
pub fn validate_poster_filename(filename: &str) -> Result<String, CoreError> {
    match file_extension(filename) {
        Some(ext) if ALLOWED_POSTER_EXTENSIONS.contains(&ext.as_str()) => Ok(ext),
        _ => Err(CoreError::Validation(
            UNSUPPORTED_EXTENSION_MESSAGE.to_string(),
        )),
    }
}

/// Generate a fresh stored filename for an extension returned by
/// [`validate_poster_filename`].
pub fn stored_poster_name(extension: &str) -> String {
    format!("{}{extension}", uuid::Uuid::new_v4())
}
