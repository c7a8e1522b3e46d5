//! Page-index pagination used by the list endpoints.
//!
//! Clients send `page_index` (zero-based) and `page_size`; the repositories
//! take a SQL `LIMIT` / `OFFSET` pair.

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum number of rows per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// A resolved `LIMIT` / `OFFSET` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Convert a page index and page size into a limit/offset pair.
    pub fn from_index(page_index: Option<i64>, page_size: Option<i64>) -> Self {
        let limit = clamp_limit(page_size, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let index = clamp_offset(page_index);
        Self {
            limit,
            offset: index.saturating_mul(limit),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::from_index(None, None)
    }
}
