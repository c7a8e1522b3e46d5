//! Shared query parameter types for API handlers.

use cinema_core::paging::Page;
use serde::Deserialize;

/// Page-index pagination parameters (`?page_index=&page_size=`).
///
/// Values are clamped by [`Page::from_index`].
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page_index: Option<i64>,
    pub page_size: Option<i64>,
}

impl PageParams {
    pub fn page(&self) -> Page {
        Page::from_index(self.page_index, self.page_size)
    }
}
