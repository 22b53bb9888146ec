//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u64 = 5;
/// Maximum page size.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl PageRequest {
    /// Create a new page request, clamping out-of-range values.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.limit
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub limit: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, request: &PageRequest, total_items: u64) -> Self {
        let limit = request.limit.max(1);
        let total_pages = if total_items == 0 {
            1
        } else {
            total_items.div_ceil(limit)
        };
        Self {
            items,
            page: request.page,
            limit,
            total_items,
            total_pages,
        }
    }

    /// Transform every item, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}
