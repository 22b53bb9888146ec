//! Query parameters for the user listing.

use serde::{Deserialize, Serialize};

use clinic_core::types::PageRequest;
use clinic_core::types::pagination::DEFAULT_PAGE_SIZE;

/// `GET /api/users` query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUsersQuery {
    /// Page number (1-based, default: 1).
    pub page: Option<u64>,
    /// Items per page (default: 5, max: 100).
    pub limit: Option<u64>,
    /// Username substring filter (super admins only).
    pub search: Option<String>,
}

impl ListUsersQuery {
    /// Converts to a clamped `PageRequest`.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    /// The search term, with blank input treated as absent.
    pub fn search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
