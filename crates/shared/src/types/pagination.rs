//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Largest page size a caller may request.
pub const MAX_PER_PAGE: u32 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    25
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    /// Returns the page size clamped to `MAX_PER_PAGE` and at least 1.
    #[must_use]
    pub fn clamped_per_page(&self) -> u32 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }

    /// Calculates the offset for database queries.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.clamped_per_page())
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.clamped_per_page())
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages (at least 1).
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, request: &PageRequest, total: u64) -> Self {
        let per_page = request.clamped_per_page();
        let total_pages = std::cmp::max(1, total.div_ceil(u64::from(per_page)));

        Self {
            data,
            meta: PageMeta {
                page: request.page,
                per_page,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_limit() {
        let req = PageRequest {
            page: 3,
            per_page: 25,
        };
        assert_eq!(req.offset(), 50);
        assert_eq!(req.limit(), 25);
    }

    #[test]
    fn test_first_page_offset_is_zero() {
        assert_eq!(PageRequest::default().offset(), 0);
    }

    #[test]
    fn test_per_page_clamped() {
        let req = PageRequest {
            page: 1,
            per_page: 10_000,
        };
        assert_eq!(req.limit(), u64::from(MAX_PER_PAGE));

        let zero = PageRequest {
            page: 1,
            per_page: 0,
        };
        assert_eq!(zero.limit(), 1);
    }

    #[test]
    fn test_total_pages() {
        let req = PageRequest {
            page: 1,
            per_page: 25,
        };
        let resp: PageResponse<u8> = PageResponse::new(vec![], &req, 51);
        assert_eq!(resp.meta.total_pages, 3);

        let empty: PageResponse<u8> = PageResponse::new(vec![], &req, 0);
        assert_eq!(empty.meta.total_pages, 1);
    }
}
