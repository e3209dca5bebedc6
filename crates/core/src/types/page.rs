//! Pagination types shared by every list/search operation.
//!
//! Two addressing modes coexist:
//!
//! - offset mode ([`ListParams`]): `skip` + optional `limit`, used directly by
//!   the repositories.
//! - page mode ([`PageQuery`]): 1-indexed `page` + `page_size`, converted to
//!   offset mode before hitting the database.
//!
//! Every list/search call returns a [`Page`] pairing the items with the total
//! row count for the same predicate. Page-mode callers wrap that into a
//! [`PagedResponse`] which adds the ceiling-division page count.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Offset-mode pagination parameters.
///
/// `limit: None` means unrestricted - the query fetches everything after
/// `skip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListParams {
    /// Number of rows to skip from the start of the result set.
    pub skip: u64,
    /// Maximum number of rows to return, or `None` for no cap.
    pub limit: Option<u64>,
}

impl ListParams {
    /// Create offset-mode parameters.
    #[must_use]
    pub const fn new(skip: u64, limit: Option<u64>) -> Self {
        Self { skip, limit }
    }

    /// Parameters selecting the entire result set.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            skip: 0,
            limit: None,
        }
    }
}

/// Malformed page-mode arguments.
///
/// Surfaces before any query is issued; offset-mode parameters are valid by
/// construction (unsigned).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageError {
    /// Pages are 1-indexed; page 0 does not exist.
    #[error("page numbers are 1-indexed; page 0 is not a valid page")]
    ZeroPage,
    /// A page must hold at least one row.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Page-mode pagination parameters (1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// 1-indexed page number.
    pub page: u32,
    /// Rows per page.
    pub page_size: u32,
}

impl PageQuery {
    /// Create page-mode parameters.
    #[must_use]
    pub const fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Check that `page` and `page_size` are both at least 1.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::ZeroPage`] or [`PageError::ZeroPageSize`].
    pub const fn validate(&self) -> Result<(), PageError> {
        if self.page == 0 {
            return Err(PageError::ZeroPage);
        }
        if self.page_size == 0 {
            return Err(PageError::ZeroPageSize);
        }
        Ok(())
    }

    /// Convert to offset mode: `skip = (page - 1) * page_size`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError`] if the query is malformed.
    pub const fn to_list_params(&self) -> Result<ListParams, PageError> {
        match self.validate() {
            Ok(()) => Ok(ListParams {
                skip: (self.page as u64 - 1) * self.page_size as u64,
                limit: Some(self.page_size as u64),
            }),
            Err(e) => Err(e),
        }
    }

    /// Total number of pages for `total_count` rows (ceiling division).
    #[must_use]
    pub const fn total_pages(&self, total_count: u64) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        total_count.div_ceil(self.page_size as u64)
    }
}

/// One page of results plus the total row count for the same predicate.
///
/// The count and the items come from two queries issued with an identical
/// WHERE clause but without a shared snapshot, so a concurrent write can make
/// them momentarily inconsistent. That gap is accepted, not a bug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The rows selected by `skip`/`limit`.
    pub items: Vec<T>,
    /// Total rows matching the predicate, ignoring `skip`/`limit`.
    pub total_count: u64,
}

impl<T> Page<T> {
    /// Create a page from items and the matching total.
    #[must_use]
    pub const fn new(items: Vec<T>, total_count: u64) -> Self {
        Self { items, total_count }
    }
}

/// Page-mode response shape: a [`Page`] plus page bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    /// The rows of the requested page.
    pub items: Vec<T>,
    /// Total rows matching the predicate.
    pub total_count: u64,
    /// The 1-indexed page that was fetched.
    pub page: u32,
    /// Rows per page.
    pub page_size: u32,
    /// Ceiling of `total_count / page_size`.
    pub total_pages: u64,
}

impl<T> PagedResponse<T> {
    /// Wrap an offset-mode [`Page`] fetched for `query`.
    #[must_use]
    pub fn new(page: Page<T>, query: PageQuery) -> Self {
        let total_pages = query.total_pages(page.total_count);
        Self {
            items: page.items,
            total_count: page.total_count,
            page: query.page,
            page_size: query.page_size,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_mode_converts_to_offset() {
        let params = PageQuery::new(2, 10).to_list_params().expect("valid");
        assert_eq!(params.skip, 10);
        assert_eq!(params.limit, Some(10));

        let params = PageQuery::new(1, 25).to_list_params().expect("valid");
        assert_eq!(params.skip, 0);
        assert_eq!(params.limit, Some(25));
    }

    #[test]
    fn zero_page_and_zero_size_are_rejected() {
        assert_eq!(
            PageQuery::new(0, 10).to_list_params(),
            Err(PageError::ZeroPage)
        );
        assert_eq!(
            PageQuery::new(1, 0).to_list_params(),
            Err(PageError::ZeroPageSize)
        );
    }

    #[test]
    fn total_pages_uses_ceiling_division() {
        let query = PageQuery::new(2, 10);
        assert_eq!(query.total_pages(25), 3);
        assert_eq!(query.total_pages(30), 3);
        assert_eq!(query.total_pages(31), 4);
        assert_eq!(query.total_pages(0), 0);
        assert_eq!(query.total_pages(1), 1);
    }

    #[test]
    fn paged_response_carries_bookkeeping() {
        let query = PageQuery::new(2, 10);
        let page = Page::new(vec!["row"; 10], 25);
        let response = PagedResponse::new(page, query);
        assert_eq!(response.page, 2);
        assert_eq!(response.page_size, 10);
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.total_count, 25);
        assert_eq!(response.items.len(), 10);
    }

    #[test]
    fn default_list_params_select_everything() {
        let params = ListParams::default();
        assert_eq!(params.skip, 0);
        assert_eq!(params.limit, None);
        assert_eq!(params, ListParams::all());
    }
}
