use serde::{Deserialize, Serialize};

use crate::errors::{PostListError, Result};

/// Default number of posts per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Ordering of a page by post id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    /// The opposite order
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Wire form used by the remote `_order` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of the combined list, as requested by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    pub page_size: usize,
    pub sort_order: SortOrder,
}

impl PageRequest {
    /// A request for `page` with the default page size
    pub fn new(page: u32, sort_order: SortOrder) -> Self {
        Self {
            page,
            page_size: DEFAULT_PAGE_SIZE,
            sort_order,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Check the request is well-formed
    ///
    /// # Errors
    ///
    /// Returns `InvalidPage` for page 0 and `InvalidPageSize` for a zero page size.
    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(PostListError::InvalidPage { page: self.page });
        }
        if self.page_size == 0 {
            return Err(PostListError::InvalidPageSize {
                page_size: self.page_size,
            });
        }
        Ok(())
    }
}
