//! Remote list service
//!
//! The Post Store only needs two calls from the remote side: list one page
//! with a total count, and accept a new post. Anything implementing
//! `RemoteService` can stand in for the HTTP service.

mod http;

pub use http::{HttpRemote, TOTAL_COUNT_HEADER};

use async_trait::async_trait;
use postlist_core::{NewPost, PageRequest, Post, SortOrder};
use serde::Serialize;

use crate::errors::Result;

/// Query for one page of remote posts
///
/// Serializes to the service's query string:
/// `_page={n}&_limit={size}&_sort=id&_order={asc|desc}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    #[serde(rename = "_page")]
    pub page: u32,
    #[serde(rename = "_limit")]
    pub limit: usize,
    #[serde(rename = "_sort")]
    pub sort_field: &'static str,
    #[serde(rename = "_order")]
    pub order: SortOrder,
}

impl From<PageRequest> for ListQuery {
    fn from(request: PageRequest) -> Self {
        Self {
            page: request.page,
            limit: request.page_size,
            sort_field: "id",
            order: request.sort_order,
        }
    }
}

/// One page as returned by the remote service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePage {
    pub posts: Vec<Post>,
    /// Total number of posts the service holds, across all pages
    pub total_count: u64,
}

/// Paginated list/create service
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// Fetch one page of posts plus the total count
    async fn list(&self, query: &ListQuery) -> Result<RemotePage>;

    /// Submit a new post; the service's response body is not used
    async fn create(&self, post: &NewPost) -> Result<()>;
}
