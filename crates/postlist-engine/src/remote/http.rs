//! HTTP implementation of the remote list service

use async_trait::async_trait;
use postlist_core::ops::parse_total_count;
use postlist_core::{NewPost, Post};
use std::time::Duration;

use crate::errors::{from_reqwest, Result};
use crate::remote::{ListQuery, RemotePage, RemoteService};

/// Response header carrying the remote total record count
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// reqwest-backed client for `{api_url}/posts`
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemote {
    /// Build a client for `base_url` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns a `Transport` error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| from_reqwest("http_client", e))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Collection URL for posts
    pub fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl RemoteService for HttpRemote {
    async fn list(&self, query: &ListQuery) -> Result<RemotePage> {
        let response = self
            .client
            .get(self.posts_url())
            .query(query)
            .send()
            .await
            .map_err(|e| from_reqwest("remote_list", e))?
            .error_for_status()
            .map_err(|e| from_reqwest("remote_list", e))?;

        let total_count = parse_total_count(
            response
                .headers()
                .get(TOTAL_COUNT_HEADER)
                .and_then(|value| value.to_str().ok()),
        )
        .map_err(|e| postlist_core::ExError::from(e).with_op("remote_list"))?;

        let posts: Vec<Post> = response
            .json()
            .await
            .map_err(|e| from_reqwest("remote_list", e))?;

        Ok(RemotePage { posts, total_count })
    }

    async fn create(&self, post: &NewPost) -> Result<()> {
        self.client
            .post(self.posts_url())
            .json(post)
            .send()
            .await
            .map_err(|e| from_reqwest("remote_create", e))?
            .error_for_status()
            .map_err(|e| from_reqwest("remote_create", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posts_url_trims_trailing_slash() {
        let remote = HttpRemote::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(remote.posts_url(), "http://localhost:3000/posts");
    }
}
