// Shared fixtures for Post Store integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use postlist_core::errors::{ExError, ExErrorKind};
use postlist_core::{NewPost, Post, SortOrder};
use postlist_engine::errors::Result;
use postlist_engine::{ListQuery, RemotePage, RemoteService};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct FakeState {
    posts: Vec<Post>,
    total_override: Option<u64>,
    fail_list: bool,
    fail_create: bool,
    list_delays: HashMap<u32, Duration>,
    create_delay: Option<Duration>,
    queries: Vec<ListQuery>,
    created: Vec<NewPost>,
}

/// In-memory stand-in for the remote list service
///
/// Clones share state, so a test can keep a handle after moving one into the
/// store.
#[derive(Clone, Default)]
pub struct FakeRemote {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeRemote {
    /// A service holding posts 1..=count, like the public placeholder API
    pub fn with_posts(count: u64) -> Self {
        let remote = Self::default();
        remote.inner.lock().unwrap().posts = (1..=count).map(remote_post).collect();
        remote
    }

    pub fn report_total(&self, total: u64) {
        self.inner.lock().unwrap().total_override = Some(total);
    }

    pub fn fail_list(&self, fail: bool) {
        self.inner.lock().unwrap().fail_list = fail;
    }

    pub fn fail_create(&self, fail: bool) {
        self.inner.lock().unwrap().fail_create = fail;
    }

    pub fn delay_page(&self, page: u32, delay: Duration) {
        self.inner.lock().unwrap().list_delays.insert(page, delay);
    }

    pub fn delay_create(&self, delay: Duration) {
        self.inner.lock().unwrap().create_delay = Some(delay);
    }

    pub fn queries(&self) -> Vec<ListQuery> {
        self.inner.lock().unwrap().queries.clone()
    }

    pub fn created(&self) -> Vec<NewPost> {
        self.inner.lock().unwrap().created.clone()
    }
}

#[async_trait]
impl RemoteService for FakeRemote {
    async fn list(&self, query: &ListQuery) -> Result<RemotePage> {
        let delay = {
            let mut state = self.inner.lock().unwrap();
            state.queries.push(*query);
            state.list_delays.get(&query.page).copied()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = self.inner.lock().unwrap();
        if state.fail_list {
            return Err(ExError::new(ExErrorKind::Transport)
                .with_op("remote_list")
                .with_message("connection refused"));
        }

        let mut posts = state.posts.clone();
        posts.sort_by_key(|p| p.id);
        if query.order == SortOrder::Descending {
            posts.reverse();
        }
        let skip = (query.page.saturating_sub(1) as usize) * query.limit;
        let page: Vec<Post> = posts.into_iter().skip(skip).take(query.limit).collect();

        Ok(RemotePage {
            posts: page,
            total_count: state
                .total_override
                .unwrap_or(state.posts.len() as u64),
        })
    }

    async fn create(&self, post: &NewPost) -> Result<()> {
        let delay = {
            let mut state = self.inner.lock().unwrap();
            state.created.push(post.clone());
            state.create_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.inner.lock().unwrap().fail_create {
            return Err(ExError::new(ExErrorKind::Transport)
                .with_op("remote_create")
                .with_message("503 Service Unavailable"));
        }
        Ok(())
    }
}

pub fn remote_post(id: u64) -> Post {
    NewPost::new((id - 1) / 10 + 1, format!("remote {}", id), "body").into_post(id)
}

pub fn ids(posts: &[Post]) -> Vec<u64> {
    posts.iter().map(|p| p.id).collect()
}
