//! Post Store
//!
//! Merges one remote page with the locally created posts into a single
//! sorted page, and creates posts locally with best-effort remote
//! notification.
//!
//! Concurrency model:
//! - Remote calls run without holding any lock, bounded by the request
//!   timeout.
//! - Results are applied under a single-writer `tokio::sync::Mutex`, together
//!   with the synchronous cache read or write, so id allocation and
//!   persistence cannot interleave between operations.
//! - Page-changing calls take a ticket from a generation counter; a fetch
//!   whose ticket is no longer the newest does not touch state.

use postlist_core::errors::{ExError, PostListError};
use postlist_core::logging_facility::schema::{
    EVENT_SUPERSEDED, OP_CREATE_RECORD, OP_FETCH_PAGE, OP_SET_PAGE, OP_TOGGLE_SORT_ORDER,
};
use postlist_core::{log_op_end, log_op_error, log_op_start, NewPost, PageRequest, Post};
use postlist_core_types::RequestId;
use postlist_store::LocalCache;
use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::config::{StoreConfig, DEFAULT_REQUEST_TIMEOUT};
use crate::errors::{timeout_error, Result};
use crate::remote::{HttpRemote, ListQuery, RemoteService};
use crate::state::{StoreSnapshot, StoreState};

/// How a fetch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page was applied to the store
    Applied,
    /// A newer page request started meanwhile; this result was discarded
    Superseded,
}

/// Result of a local creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutcome {
    /// The post as materialized locally, with its allocated id
    pub post: Post,
    /// Whether the remote service accepted the notification
    pub remote_acknowledged: bool,
}

/// The Post Store
///
/// Owned by the caller and shared by reference (or `Arc`); every operation
/// takes `&self` and may run concurrently with the others.
pub struct PostStore {
    remote: Box<dyn RemoteService>,
    cache: LocalCache,
    state: Mutex<StoreState>,
    in_flight: AtomicUsize,
    generation: AtomicU64,
    request_timeout: Duration,
}

/// Marks the store busy for as long as it lives
struct BusyGuard<'a>(&'a AtomicUsize);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl PostStore {
    /// Create a store over `remote` and `cache` with default settings
    pub fn new(remote: impl RemoteService + 'static, cache: LocalCache) -> Self {
        Self {
            remote: Box::new(remote),
            cache,
            state: Mutex::new(StoreState::default()),
            in_flight: AtomicUsize::new(0),
            generation: AtomicU64::new(0),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Build the HTTP remote and the cache backend described by `config`
    ///
    /// # Errors
    ///
    /// HTTP client construction or cache backend open failures.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let remote = HttpRemote::new(config.api_url.clone(), config.request_timeout)?;
        let cache = config.cache.open()?;
        Ok(Self::new(remote, cache)
            .with_page_size(config.page_size)
            .with_request_timeout(config.request_timeout))
    }

    /// Page size used until a fetch requests another one
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.state.get_mut().page_size = page_size.max(1);
        self
    }

    /// Upper bound on every remote call
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// True while any operation is in flight
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Copy of the current state for rendering
    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.lock().await;
        state.snapshot(self.is_loading())
    }

    /// The Local Cache this store writes through to
    pub fn cache(&self) -> &LocalCache {
        &self.cache
    }

    /// Fetch one page and merge it with the local posts
    ///
    /// On success the page, page count, current page and sort order reflect
    /// `request`. On failure state is unchanged.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed request; `Transport`, `Decode` or
    /// `Timeout` when the remote call fails.
    pub async fn fetch_page(&self, request: PageRequest) -> Result<FetchOutcome> {
        let ticket = self.next_ticket();
        self.run_fetch(OP_FETCH_PAGE, request, ticket).await
    }

    /// Re-fetch the current page under the current order
    ///
    /// # Errors
    ///
    /// Same as [`PostStore::fetch_page`].
    pub async fn refresh(&self) -> Result<FetchOutcome> {
        let (request, ticket) = {
            let state = self.state.lock().await;
            (state.page_request(), self.next_ticket())
        };
        self.run_fetch(OP_FETCH_PAGE, request, ticket).await
    }

    /// Move to `page` and fetch it
    ///
    /// The current page changes as soon as the call starts and is restored if
    /// the fetch fails while no newer page request has started.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for page 0, otherwise as [`PostStore::fetch_page`].
    pub async fn set_page(&self, page: u32) -> Result<FetchOutcome> {
        if page == 0 {
            let err = ExError::from(PostListError::InvalidPage { page }).with_op(OP_SET_PAGE);
            log_op_error!(OP_SET_PAGE, err.clone(), duration_ms = 0u64, page = page);
            return Err(err);
        }

        let (request, ticket, previous) = {
            let mut state = self.state.lock().await;
            let previous = std::mem::replace(&mut state.current_page, page);
            (state.page_request(), self.next_ticket(), previous)
        };
        let result = self.run_fetch(OP_SET_PAGE, request, ticket).await;
        if result.is_err() {
            self.roll_back(ticket, |state| state.current_page = previous).await;
        }
        result
    }

    /// Flip the sort order and re-fetch the current page
    ///
    /// The displayed page is re-sorted under the new order at once, so it is
    /// sorted by the reported order at every point. A failed fetch restores
    /// the previous order unless a newer page request has started.
    ///
    /// # Errors
    ///
    /// Same as [`PostStore::fetch_page`].
    pub async fn toggle_sort_order(&self) -> Result<FetchOutcome> {
        let (request, ticket, previous) = {
            let mut state = self.state.lock().await;
            let previous = state.sort_order;
            state.set_sort_order(previous.toggled());
            (state.page_request(), self.next_ticket(), previous)
        };
        let result = self.run_fetch(OP_TOGGLE_SORT_ORDER, request, ticket).await;
        if result.is_err() {
            self.roll_back(ticket, |state| state.set_sort_order(previous)).await;
        }
        result
    }

    /// Create a post locally, notifying the remote service on a best-effort
    /// basis
    ///
    /// The post is persisted to the Local Cache and merged into the current
    /// page whether or not the remote service accepted it.
    ///
    /// # Errors
    ///
    /// Local Cache write failures, after which the post is not created and
    /// its id is not consumed; `Internal` once local ids are exhausted.
    pub async fn create_record(&self, new_post: NewPost) -> Result<CreateOutcome> {
        let _busy = self.begin();
        let request_id = RequestId::new();
        let started = Instant::now();
        log_op_start!(
            OP_CREATE_RECORD,
            request_id = %request_id,
            owner_id = new_post.owner_id,
        );

        let result = self.create_inner(new_post, &request_id).await;
        let duration_ms = elapsed_ms(started);
        match &result {
            Ok(outcome) => log_op_end!(
                OP_CREATE_RECORD,
                duration_ms = duration_ms,
                request_id = %request_id,
                post_id = outcome.post.id,
                remote_acknowledged = outcome.remote_acknowledged,
            ),
            Err(err) => log_op_error!(
                OP_CREATE_RECORD,
                err.clone(),
                duration_ms = duration_ms,
                request_id = %request_id,
            ),
        }
        result.map_err(|err| err.with_request_id(request_id))
    }

    async fn create_inner(
        &self,
        new_post: NewPost,
        request_id: &RequestId,
    ) -> Result<CreateOutcome> {
        let remote_acknowledged = match self
            .bounded("remote_create", self.remote.create(&new_post))
            .await
        {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(
                    component = module_path!(),
                    op = OP_CREATE_RECORD,
                    request_id = %request_id,
                    err.code = err.code(),
                    err.message = err.message(),
                    "remote create failed, keeping post locally"
                );
                false
            }
        };

        let mut state = self.state.lock().await;
        if !state.local_loaded {
            // Never overwrite posts persisted by an earlier session
            let local = self.cache.load();
            state.adopt_local(local);
        }

        // Allocate on a copy; the store's counter moves only once the post is saved
        let mut ids = state.ids;
        let post = new_post.into_post(ids.allocate()?);
        let mut persisted = state.local_posts.clone();
        persisted.push(post.clone());
        self.cache
            .save(&persisted)
            .map_err(|err| err.with_entity_id(post.id.to_string()))?;

        state.commit_created(&post, persisted, ids);

        Ok(CreateOutcome {
            post,
            remote_acknowledged,
        })
    }

    async fn run_fetch(
        &self,
        op: &'static str,
        request: PageRequest,
        ticket: u64,
    ) -> Result<FetchOutcome> {
        let _busy = self.begin();
        let request_id = RequestId::new();
        let started = Instant::now();
        log_op_start!(
            op,
            request_id = %request_id,
            page = request.page,
            page_size = request.page_size as u64,
            sort_order = request.sort_order.as_str(),
        );

        let result = self.fetch_inner(request, ticket).await;
        let duration_ms = elapsed_ms(started);
        match &result {
            Ok(FetchOutcome::Applied) => log_op_end!(
                op,
                duration_ms = duration_ms,
                request_id = %request_id,
                page = request.page,
            ),
            Ok(FetchOutcome::Superseded) => tracing::info!(
                component = module_path!(),
                op = op,
                event = EVENT_SUPERSEDED,
                duration_ms = duration_ms,
                request_id = %request_id,
                page = request.page,
            ),
            Err(err) => log_op_error!(
                op,
                err.clone(),
                duration_ms = duration_ms,
                request_id = %request_id,
                page = request.page,
            ),
        }
        result.map_err(|err| err.with_request_id(request_id))
    }

    async fn fetch_inner(&self, request: PageRequest, ticket: u64) -> Result<FetchOutcome> {
        request.validate()?;

        let query = ListQuery::from(request);
        let page = self.bounded("remote_list", self.remote.list(&query)).await?;

        let mut state = self.state.lock().await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            return Ok(FetchOutcome::Superseded);
        }

        let local = self.cache.load();
        state.apply_fetch(request, page, local);
        tracing::debug!(
            component = module_path!(),
            page = state.current_page,
            total_pages = state.total_pages,
            next_id = ?state.ids.peek(),
            local_posts = state.local_posts.len() as u64,
            "page applied"
        );
        Ok(FetchOutcome::Applied)
    }

    async fn bounded<T>(&self, op: &str, call: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.request_timeout, call)
            .await
            .map_err(|_| timeout_error(op, self.request_timeout))?
    }

    /// Undo a page-changing call's eager update if no newer request started
    async fn roll_back(&self, ticket: u64, undo: impl FnOnce(&mut StoreState)) {
        let mut state = self.state.lock().await;
        if self.generation.load(Ordering::SeqCst) == ticket {
            undo(&mut state);
        }
    }

    fn begin(&self) -> BusyGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        BusyGuard(&self.in_flight)
    }

    fn next_ticket(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl std::fmt::Debug for PostStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostStore")
            .field("cache", &self.cache)
            .field("loading", &self.is_loading())
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
