//! Post Store state and its transitions
//!
//! `StoreState` is only ever touched under the store's single-writer lock.
//! Each transition keeps the page sorted and bounded, the id allocator ahead
//! of every observed id, and the page count derived from the authoritative
//! total.

use postlist_core::ops::{merge_page, sort_records, total_pages, IdAllocator};
use postlist_core::{PageRequest, Post, SortOrder, DEFAULT_PAGE_SIZE};

use crate::remote::RemotePage;

/// Read-only view of the store handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// The displayed page
    pub posts: Vec<Post>,
    /// Every locally created post
    pub local_posts: Vec<Post>,
    pub loading: bool,
    pub current_page: u32,
    pub total_pages: u32,
    pub sort_order: SortOrder,
    pub page_size: usize,
    /// Id the next created post receives; `None` once ids are exhausted
    pub next_id: Option<u64>,
}

#[derive(Debug, Clone)]
pub(crate) struct StoreState {
    pub(crate) posts: Vec<Post>,
    pub(crate) local_posts: Vec<Post>,
    /// Whether `local_posts` reflects the cache yet
    pub(crate) local_loaded: bool,
    pub(crate) current_page: u32,
    pub(crate) total_pages: u32,
    pub(crate) sort_order: SortOrder,
    pub(crate) page_size: usize,
    /// Remote-reported total from the last applied fetch
    pub(crate) remote_total: u64,
    pub(crate) ids: IdAllocator,
}

impl StoreState {
    pub(crate) fn new(page_size: usize) -> Self {
        Self {
            posts: Vec::new(),
            local_posts: Vec::new(),
            local_loaded: false,
            current_page: 1,
            total_pages: 1,
            sort_order: SortOrder::default(),
            page_size,
            remote_total: 0,
            ids: IdAllocator::new(),
        }
    }

    /// Request for the current page under the current order
    pub(crate) fn page_request(&self) -> PageRequest {
        PageRequest::new(self.current_page, self.sort_order).with_page_size(self.page_size)
    }

    /// Replace the in-memory local posts with what the cache holds
    pub(crate) fn adopt_local(&mut self, local: Vec<Post>) {
        self.ids.observe(&local);
        self.local_posts = local;
        self.local_loaded = true;
    }

    /// Switch the sort order, re-sorting the displayed page to match
    pub(crate) fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
        let current = std::mem::take(&mut self.posts);
        self.posts = sort_records(current, order);
    }

    /// Apply a fetched remote page together with freshly loaded local posts
    pub(crate) fn apply_fetch(&mut self, request: PageRequest, page: RemotePage, local: Vec<Post>) {
        self.adopt_local(local);
        self.ids.observe(&page.posts);

        self.posts = merge_page(
            page.posts,
            &self.local_posts,
            request.sort_order,
            request.page_size,
        );
        self.current_page = request.page;
        self.sort_order = request.sort_order;
        self.page_size = request.page_size;
        self.remote_total = page.total_count;
        self.recompute_total_pages();
    }

    /// Commit a created post that has already been persisted
    ///
    /// `persisted` is the full local sequence as written to the cache, ending
    /// with `post`; `ids` is the allocator `post.id` was taken from.
    pub(crate) fn commit_created(&mut self, post: &Post, persisted: Vec<Post>, ids: IdAllocator) {
        self.ids = ids;
        self.local_posts = persisted;
        let current = std::mem::take(&mut self.posts);
        self.posts = merge_page(
            current,
            std::slice::from_ref(post),
            self.sort_order,
            self.page_size,
        );
        self.recompute_total_pages();
    }

    fn recompute_total_pages(&mut self) {
        let total = self.remote_total + self.local_posts.len() as u64;
        self.total_pages = total_pages(total, self.page_size);
    }

    pub(crate) fn snapshot(&self, loading: bool) -> StoreSnapshot {
        StoreSnapshot {
            posts: self.posts.clone(),
            local_posts: self.local_posts.clone(),
            loading,
            current_page: self.current_page,
            total_pages: self.total_pages,
            sort_order: self.sort_order,
            page_size: self.page_size,
            next_id: self.ids.peek(),
        }
    }
}

impl Default for StoreState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postlist_core::NewPost;

    fn post(id: u64) -> Post {
        NewPost::new(1, format!("post {}", id), "").into_post(id)
    }

    fn remote_page(ids: impl IntoIterator<Item = u64>, total_count: u64) -> RemotePage {
        RemotePage {
            posts: ids.into_iter().map(post).collect(),
            total_count,
        }
    }

    fn ids(posts: &[Post]) -> Vec<u64> {
        posts.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_apply_fetch_with_empty_cache() {
        let mut state = StoreState::default();

        state.apply_fetch(
            PageRequest::new(1, SortOrder::Ascending),
            remote_page(1..=10, 100),
            Vec::new(),
        );

        assert_eq!(ids(&state.posts), (1..=10).collect::<Vec<_>>());
        assert_eq!(state.total_pages, 10);
        assert_eq!(state.ids.peek(), Some(101));
    }

    #[test]
    fn test_apply_fetch_raises_next_id_past_cached_posts() {
        let mut state = StoreState::default();

        state.apply_fetch(
            PageRequest::new(1, SortOrder::Descending),
            remote_page((91..=100).rev(), 100),
            vec![post(101), post(140)],
        );

        assert_eq!(state.ids.peek(), Some(141));
        assert_eq!(state.posts[0].id, 140);
        assert_eq!(state.posts[1].id, 101);
        assert_eq!(state.posts.len(), 10);
        assert_eq!(state.total_pages, 11);
    }

    #[test]
    fn test_apply_fetch_never_lowers_next_id() {
        let mut state = StoreState::default();
        state.ids.observe(&[post(500)]);

        state.apply_fetch(
            PageRequest::new(1, SortOrder::Ascending),
            remote_page(1..=10, 100),
            Vec::new(),
        );

        assert_eq!(state.ids.peek(), Some(501));
    }

    #[test]
    fn test_commit_created_recomputes_from_count() {
        let mut state = StoreState::default();
        state.apply_fetch(
            PageRequest::new(1, SortOrder::Ascending),
            remote_page(1..=10, 100),
            Vec::new(),
        );

        let mut alloc = state.ids;
        let created = NewPost::new(1, "T", "").into_post(alloc.allocate().unwrap());
        state.commit_created(&created, vec![created.clone()], alloc);

        assert_eq!(state.local_posts, vec![created]);
        assert_eq!(ids(&state.posts), (1..=10).collect::<Vec<_>>());
        assert_eq!(state.total_pages, 11);
        assert_eq!(state.ids.peek(), Some(102));
    }

    #[test]
    fn test_set_sort_order_keeps_page_sorted() {
        let mut state = StoreState::default();
        state.apply_fetch(
            PageRequest::new(1, SortOrder::Ascending),
            remote_page(1..=10, 100),
            Vec::new(),
        );

        state.set_sort_order(SortOrder::Descending);

        assert_eq!(state.sort_order, SortOrder::Descending);
        assert_eq!(ids(&state.posts), (1..=10).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_total_pages_has_a_floor_of_one() {
        let mut state = StoreState::default();
        state.apply_fetch(
            PageRequest::new(1, SortOrder::Ascending),
            remote_page(Vec::new(), 0),
            Vec::new(),
        );

        assert_eq!(state.total_pages, 1);
    }
}
