/// Scenario 1: Page assembly from remote and local posts
///
/// Covers the merge-sort-truncate rule, the id allocator boundary and the
/// page count derivation that the Post Store composes on every fetch.
use postlist_core::ops::{merge_page, total_pages, IdAllocator};
use postlist_core::{NewPost, Post, SortOrder};

fn remote_post(id: u64) -> Post {
    Post {
        owner_id: (id - 1) / 10 + 1,
        id,
        title: format!("remote {}", id),
        body: "from the service".to_string(),
    }
}

#[test]
fn test_scenario_01_first_page_with_empty_cache() {
    // GIVEN remote page 1 with ids 1..=10 and a total of 100
    let remote: Vec<Post> = (1..=10).map(remote_post).collect();
    let mut ids = IdAllocator::new();

    // WHEN the page is assembled with no local posts
    ids.observe(&remote);
    let page = merge_page(remote, &[], SortOrder::Ascending, 10);

    // THEN the page is the remote page and the counters match
    assert_eq!(page.len(), 10);
    assert_eq!(page.first().map(|p| p.id), Some(1));
    assert_eq!(total_pages(100, 10), 10);
    assert_eq!(ids.peek(), Some(101));
}

#[test]
fn test_scenario_01_created_post_falls_past_full_ascending_page() {
    // GIVEN a full ascending page 1 and a freshly created local post
    let remote: Vec<Post> = (1..=10).map(remote_post).collect();
    let mut ids = IdAllocator::new();
    ids.observe(&remote);
    let local = vec![NewPost::new(1, "T", "").into_post(ids.allocate().unwrap())];

    // WHEN the page is rebuilt
    let page = merge_page(remote, &local, SortOrder::Ascending, 10);

    // THEN id 101 is sliced off; it belongs to a later page
    let page_ids: Vec<u64> = page.iter().map(|p| p.id).collect();
    assert_eq!(page_ids, (1..=10).collect::<Vec<_>>());
    assert_eq!(local[0].id, 101);
    assert_eq!(ids.peek(), Some(102));
}

#[test]
fn test_scenario_01_descending_order_reverses_same_data() {
    let remote: Vec<Post> = (1..=10).map(remote_post).collect();

    let asc = merge_page(remote.clone(), &[], SortOrder::Ascending, 10);
    let desc = merge_page(remote, &[], SortOrder::Descending, 10);

    let mut reversed = desc.clone();
    reversed.reverse();
    assert_eq!(asc, reversed);
}

#[test]
fn test_scenario_01_local_posts_count_toward_pages() {
    // 100 remote + 1 local spills onto an eleventh page
    assert_eq!(total_pages(100 + 1, 10), 11);
}
