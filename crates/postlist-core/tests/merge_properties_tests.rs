//! Property tests for page assembly and id allocation

use std::collections::HashSet;

use postlist_core::ops::{merge_page, IdAllocator};
use postlist_core::{Post, SortOrder};
use proptest::prelude::*;

fn posts_from(ids: &HashSet<u64>) -> Vec<Post> {
    ids.iter()
        .map(|&id| Post {
            owner_id: 1,
            id,
            title: String::new(),
            body: String::new(),
        })
        .collect()
}

fn order_strategy() -> impl Strategy<Value = SortOrder> {
    prop_oneof![Just(SortOrder::Ascending), Just(SortOrder::Descending)]
}

proptest! {
    #[test]
    fn merged_page_is_sorted_and_bounded(
        remote in prop::collection::hash_set(1u64..=100, 0..20),
        local in prop::collection::hash_set(101u64..300, 0..20),
        order in order_strategy(),
        page_size in 1usize..15,
    ) {
        let page = merge_page(posts_from(&remote), &posts_from(&local), order, page_size);

        prop_assert!(page.len() <= page_size);
        prop_assert_eq!(page.len(), page_size.min(remote.len() + local.len()));
        for pair in page.windows(2) {
            match order {
                SortOrder::Ascending => prop_assert!(pair[0].id < pair[1].id),
                SortOrder::Descending => prop_assert!(pair[0].id > pair[1].id),
            }
        }
    }

    #[test]
    fn allocated_ids_never_collide_with_observed(
        observed in prop::collection::hash_set(1u64..1000, 0..50),
        allocations in 1usize..20,
    ) {
        let mut ids = IdAllocator::new();
        ids.observe(&posts_from(&observed));

        let mut minted = HashSet::new();
        for _ in 0..allocations {
            let before = ids.peek();
            let id = ids.allocate().unwrap();
            prop_assert!(id > 100);
            prop_assert!(!observed.contains(&id));
            prop_assert!(minted.insert(id));
            prop_assert!(ids.peek() > before);
        }
    }
}
