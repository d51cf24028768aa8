//! Pure operations over posts: ordering, page assembly, page counts and
//! identifier allocation. Nothing here touches the network or the cache.

pub mod id_alloc;
pub mod merge;
pub mod paging;

pub use id_alloc::{IdAllocator, REMOTE_ID_CEILING};
pub use merge::{merge_page, sort_records};
pub use paging::{parse_total_count, total_pages};
