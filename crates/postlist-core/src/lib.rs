//! postlist Core - domain model and pure paging logic
//!
//! This crate provides the pieces of the post list that have no I/O:
//! - `Post` / `NewPost` records and their wire shape
//! - Sort order and page requests
//! - Merge-sort-truncate of remote and local records into one page
//! - Page count derivation and local identifier allocation
//! - The error facility (`ExError`) and the structured logging facility

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, PostListError, Result};
pub use model::{NewPost, PageRequest, Post, SortOrder, DEFAULT_PAGE_SIZE};
pub use ops::{merge_page, sort_records, total_pages, IdAllocator};
