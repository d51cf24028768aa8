mod page;
mod post;

pub use page::{PageRequest, SortOrder, DEFAULT_PAGE_SIZE};
pub use post::{NewPost, Post};
