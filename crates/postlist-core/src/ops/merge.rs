use crate::model::{Post, SortOrder};

/// Sort posts by id in the given order
///
/// The sort is stable; ids are unique across the combined record space so
/// ties do not occur in practice.
pub fn sort_records(mut posts: Vec<Post>, order: SortOrder) -> Vec<Post> {
    match order {
        SortOrder::Ascending => posts.sort_by(|a, b| a.id.cmp(&b.id)),
        SortOrder::Descending => posts.sort_by(|a, b| b.id.cmp(&a.id)),
    }
    posts
}

/// Assemble one page from a remote page and the local records
///
/// Concatenates both sets, sorts by id per `order`, then keeps the first
/// `page_size` entries. Local records that sort past the page boundary are
/// dropped from this page even if the remote page was full.
pub fn merge_page(
    remote: impl IntoIterator<Item = Post>,
    local: &[Post],
    order: SortOrder,
    page_size: usize,
) -> Vec<Post> {
    let candidates: Vec<Post> = remote.into_iter().chain(local.iter().cloned()).collect();
    let mut page = sort_records(candidates, order);
    page.truncate(page_size);
    page
}
