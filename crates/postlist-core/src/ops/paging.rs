use crate::errors::{PostListError, Result};

/// Number of pages needed for `total_count` records
///
/// Always at least 1 so an empty list still has a page to show.
pub fn total_pages(total_count: u64, page_size: usize) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total_count.div_ceil(page_size as u64).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Parse the remote total-count signal
///
/// # Errors
///
/// `MissingTotalCount` when the signal is absent, `InvalidTotalCount` when it
/// is not a non-negative integer.
pub fn parse_total_count(raw: Option<&str>) -> Result<u64> {
    let raw = raw.ok_or(PostListError::MissingTotalCount)?;
    raw.trim()
        .parse::<u64>()
        .map_err(|_| PostListError::InvalidTotalCount {
            value: raw.to_string(),
        })
}
