use crate::errors::{PostListError, Result};
use crate::model::Post;

/// Highest id the remote service hands out on its own
pub const REMOTE_ID_CEILING: u64 = 100;

/// Allocator for locally minted post ids
///
/// Invariant: while not exhausted, `peek()` is strictly greater than every id
/// observed so far and than `REMOTE_ID_CEILING`, and never decreases. Once an
/// id of `u64::MAX` has been observed or handed out, no further id exists and
/// `peek()` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdAllocator {
    next: Option<u64>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next: Some(REMOTE_ID_CEILING + 1),
        }
    }

    /// The id the next allocation will return, `None` once exhausted
    pub fn peek(&self) -> Option<u64> {
        self.next
    }

    /// Raise the counter past every id in `posts`
    pub fn observe<'a>(&mut self, posts: impl IntoIterator<Item = &'a Post>) {
        if let Some(max_id) = posts.into_iter().map(|p| p.id).max() {
            self.next = match (self.next, max_id.checked_add(1)) {
                (Some(next), Some(past_max)) => Some(next.max(past_max)),
                _ => None,
            };
        }
    }

    /// Hand out the next id
    ///
    /// # Errors
    ///
    /// Returns `IdsExhausted` when no id above every observed one remains.
    pub fn allocate(&mut self) -> Result<u64> {
        let id = self.next.ok_or(PostListError::IdsExhausted)?;
        self.next = id.checked_add(1);
        Ok(id)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64) -> Post {
        Post {
            owner_id: 1,
            id,
            title: String::new(),
            body: String::new(),
        }
    }

    #[test]
    fn test_starts_past_remote_ceiling() {
        assert_eq!(IdAllocator::new().peek(), Some(101));
    }

    #[test]
    fn test_observe_never_lowers() {
        let mut ids = IdAllocator::new();
        ids.observe(&[post(150)]);
        assert_eq!(ids.peek(), Some(151));

        ids.observe(&[post(3), post(10)]);
        assert_eq!(ids.peek(), Some(151));
    }

    #[test]
    fn test_allocate_increments() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate(), Ok(101));
        assert_eq!(ids.allocate(), Ok(102));
        assert_eq!(ids.peek(), Some(103));
    }

    #[test]
    fn test_observing_max_id_exhausts() {
        let mut ids = IdAllocator::new();
        ids.observe(&[post(u64::MAX)]);

        assert_eq!(ids.peek(), None);
        assert_eq!(ids.allocate(), Err(PostListError::IdsExhausted));

        // Lower ids seen later do not revive the counter
        ids.observe(&[post(7)]);
        assert_eq!(ids.peek(), None);
    }

    #[test]
    fn test_last_id_can_be_allocated_once() {
        let mut ids = IdAllocator::new();
        ids.observe(&[post(u64::MAX - 1)]);

        assert_eq!(ids.allocate(), Ok(u64::MAX));
        assert_eq!(ids.peek(), None);
        assert_eq!(ids.allocate(), Err(PostListError::IdsExhausted));
    }
}
