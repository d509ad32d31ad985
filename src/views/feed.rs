//! Bounded newest-first list backing every view

use std::collections::VecDeque;

/// Fixed-capacity list: inserts go to the front, the oldest item falls off
/// the back once capacity is reached.
#[derive(Debug, Clone)]
pub struct BoundedFeed<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedFeed<T> {
    /// Create new feed with the given capacity (at least 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend `item`, dropping the oldest items beyond capacity
    pub fn push(&mut self, item: T) {
        self.items.push_front(item);
        self.items.truncate(self.capacity);
    }

    /// Newest item
    pub fn latest(&self) -> Option<&T> {
        self.items.front()
    }

    /// Items newest-first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    /// Mutable items newest-first
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut T> + ExactSizeIterator {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Clone> BoundedFeed<T> {
    /// Items newest-first as an owned Vec
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

impl<T> Default for BoundedFeed<T> {
    fn default() -> Self {
        Self::new(50)
    }
}

impl<T> Extend<T> for BoundedFeed<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_feed() {
        let feed: BoundedFeed<i32> = BoundedFeed::new(10);
        assert_eq!(feed.capacity(), 10);
        assert!(feed.is_empty());
        assert!(feed.latest().is_none());
    }

    #[test]
    fn test_newest_first() {
        let mut feed = BoundedFeed::new(3);
        feed.push(1);
        feed.push(2);
        feed.push(3);

        assert!(feed.is_full());
        assert_eq!(feed.to_vec(), vec![3, 2, 1]);
        assert_eq!(feed.latest(), Some(&3));
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let mut feed = BoundedFeed::new(3);
        for i in 1..=10 {
            feed.push(i);
        }

        assert_eq!(feed.len(), 3);
        assert_eq!(feed.to_vec(), vec![10, 9, 8]);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut feed = BoundedFeed::new(0);
        feed.push("a");
        feed.push("b");
        assert_eq!(feed.to_vec(), vec!["b"]);
    }

    #[test]
    fn test_iter_mut() {
        let mut feed = BoundedFeed::new(4);
        feed.extend([1, 2, 3]);
        for item in feed.iter_mut() {
            *item *= 10;
        }
        assert_eq!(feed.to_vec(), vec![30, 20, 10]);
    }

    #[test]
    fn test_clear() {
        let mut feed = BoundedFeed::new(5);
        feed.extend(["x", "y"]);
        feed.clear();
        assert!(feed.is_empty());
    }

    proptest! {
        #[test]
        fn prop_keeps_most_recent_in_reverse(
            capacity in 1usize..64,
            items in proptest::collection::vec(any::<u32>(), 0..200),
        ) {
            let mut feed = BoundedFeed::new(capacity);
            feed.extend(items.iter().copied());

            let expected: Vec<u32> = items.iter().rev().take(capacity).copied().collect();
            prop_assert!(feed.len() <= capacity);
            prop_assert_eq!(feed.to_vec(), expected);
        }
    }
}
