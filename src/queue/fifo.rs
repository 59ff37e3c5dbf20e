use std::collections::VecDeque;

use super::{Queue, check_capacity};
use crate::error::Result;

/// A first-in first-out queue: the head is the element that has been queued the longest.
///
/// Optionally bounded; a full bounded queue refuses `offer`.
#[derive(Debug, Clone)]
pub struct FifoQueue<T> {
    items: VecDeque<T>,
    capacity: Option<usize>,
}

impl<T> FifoQueue<T> {
    pub fn new() -> Self {
        Self { items: VecDeque::new(), capacity: None }
    }

    /// A queue that holds at most `capacity` elements. Fails if `capacity` is zero.
    pub fn bounded(capacity: usize) -> Result<Self> {
        let capacity = check_capacity(capacity)?;
        Ok(Self { items: VecDeque::with_capacity(capacity), capacity: Some(capacity) })
    }

    /// Elements in head-to-tail order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Queue<T> for FifoQueue<T> {
    fn offer(&mut self, element: T) -> bool {
        if self.capacity.is_some_and(|cap| self.items.len() >= cap) {
            return false;
        }
        self.items.push_back(element);
        true
    }

    fn poll(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}

impl<T> Default for FifoQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for FifoQueue<T> {
    /// Offers every element; ones a bounded queue refuses are dropped.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.offer(element);
        }
    }
}

impl<T> FromIterator<T> for FifoQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect(), capacity: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_extend_drops_overflow() {
        let mut q = FifoQueue::bounded(3).unwrap();
        q.extend(0..10);
        assert_eq!(q.iter().copied().collect::<Vec<_>>(), [0, 1, 2]);
        assert_eq!(q.capacity(), Some(3));
        q.poll();
        assert!(q.offer(10));
        assert_eq!(q.iter().copied().collect::<Vec<_>>(), [1, 2, 10]);
    }

    #[test]
    fn from_iter_is_unbounded() {
        let mut q: FifoQueue<_> = "abc".chars().collect();
        assert_eq!(q.capacity(), None);
        assert_eq!(q.poll(), Some('a'));
        assert_eq!(q.peek(), Some(&'b'));
    }
}
