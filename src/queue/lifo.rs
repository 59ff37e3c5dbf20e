use super::{Queue, check_capacity};
use crate::error::Result;

/// A last-in first-out queue (a stack): the head is the most recently offered element.
#[derive(Debug, Clone)]
pub struct LifoQueue<T> {
    items: Vec<T>,
    capacity: Option<usize>,
}

impl<T> LifoQueue<T> {
    pub fn new() -> Self {
        Self { items: Vec::new(), capacity: None }
    }

    /// A stack that holds at most `capacity` elements. Fails if `capacity` is zero.
    pub fn bounded(capacity: usize) -> Result<Self> {
        let capacity = check_capacity(capacity)?;
        Ok(Self { items: Vec::with_capacity(capacity), capacity: Some(capacity) })
    }
}

impl<T> Queue<T> for LifoQueue<T> {
    fn offer(&mut self, element: T) -> bool {
        if self.capacity.is_some_and(|cap| self.items.len() >= cap) {
            return false;
        }
        self.items.push(element);
        true
    }

    fn poll(&mut self) -> Option<T> {
        self.items.pop()
    }

    fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}

impl<T> Default for LifoQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for LifoQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.offer(element);
        }
    }
}

impl<T> FromIterator<T> for LifoQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect(), capacity: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn bounded_stack() {
        let mut s = LifoQueue::bounded(2).unwrap();
        s.add("a").unwrap();
        s.add("b").unwrap();
        assert_eq!(s.add("c"), Err(Error::QueueFull { capacity: 2 }));
        assert_eq!(s.element(), Ok(&"b"));
        assert_eq!(s.remove(), Ok("b"));
        assert!(s.offer("c"));
        assert_eq!(s.poll(), Some("c"));
        assert_eq!(s.poll(), Some("a"));
        assert_eq!(s.poll(), None);
    }
}
