use std::iter::FusedIterator;
use std::sync::Arc;

use crate::error::{Error, Result};

/// An iterator over a copy-on-write collection as it was when the iterator was created.
///
/// Later mutations of the collection are never visible here. Items are yielded by clone;
/// use [`Snapshot::as_slice`] to look at them by reference.
#[derive(Clone)]
pub struct Snapshot<T> {
    items: Arc<Vec<T>>,
    front: usize,
    back: usize,
}

impl<T> Snapshot<T> {
    pub(crate) fn new(items: Arc<Vec<T>>) -> Self {
        let back = items.len();
        Self { items, front: 0, back }
    }

    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        &self.items[self.front..self.back]
    }

    /// Snapshots are read-only, so this always fails with [`Error::UnsupportedOperation`].
    pub fn remove(&mut self) -> Result<()> {
        Err(Error::UnsupportedOperation("remove through a copy-on-write snapshot"))
    }
}

impl<T: Clone> Iterator for Snapshot<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let item = self.items[self.front].clone();
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T: Clone> DoubleEndedIterator for Snapshot<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.items[self.back].clone())
    }
}

impl<T: Clone> ExactSizeIterator for Snapshot<T> {}
impl<T: Clone> FusedIterator for Snapshot<T> {}

impl<T: std::fmt::Debug> std::fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Snapshot").field(&self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_ends() {
        let mut s = Snapshot::new(Arc::new(vec![1, 2, 3, 4]));
        assert_eq!(s.len(), 4);
        assert_eq!(s.next(), Some(1));
        assert_eq!(s.next_back(), Some(4));
        assert_eq!(s.as_slice(), [2, 3]);
        assert_eq!(s.collect::<Vec<_>>(), [2, 3]);
    }

    #[test]
    fn remove_is_unsupported() {
        let mut s = Snapshot::new(Arc::new(vec!["x"]));
        s.next();
        assert!(matches!(s.remove(), Err(Error::UnsupportedOperation(_))));
    }
}
