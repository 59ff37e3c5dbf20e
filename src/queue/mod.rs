//! The `Queue` contract and a few plain implementations of it.
//!
//! Every operation comes in two flavors: an "attempt" one that reports failure in
//! its return value (`offer`, `poll`, `peek`) and a "require" one that reports it as
//! an [`Error`] (`add`, `remove`, `element`). Use whichever matches whether an empty
//! or full queue is an expected condition at the call site.

use crate::error::{Error, Result};

mod fifo;
mod lifo;
mod priority;

pub use fifo::FifoQueue;
pub use lifo::LifoQueue;
pub use priority::PriorityQueue;

/// A collection designed for holding elements prior to processing.
///
/// Which element is the *head* (the one `poll`, `remove`, `peek` and `element` act on)
/// is decided by the implementation, and every implementation documents its ordering.
///
/// The "nothing there" result is `None`, which can never be mistaken for a stored element.
pub trait Queue<T> {
    /// Insert `element` if the queue's capacity allows it.
    ///
    /// Returns `false` (dropping `element`, leaving the queue untouched) if it doesn't.
    fn offer(&mut self, element: T) -> bool;

    /// Remove and return the head, or `None` if the queue is empty.
    fn poll(&mut self) -> Option<T>;

    /// The head, without removing it.
    fn peek(&self) -> Option<&T>;

    fn len(&self) -> usize;

    /// The most elements this queue will ever hold, or `None` if unbounded.
    fn capacity(&self) -> Option<usize> {
        None
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Like [`Queue::offer`], but a refused element is an [`Error::QueueFull`].
    fn add(&mut self, element: T) -> Result<()> {
        if self.offer(element) {
            Ok(())
        } else {
            Err(Error::QueueFull { capacity: self.capacity().unwrap_or(self.len()) })
        }
    }

    /// Like [`Queue::poll`], but an empty queue is an [`Error::NoSuchElement`].
    fn remove(&mut self) -> Result<T> {
        self.poll().ok_or(Error::NoSuchElement)
    }

    /// Like [`Queue::peek`], but an empty queue is an [`Error::NoSuchElement`].
    fn element(&self) -> Result<&T> {
        self.peek().ok_or(Error::NoSuchElement)
    }
}

/// Shared capacity check for the bounded queues.
pub(crate) fn check_capacity(capacity: usize) -> Result<usize> {
    if capacity == 0 {
        return Err(Error::InvalidArgument("queue capacity must be at least 1".into()));
    }
    Ok(capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    // exercise the contract through a trait object so nothing relies on inherent methods
    fn drain(q: &mut dyn Queue<u32>) -> Vec<u32> {
        let mut out = vec![];
        while let Some(x) = q.poll() {
            out.push(x);
        }
        out
    }

    fn fill(q: &mut dyn Queue<u32>) {
        for x in [3, 1, 2] {
            q.add(x).unwrap();
        }
    }

    #[test]
    fn orderings() {
        let mut fifo = FifoQueue::<u32>::new();
        let mut lifo = LifoQueue::<u32>::new();
        let mut prio = PriorityQueue::<u32>::new();
        fill(&mut fifo);
        fill(&mut lifo);
        fill(&mut prio);
        assert_eq!(drain(&mut fifo), [3, 1, 2]);
        assert_eq!(drain(&mut lifo), [2, 1, 3]);
        assert_eq!(drain(&mut prio), [1, 2, 3]);
    }

    #[test]
    fn empty_queue_attempt_vs_require() {
        let queues: Vec<Box<dyn Queue<u32>>> = vec![
            Box::new(FifoQueue::<u32>::new()),
            Box::new(LifoQueue::<u32>::new()),
            Box::new(PriorityQueue::<u32>::new()),
        ];
        for mut q in queues {
            assert!(q.is_empty());
            assert_eq!(q.poll(), None);
            assert_eq!(q.peek(), None);
            assert_eq!(q.remove(), Err(Error::NoSuchElement));
            assert_eq!(q.element(), Err(Error::NoSuchElement));
        }
    }

    #[test]
    fn peek_does_not_remove() {
        let mut q = FifoQueue::new();
        assert!(q.offer(5u32));
        assert_eq!(q.peek(), Some(&5));
        assert_eq!(q.element(), Ok(&5));
        assert_eq!(q.len(), 1);
        assert_eq!(q.remove(), Ok(5));
        assert!(q.is_empty());
    }

    #[test]
    fn full_queue_attempt_vs_require() {
        let mut q = FifoQueue::<u32>::bounded(2).unwrap();
        assert!(q.offer(1u32));
        assert!(q.offer(2));
        assert!(!q.offer(3));
        assert_eq!(q.add(4), Err(Error::QueueFull { capacity: 2 }));
        // rejected inserts left nothing behind
        assert_eq!(drain(&mut q), [1, 2]);
    }

    #[test]
    fn zero_capacity_rejected() {
        assert!(matches!(FifoQueue::<u32>::bounded(0), Err(Error::InvalidArgument(_))));
        assert!(matches!(LifoQueue::<u32>::bounded(0), Err(Error::InvalidArgument(_))));
    }
}
