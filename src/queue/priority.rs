use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::Queue;

/// An unbounded priority queue: the head is the *least* element by `Ord`.
///
/// Ties are broken arbitrarily. Wrap elements in [`Reverse`] to get the greatest first.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T: Ord> {
    heap: BinaryHeap<Reverse<T>>,
}

impl<T: Ord> PriorityQueue<T> {
    pub fn new() -> Self {
        Self { heap: BinaryHeap::new() }
    }

    /// Consume the queue, yielding elements from least to greatest.
    pub fn into_sorted_vec(self) -> Vec<T> {
        // ascending by `Reverse<T>` is descending by `T`
        let mut out: Vec<T> = self.heap.into_sorted_vec().into_iter().map(|Reverse(x)| x).collect();
        out.reverse();
        out
    }
}

impl<T: Ord> Queue<T> for PriorityQueue<T> {
    fn offer(&mut self, element: T) -> bool {
        self.heap.push(Reverse(element));
        true
    }

    fn poll(&mut self) -> Option<T> {
        self.heap.pop().map(|Reverse(x)| x)
    }

    fn peek(&self) -> Option<&T> {
        self.heap.peek().map(|Reverse(x)| x)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.heap.extend(iter.into_iter().map(Reverse));
    }
}

impl<T: Ord> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { heap: iter.into_iter().map(Reverse).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_first() {
        let mut q: PriorityQueue<i64> = [5, -3, 9, 0, 5].into_iter().collect();
        assert_eq!(q.peek(), Some(&-3));
        assert_eq!(q.poll(), Some(-3));
        assert_eq!(q.into_sorted_vec(), [0, 5, 5, 9]);
    }

    #[test]
    fn reverse_gives_greatest_first() {
        let mut q = PriorityQueue::new();
        q.extend(["b", "c", "a"].map(Reverse));
        assert_eq!(q.poll(), Some(Reverse("c")));
        assert_eq!(q.capacity(), None);
    }
}
