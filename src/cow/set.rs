use std::borrow::Borrow;
use std::fmt;

use log::debug;

use super::{CopyOnWriteVec, Snapshot};

/// A thread-safe set that keeps its elements in a [`CopyOnWriteVec`].
///
/// It shares the vector's properties:
/// - best for small sets where reads vastly outnumber writes,
/// - every mutation copies the whole set,
/// - iteration runs over an unchanging [`Snapshot`] and can't be disturbed by other threads.
///
/// Elements are compared with `PartialEq` and kept in insertion order.
///
/// ```
/// use backport_concurrent::CopyOnWriteSet;
///
/// let handlers = CopyOnWriteSet::new();
/// handlers.add("audit");
/// handlers.add("metrics");
/// handlers.add("audit");
/// assert_eq!(handlers.len(), 2);
///
/// for name in &handlers {
///     // handlers added or removed from here on won't show up in this loop
///     handlers.remove(&name);
/// }
/// assert!(handlers.is_empty());
/// ```
pub struct CopyOnWriteSet<T> {
    items: CopyOnWriteVec<T>,
}

impl<T> CopyOnWriteSet<T> {
    pub fn new() -> Self {
        Self { items: CopyOnWriteVec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the set as it is right now, in insertion order.
    pub fn iter(&self) -> Snapshot<T> {
        self.items.iter()
    }

    pub fn clear(&self) {
        self.items.clear()
    }
}

impl<T: PartialEq> CopyOnWriteSet<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Whether every element of `items` is in the set. Checked against a single snapshot.
    pub fn contains_all<I>(&self, items: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let current = self.items.snapshot();
        items.into_iter().all(|item| current.contains(<I::Item as Borrow<T>>::borrow(&item)))
    }
}

impl<T: PartialEq + Clone> CopyOnWriteSet<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.to_vec()
    }

    /// Insert `item` if no equal element is present. Returns whether it was inserted.
    pub fn add(&self, item: T) -> bool {
        self.items.add_if_absent(item)
    }

    /// Insert every element of `items` that isn't present yet. Returns whether the set changed.
    pub fn add_all<I: IntoIterator<Item = T>>(&self, items: I) -> bool {
        self.items.add_all_absent(items) > 0
    }

    pub fn remove(&self, item: &T) -> bool {
        self.items.remove(item)
    }

    /// Remove every element that is also in `items`. Returns whether the set changed.
    ///
    /// `items` may yield elements or references to them, so another set works directly:
    ///
    /// ```
    /// use backport_concurrent::CopyOnWriteSet;
    ///
    /// let all: CopyOnWriteSet<_> = (1..=5).collect();
    /// let odd: CopyOnWriteSet<_> = [1, 3, 5].into_iter().collect();
    /// assert!(all.remove_all(&odd));
    /// assert!(all.remove_all(&[4]));
    /// assert_eq!(all.to_vec(), [2]);
    /// ```
    pub fn remove_all<I>(&self, items: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.items.remove_all(items)
    }

    /// Keep only the elements that are also in `items`. Returns whether the set changed.
    pub fn retain_all<I>(&self, items: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.items.retain_all(items)
    }
}

impl<T> Default for CopyOnWriteSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for CopyOnWriteSet<T> {
    fn clone(&self) -> Self {
        Self { items: self.items.clone() }
    }
}

impl<T: PartialEq> FromIterator<T> for CopyOnWriteSet<T> {
    /// Keeps the first of any run of equal elements.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut unique = Vec::new();
        let mut seen = 0usize;
        for item in iter {
            seen += 1;
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        if seen != unique.len() {
            debug!("dropped {} duplicate(s) building a copy-on-write set", seen - unique.len());
        }
        Self { items: CopyOnWriteVec::from_vec(unique) }
    }
}

impl<T: PartialEq + Clone> Extend<T> for CopyOnWriteSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<T: Clone> IntoIterator for &CopyOnWriteSet<T> {
    type Item = T;
    type IntoIter = Snapshot<T>;

    fn into_iter(self) -> Snapshot<T> {
        self.iter()
    }
}

/// Two sets are equal when they hold the same elements, whatever order they were added in.
impl<T: PartialEq> PartialEq for CopyOnWriteSet<T> {
    fn eq(&self, other: &Self) -> bool {
        let (ours, theirs) = (self.items.snapshot(), other.items.snapshot());
        ours.len() == theirs.len() && ours.iter().all(|item| theirs.contains(item))
    }
}

impl<T: Eq> Eq for CopyOnWriteSet<T> {}

impl<T: fmt::Debug> fmt::Debug for CopyOnWriteSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.snapshot().iter()).finish()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for CopyOnWriteSet<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.items, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de> + PartialEq> serde::Deserialize<'de> for CopyOnWriteSet<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Vec<T> as serde::Deserialize<'de>>::deserialize(deserializer).map(|items| items.into_iter().collect())
    }
}
