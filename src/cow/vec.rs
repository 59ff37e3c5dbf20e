use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use log::trace;

use super::Snapshot;
use crate::spinlock_mutex::Mutex;

/// A vector whose every mutation copies the whole thing and atomically publishes the copy.
///
/// Reads go straight to the published `Arc<Vec<T>>` without taking any lock. Writes are
/// serialized by a lock held across "load the current vector, build the next one,
/// publish it", so a check-then-insert like [`CopyOnWriteVec::add_if_absent`] is atomic
/// with respect to every other writer.
pub struct CopyOnWriteVec<T> {
    current: ArcSwap<Vec<T>>,
    write_lock: Mutex<()>,
}

impl<T> CopyOnWriteVec<T> {
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            current: ArcSwap::from_pointee(items),
            write_lock: Mutex::new(()),
        }
    }

    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }

    /// The currently published contents. They will never change, whatever happens to `self`.
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        self.current.load_full()
    }

    pub fn iter(&self) -> Snapshot<T> {
        Snapshot::new(self.snapshot())
    }

    /// Drop everything. Publishes an empty vector unless already empty.
    pub fn clear(&self) {
        self.update(|current| ((!current.is_empty()).then(Vec::new), ()))
    }

    /// Run one writer step: `f` sees the current contents and may return the next ones.
    ///
    /// Nothing is published (and readers keep the old `Arc`) when `f` returns `None`.
    fn update<R>(&self, f: impl FnOnce(&[T]) -> (Option<Vec<T>>, R)) -> R {
        self.write_lock.with_lock(|_| {
            let current = self.current.load();
            let (next, ret) = f(current.as_slice());
            if let Some(next) = next {
                trace!("publishing copy-on-write vector of {} elements (was {})", next.len(), current.len());
                self.current.store(Arc::new(next));
            }
            ret
        })
    }
}

impl<T: PartialEq> CopyOnWriteVec<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.current.load().contains(item)
    }
}

impl<T: Clone> CopyOnWriteVec<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.current.load().to_vec()
    }

    pub fn push(&self, item: T) {
        self.update(|current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend_from_slice(current);
            next.push(item);
            (Some(next), ())
        })
    }
}

impl<T: PartialEq + Clone> CopyOnWriteVec<T> {
    /// Append `item` unless an equal element is already present. Returns whether it was added.
    pub fn add_if_absent(&self, item: T) -> bool {
        self.update(|current| {
            if current.contains(&item) {
                return (None, false);
            }
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend_from_slice(current);
            next.push(item);
            (Some(next), true)
        })
    }

    /// Append every element of `items` not already present, in order, skipping repeats
    /// within `items` too. Returns how many were added.
    pub fn add_all_absent<I: IntoIterator<Item = T>>(&self, items: I) -> usize {
        // drain the caller's iterator before locking; only `T::eq`/`T::clone` run under the lock
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return 0;
        }

        self.update(|current| {
            let mut next = current.to_vec();
            for item in items {
                if !next.contains(&item) {
                    next.push(item);
                }
            }
            let added = next.len() - current.len();
            ((added > 0).then_some(next), added)
        })
    }

    /// Remove the first element equal to `item`. Returns whether one was found.
    pub fn remove(&self, item: &T) -> bool {
        self.update(|current| match current.iter().position(|x| x == item) {
            Some(index) => {
                let mut next = Vec::with_capacity(current.len() - 1);
                next.extend_from_slice(&current[..index]);
                next.extend_from_slice(&current[index + 1..]);
                (Some(next), true)
            }
            None => (None, false),
        })
    }

    /// Remove every element that is also in `items`. Returns whether anything was removed.
    pub fn remove_all<I>(&self, items: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let items: Vec<I::Item> = items.into_iter().collect();
        self.retain_where(|x| !items.iter().any(|y| <I::Item as Borrow<T>>::borrow(y) == x))
    }

    /// Keep only the elements that are also in `items`. Returns whether anything was removed.
    pub fn retain_all<I>(&self, items: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let items: Vec<I::Item> = items.into_iter().collect();
        self.retain_where(|x| items.iter().any(|y| <I::Item as Borrow<T>>::borrow(y) == x))
    }

    fn retain_where(&self, mut keep: impl FnMut(&T) -> bool) -> bool {
        self.update(|current| {
            let next: Vec<T> = current.iter().filter(|x| keep(x)).cloned().collect();
            if next.len() == current.len() {
                (None, false)
            } else {
                (Some(next), true)
            }
        })
    }
}

impl<T> Default for CopyOnWriteVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for CopyOnWriteVec<T> {
    /// The clone starts out sharing the current snapshot; the two diverge on the next write.
    fn clone(&self) -> Self {
        Self {
            current: ArcSwap::new(self.snapshot()),
            write_lock: Mutex::new(()),
        }
    }
}

impl<T> FromIterator<T> for CopyOnWriteVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> From<Vec<T>> for CopyOnWriteVec<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T: fmt::Debug> fmt::Debug for CopyOnWriteVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.current.load().iter()).finish()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for CopyOnWriteVec<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(self.current.load().as_slice(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for CopyOnWriteVec<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Vec<T> as serde::Deserialize<'de>>::deserialize(deserializer).map(Self::from_vec)
    }
}
