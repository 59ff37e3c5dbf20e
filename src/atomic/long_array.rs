use std::fmt;

use log::debug;

use crate::error::{Error, Result};
use crate::spinlock_mutex::Mutex;

/// The longest array whose buffer still fits in `isize::MAX` bytes.
const MAX_LENGTH: usize = isize::MAX as usize / size_of::<i64>();

/// An `i64` array in which elements may be updated atomically.
///
/// Every operation, reads included, runs under one lock for the whole array. That makes
/// each call indivisible, makes a `set` visible to every later `get` on any thread, and in
/// fact totally orders all operations on the array, not just those on the same index.
///
/// Arithmetic wraps on overflow like two's-complement hardware would.
///
/// ```
/// use backport_concurrent::AtomicLongArray;
///
/// let counters = AtomicLongArray::new(3)?;
/// counters.set(1, 10)?;
/// assert_eq!(counters.get_and_add(1, 5)?, 10);
/// assert_eq!(counters.get(1)?, 15);
/// assert_eq!(counters.to_string(), "[0, 15, 0]");
/// # Ok::<(), backport_concurrent::Error>(())
/// ```
pub struct AtomicLongArray {
    // never changes, so bounds checks don't need the lock
    length: usize,
    values: Mutex<Box<[i64]>>,
}

impl AtomicLongArray {
    /// A zero-filled array of `length` elements.
    ///
    /// Fails with [`Error::InvalidArgument`] if the buffer could never be allocated.
    pub fn new(length: usize) -> Result<Self> {
        if length > MAX_LENGTH {
            return Err(Error::InvalidArgument(format!(
                "array length {length} exceeds the maximum of {MAX_LENGTH}"
            )));
        }
        Ok(Self::from_boxed(vec![0; length].into_boxed_slice()))
    }

    fn from_boxed(values: Box<[i64]>) -> Self {
        debug!("allocated atomic long array of length {}", values.len());
        Self { length: values.len(), values: Mutex::new(values) }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn get(&self, i: usize) -> Result<i64> {
        self.with_element(i, |v| *v)
    }

    pub fn set(&self, i: usize, new_value: i64) -> Result<()> {
        self.with_element(i, |v| *v = new_value)
    }

    /// Set element `i` to `new_value`, returning the old value.
    pub fn get_and_set(&self, i: usize, new_value: i64) -> Result<i64> {
        self.with_element(i, |v| std::mem::replace(v, new_value))
    }

    /// Set element `i` to `update` if it currently equals `expect`.
    ///
    /// Returns `false` if the element held some other value, leaving it unchanged.
    pub fn compare_and_set(&self, i: usize, expect: i64, update: i64) -> Result<bool> {
        self.with_element(i, |v| {
            let success = *v == expect;
            if success {
                *v = update;
            }
            success
        })
    }

    /// Like [`AtomicLongArray::compare_and_set`], but may fail spuriously.
    ///
    /// The current implementation never does, since it holds a lock. Callers must still
    /// treat a `false` as "try again" rather than "the value differed", so they keep
    /// working if this is ever backed by a hardware compare-exchange.
    pub fn weak_compare_and_set(&self, i: usize, expect: i64, update: i64) -> Result<bool> {
        self.compare_and_set(i, expect, update)
    }

    /// Increment element `i` by one, returning the previous value.
    pub fn get_and_increment(&self, i: usize) -> Result<i64> {
        self.get_and_add(i, 1)
    }

    /// Decrement element `i` by one, returning the previous value.
    pub fn get_and_decrement(&self, i: usize) -> Result<i64> {
        self.get_and_add(i, -1)
    }

    /// Add `delta` to element `i`, returning the previous value.
    pub fn get_and_add(&self, i: usize, delta: i64) -> Result<i64> {
        self.with_element(i, |v| {
            let old = *v;
            *v = old.wrapping_add(delta);
            old
        })
    }

    /// Increment element `i` by one, returning the updated value.
    pub fn increment_and_get(&self, i: usize) -> Result<i64> {
        self.add_and_get(i, 1)
    }

    /// Decrement element `i` by one, returning the updated value.
    pub fn decrement_and_get(&self, i: usize) -> Result<i64> {
        self.add_and_get(i, -1)
    }

    /// Add `delta` to element `i`, returning the updated value.
    pub fn add_and_get(&self, i: usize, delta: i64) -> Result<i64> {
        self.with_element(i, |v| {
            *v = v.wrapping_add(delta);
            *v
        })
    }

    /// Every element, read in one locked step.
    pub fn to_vec(&self) -> Vec<i64> {
        self.values.with_lock(|values| values.to_vec())
    }

    fn with_element<R>(&self, i: usize, f: impl FnOnce(&mut i64) -> R) -> Result<R> {
        if i >= self.length {
            return Err(Error::IndexOutOfBounds { index: i, length: self.length });
        }
        Ok(self.values.with_lock(|values| f(&mut values[i])))
    }
}

impl From<&[i64]> for AtomicLongArray {
    fn from(values: &[i64]) -> Self {
        Self::from_boxed(values.into())
    }
}

impl From<Vec<i64>> for AtomicLongArray {
    fn from(values: Vec<i64>) -> Self {
        Self::from_boxed(values.into_boxed_slice())
    }
}

impl Clone for AtomicLongArray {
    fn clone(&self) -> Self {
        Self::from(self.to_vec())
    }
}

/// Renders as `[1, 2, 3]`, from a single snapshot so no two elements come from different moments.
impl fmt::Display for AtomicLongArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // copy out first: the lock is never held while writing to `f`
        let values = self.to_vec();
        write!(f, "[")?;
        for (n, v) in values.iter().enumerate() {
            if n > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

impl fmt::Debug for AtomicLongArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicLongArray").field(&self.to_vec()).finish()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AtomicLongArray {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.to_vec(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AtomicLongArray {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Vec<i64> as serde::Deserialize<'de>>::deserialize(deserializer).map(Self::from)
    }
}
