//! Atomically updatable numeric containers built on a coarse lock rather than
//! hardware atomics.

mod long_array;

pub use long_array::AtomicLongArray;
