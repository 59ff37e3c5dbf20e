//! Copy-on-write collections.
//!
//! Readers load the currently published vector and never block. Writers serialize on a
//! spin lock, build a whole new vector and publish it, so anything a reader already
//! holds (a [`Snapshot`], an `Arc<Vec<T>>`) never changes underneath it.
//!
//! Every mutation costs a full copy: these are for small, read-mostly collections
//! such as listener lists.

mod set;
mod snapshot;
mod vec;

pub use set::CopyOnWriteSet;
pub use snapshot::Snapshot;
pub use vec::CopyOnWriteVec;
