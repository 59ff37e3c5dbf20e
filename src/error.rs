use thiserror::Error;

/// Everything that can go wrong when using the collections in this crate.
///
/// Errors are always returned to the caller at the point of the offending call;
/// an operation that fails leaves its collection exactly as it was.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A "require" style queue operation (`remove`, `element`) found the queue empty.
    #[error("no such element: the queue is empty")]
    NoSuchElement,

    /// `Queue::add` was refused by a bounded queue.
    #[error("queue full (capacity {capacity})")]
    QueueFull { capacity: usize },

    #[error("index {index} out of bounds for length {length}")]
    IndexOutOfBounds { index: usize, length: usize },

    /// A constructor was handed an argument it can't build from.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
