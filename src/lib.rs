#![deny(unsafe_op_in_unsafe_fn)]

// errors shared by everything below
pub mod error;

// concurrency primitives
pub mod spinlock_mutex;

// the queue contract and plain single-threaded implementations of it
pub mod queue;

// concurrent data structures
pub mod cow;
pub mod atomic;

pub use atomic::AtomicLongArray;
pub use cow::{CopyOnWriteSet, CopyOnWriteVec, Snapshot};
pub use error::{Error, Result};
pub use queue::{FifoQueue, LifoQueue, PriorityQueue, Queue};

#[cfg(test)]
pub(crate) fn init_test_logging() {
    use simplelog::*;
    // every test calls this, only the first one gets to install the logger
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_installs_once() {
        init_test_logging();
        init_test_logging();
        assert!(log::log_enabled!(log::Level::Trace));

        // lifecycle records go through the installed logger without trouble
        let set: CopyOnWriteSet<_> = [1, 1, 2].into_iter().collect();
        set.add(3);
        assert_eq!(AtomicLongArray::new(2).unwrap().len(), 2);
    }
}
