use std::cell::UnsafeCell;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// A small test-and-test-and-set spin lock with a closure-based API.
///
/// Every collection in this crate holds its lock for exactly one operation, so the
/// critical sections are tiny and a spin lock that yields while contended is enough.
pub struct Mutex<T: ?Sized> {
    locked: AtomicBool,
    value: UnsafeCell<T>,
}

// SAFETY: the lock hands out at most one `&mut T` at a time, so sharing the mutex
//         only ever moves access to `T` between threads (like `std::sync::Mutex`).
unsafe impl<T: ?Sized + Send> Sync for Mutex<T> {}

/// Releases the lock when dropped, including while unwinding out of the closure.
struct Unlock<'a>(&'a AtomicBool);

impl Drop for Unlock<'_> {
    fn drop(&mut self) {
        // store(Release) → everything done under the lock is seen by the next load(Acquire)
        self.0.store(false, Ordering::Release);
    }
}

impl<T> Mutex<T> {
    pub const fn new(value: T) -> Self {
        Self {
            locked: AtomicBool::new(false),
            value: UnsafeCell::new(value),
        }
    }
}

impl<T: ?Sized> Mutex<T> {
    /// Run `f` with exclusive access to the value, spinning until the lock is free.
    pub fn with_lock<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        self.acquire();
        let _unlock = Unlock(&self.locked);

        // SAFETY: we hold the lock, so no other `&mut T` exists until `_unlock` drops.
        f(unsafe { &mut *self.value.get() })
    }

    /// Like [`Mutex::with_lock`], but gives up instead of waiting.
    pub fn try_with_lock<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()?;
        let _unlock = Unlock(&self.locked);

        // SAFETY: see `with_lock`.
        Some(f(unsafe { &mut *self.value.get() }))
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }

    // https://matklad.github.io/2020/01/02/spinlocks-considered-harmful.html
    fn acquire(&self) {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            // wait on a plain load so contended cores share the cache line instead of
            // bouncing it around with failed exchanges
            while self.locked.load(Ordering::Relaxed) {
                std::hint::spin_loop();
                std::thread::yield_now();
            }
        }
    }
}

impl<T: ?Sized> fmt::Debug for Mutex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutex")
            .field("locked", &self.is_locked())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    // mfw im on (strongly ordered) x86, so these say little about weakly-ordered hardware

    #[test]
    fn mutex_counter() {
        const T: usize = 32;
        const R: usize = 1000;

        let m = Arc::new(Mutex::new(0));

        let handles = (0..T)
            .map(|_| {
                let m = Arc::clone(&m);
                thread::spawn(move || {
                    for _ in 0..R {
                        m.with_lock(|v| *v += 1)
                    }
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(m.with_lock(|v| *v), T * R);
    }

    #[test]
    fn try_with_lock_fails_while_held() {
        let m = Mutex::new(vec![1, 2, 3]);
        m.with_lock(|v| {
            v.push(4);
            assert!(m.try_with_lock(|_| ()).is_none());
        });
        assert_eq!(m.try_with_lock(|v| v.len()), Some(4));
    }

    #[test]
    fn panic_releases_lock() {
        let m = Arc::new(Mutex::new(0u32));
        let m2 = Arc::clone(&m);
        let result = thread::spawn(move || {
            m2.with_lock(|v| {
                *v += 1;
                if *v == 1 {
                    panic!("boom");
                }
            })
        })
        .join();
        assert!(result.is_err());
        assert!(!m.is_locked());
        assert_eq!(m.with_lock(|v| *v), 1);
    }
}
