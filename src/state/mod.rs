//! Shared counter state
//!
//! Holds the single process-wide counter value mutated by the HTTP routes.
//! The counter lives in the server's shared state rather than a global, and
//! uses an atomic so concurrent increments are never lost.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// The process-wide counter, initialized to 0 at startup.
///
/// Wraps on i64 overflow; the front-end never gets close to that.
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicI64,
}

impl Counter {
    /// Create a counter starting at 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current value
    pub fn get(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }

    /// Increment by 1 and return the new value
    pub fn increment(&self) -> i64 {
        self.value.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Reset to 0
    pub fn reset(&self) {
        self.value.store(0, Ordering::SeqCst);
    }
}

/// Shared counter for use across handler tasks
pub type SharedCounter = Arc<Counter>;

/// Create a new shared counter
pub fn create_shared_counter() -> SharedCounter {
    Arc::new(Counter::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let counter = Counter::new();
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_increment_returns_new_value() {
        let counter = Counter::new();
        assert_eq!(counter.increment(), 1);
        assert_eq!(counter.increment(), 2);
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn test_reset() {
        let counter = Counter::new();
        for _ in 0..5 {
            counter.increment();
        }
        counter.reset();
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let counter = create_shared_counter();
        let mut handles = Vec::new();

        for _ in 0..8 {
            let counter = counter.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..1000 {
                    counter.increment();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.get(), 8000);
    }
}
