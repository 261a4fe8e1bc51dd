//! Per-printer serialization
//!
//! Spoolers do not promise to keep concurrent raw jobs for one printer
//! apart, so each printer gets a mutex that is held for the whole spooler
//! transaction. Jobs for different printers never wait on each other.
//!
//! Entries live only while a job holds or waits for them, so the table is
//! bounded by the number of in-flight jobs, not by the names clients send.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

/// Lock table keyed by printer name (case-insensitive)
#[derive(Clone, Default)]
pub struct PrinterLocks {
    inner: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl PrinterLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `printer`
    pub fn run_exclusive<R>(&self, printer: &str, f: impl FnOnce() -> R) -> R {
        let key = printer.trim().to_lowercase();
        // Declared first so it drops last, after the guard and the Arc
        let _evict = Evict {
            table: &self.inner,
            key: key.clone(),
        };

        let mutex = self.inner.entry(key).or_default().clone();
        let _guard = mutex.lock();
        f()
    }

    /// Number of printers with a job in flight
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Drops the table entry once nobody else references its mutex
struct Evict<'a> {
    table: &'a DashMap<String, Arc<Mutex<()>>>,
    key: String,
}

impl Drop for Evict<'_> {
    fn drop(&mut self) {
        self.table
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
