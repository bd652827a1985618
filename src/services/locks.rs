use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// One mutex per key, created on demand and dropped once nobody waits on it.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `key`. Calls for the same key run
    /// one at a time; calls for different keys do not block each other.
    pub fn with_lock<T>(&self, key: &str, f: impl FnOnce() -> T) -> T {
        let entry = EntryRelease {
            locks: self,
            key,
            lock: self.acquire_entry(key),
        };
        let _guard = entry.lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    fn acquire_entry(&self, key: &str) -> Arc<Mutex<()>> {
        self.table()
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn release_entry(&self, key: &str, lock: &Arc<Mutex<()>>) {
        let mut table = self.table();
        // The table holds one reference and this caller the other.
        if Arc::strong_count(lock) == 2 {
            table.remove(key);
        }
    }

    fn table(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<Mutex<()>>>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Drops the key's entry on the way out of `with_lock`, unwinding included.
/// Declared before the mutex guard, so it runs after the guard is released.
struct EntryRelease<'a> {
    locks: &'a KeyedLocks,
    key: &'a str,
    lock: Arc<Mutex<()>>,
}

impl Drop for EntryRelease<'_> {
    fn drop(&mut self) {
        self.locks.release_entry(self.key, &self.lock);
    }
}
