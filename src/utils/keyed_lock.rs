use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One async mutex per key, created on demand and dropped once nobody holds
/// or waits on it.
#[derive(Debug, Default)]
pub struct KeyedLock {
    entries: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

pub struct KeyedGuard<'a> {
    owner: &'a KeyedLock,
    key: String,
    _guard: OwnedMutexGuard<()>,
}

impl KeyedLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, key: &str) -> KeyedGuard<'_> {
        let entry = self
            .entries()
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone();

        KeyedGuard {
            owner: self,
            key: key.to_string(),
            _guard: entry.lock_owned().await,
        }
    }

    /// Number of keys currently locked or contended.
    pub fn active_keys(&self) -> usize {
        self.entries().len()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Arc<AsyncMutex<()>>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for KeyedGuard<'_> {
    fn drop(&mut self) {
        let mut entries = self.owner.entries();
        // The map and this guard hold two references; more means a waiter.
        let idle = entries
            .get(&self.key)
            .map(|entry| Arc::strong_count(entry) <= 2)
            .unwrap_or(false);
        if idle {
            entries.remove(&self.key);
        }
    }
}
