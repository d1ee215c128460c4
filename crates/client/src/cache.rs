//! Read-through cache with per-entry expiry.
//!
//! Expiry is measured on `tokio::time::Instant`, so tests drive the
//! clock with a paused runtime instead of sleeping for real.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

/// Default time-to-live for cached API responses.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, Entry<V>>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Cached value, unless expired. Expired entries are dropped on
    /// access.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() <= self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn set(&self, key: impl Into<String>, value: V) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.into(), Entry { value, stored_at: Instant::now() });
    }

    /// Drop every entry whose key starts with `prefix`.
    pub fn invalidate_prefix(&self, prefix: &str) {
        self.entries
            .lock()
            .unwrap()
            .retain(|key, _| !key.starts_with(prefix));
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
