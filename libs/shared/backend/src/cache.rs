use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;
use serde_json::Value;
use tracing::debug;

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Short-lived memoization of successful GET bodies.
///
/// Identical lookups fired by several screens within the same second hit the
/// backend once. Entries past their TTL are dropped on access; the least
/// recently used entry is evicted once `capacity` is reached.
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<LruCache<String, (Instant, Value)>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .unwrap_or(NonZeroUsize::MIN.saturating_add(DEFAULT_CACHE_CAPACITY - 1));

        Self {
            ttl,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).cap().get()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        let expired = match entries.get(key) {
            Some((stored_at, value)) if stored_at.elapsed() < self.ttl => {
                debug!("Cache hit");
                return Some(value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            debug!("Cache entry expired");
            entries.pop(key);
        }
        None
    }

    pub fn insert(&self, key: &str, value: Value) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.put(key.to_string(), (Instant::now(), value));
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
