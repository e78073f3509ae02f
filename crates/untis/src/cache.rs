//! Bounded, time-expiring cache for raw RPC responses.

use indexmap::IndexMap;
use std::time::{Duration, Instant};

/// Default number of responses kept before the oldest is evicted.
pub const DEFAULT_MAX_ENTRIES: usize = 20;

/// Default time-to-live of a cached response, in minutes.
pub const DEFAULT_TTL_MINUTES: u64 = 30;

/// Converts a TTL in minutes, saturating instead of overflowing.
pub fn ttl_from_minutes(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60))
}

/// A cached raw response with its creation time.
#[derive(Clone)]
struct CacheEntry {
    raw_response: String,
    created_at: Instant,
}

/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// Entry found and still fresh
    Hit(String),
    /// Entry found but older than the TTL; it has been removed
    Expired,
    /// No entry for this key
    Miss,
}

/// In-memory response cache keyed by the serialized request.
///
/// Eviction is insertion-order FIFO: when the cache grows past its maximum,
/// the oldest inserted entry is dropped regardless of how recently it was read.
pub struct ResponseCache {
    /// Kept in insertion order, oldest first
    entries: IndexMap<String, CacheEntry>,
    max_entries: usize,
    ttl: Duration,
}

impl ResponseCache {
    /// Creates a new cache with the given capacity and TTL.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: IndexMap::new(),
            max_entries,
            ttl,
        }
    }

    /// Creates a cache with 20 entries and a 30-minute TTL.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, ttl_from_minutes(DEFAULT_TTL_MINUTES))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn set_ttl(&mut self, ttl: Duration) {
        self.ttl = ttl;
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Looks up a key, removing it if it has expired.
    pub fn lookup(&mut self, key: &str) -> CacheLookup {
        self.lookup_at(key, Instant::now())
    }

    fn lookup_at(&mut self, key: &str, now: Instant) -> CacheLookup {
        let Some(entry) = self.entries.get(key) else {
            return CacheLookup::Miss;
        };

        if now.saturating_duration_since(entry.created_at) > self.ttl {
            self.entries.shift_remove(key);
            CacheLookup::Expired
        } else {
            CacheLookup::Hit(entry.raw_response.clone())
        }
    }

    /// Returns the cached response for `key` if it exists and hasn't expired.
    pub fn get(&mut self, key: &str) -> Option<String> {
        match self.lookup(key) {
            CacheLookup::Hit(raw) => Some(raw),
            CacheLookup::Expired | CacheLookup::Miss => None,
        }
    }

    /// Stores a response, evicting the oldest entry if the cache is full.
    pub fn put(&mut self, key: String, raw_response: String) {
        self.put_at(key, raw_response, Instant::now());
    }

    fn put_at(&mut self, key: String, raw_response: String, now: Instant) {
        // Re-inserting a key makes it the newest entry
        self.entries.shift_remove(&key);
        self.entries.insert(
            key,
            CacheEntry {
                raw_response,
                created_at: now,
            },
        );

        while self.entries.len() > self.max_entries {
            self.entries.shift_remove_index(0);
        }
    }

    /// Clears all entries from the cache.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of entries in the cache (including expired ones).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::with_defaults()
    }
}
