//! In-memory TTL cache of API responses, backed by `DashMap`.
//!
//! Stands in for the browser session storage the contest list used to live
//! in: nothing here outlives the process.

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::error::CfStatsError;

struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// Thread-safe response cache with time-to-live expiration.
///
/// Values are stored as serialized JSON. Expired entries are evicted
/// lazily on the next lookup of the same key.
pub struct MemoryCache {
    store: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: DashMap::new(),
            ttl,
        }
    }

    /// Returns the raw JSON cached under `key`, or `None` if missing or expired.
    pub fn get(&self, key: &str) -> Option<String> {
        let entry = self.store.get(key)?;
        if Instant::now() >= entry.expires_at {
            drop(entry);
            self.store.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    /// Returns the value cached under `key`, decoded as `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CfStatsError> {
        match self.get(key) {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn set(&self, key: String, value: String) {
        self.store.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Serializes and stores `value`. A value that fails to serialize is
    /// simply not cached.
    pub fn put<T: Serialize>(&self, key: String, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.set(key, json),
            Err(e) => tracing::warn!("Not caching {}: {}", key, e),
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn clear(&self) {
        self.store.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeforces_api::types::RatingChange;

    fn change(contest_id: i64) -> RatingChange {
        RatingChange {
            contest_id,
            contest_name: format!("Round {}", contest_id),
            handle: "alice_cf".to_string(),
            rank: 10,
            rating_update_time_seconds: 0,
            old_rating: 1500,
            new_rating: 1550,
        }
    }

    #[test]
    fn typed_round_trip() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.put("user.rating:alice_cf".to_string(), &vec![change(1), change(2)]);
        let hit: Vec<RatingChange> = cache.get_as("user.rating:alice_cf").unwrap().unwrap();
        assert_eq!(hit, vec![change(1), change(2)]);
    }

    #[test]
    fn cache_miss() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        assert_eq!(cache.get("nonexistent"), None);
        let miss: Option<Vec<RatingChange>> = cache.get_as("nonexistent").unwrap();
        assert!(miss.is_none());
    }

    #[test]
    fn corrupt_entry_is_serialization_error() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("user.rating:x".to_string(), "{oops".to_string());
        let res: Result<Option<Vec<RatingChange>>, _> = cache.get_as("user.rating:x");
        assert!(matches!(res, Err(CfStatsError::Serialization(_))));
    }

    #[test]
    fn cache_expiration() {
        let cache = MemoryCache::new(Duration::from_millis(1));
        cache.set("key1".to_string(), "value1".to_string());
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(cache.get("key1"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_ttl_never_hits() {
        let cache = MemoryCache::new(Duration::ZERO);
        cache.set("key1".to_string(), "value1".to_string());
        assert_eq!(cache.get("key1"), None);
    }

    #[test]
    fn cache_clear() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("a".to_string(), "1".to_string());
        cache.set("b".to_string(), "2".to_string());
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
    }
}
