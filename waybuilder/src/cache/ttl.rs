//! Time-to-live expiry on top of [`LruCache`].
//!
//! Expiry is lazy: there is no background timer, so every lookup first
//! sweeps out entries older than the configured lifetime.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use tracing::debug;

use super::lru::LruCache;

/// A cached value together with the moment it was stored.
#[derive(Debug, Clone)]
pub struct Stamped<V> {
    pub value: V,
    pub inserted_at: Instant,
}

/// LRU cache whose entries also expire after a fixed lifetime.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: LruCache<K, Stamped<V>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            entries: LruCache::new(capacity),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Number of stored entries, including any not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry whose age at `now` exceeds the lifetime.
    ///
    /// Expired keys are collected first and erased afterwards, so the
    /// recency list is never modified while it is being walked.
    /// Returns the number of entries removed.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let expired: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, stamped)| now.saturating_duration_since(stamped.inserted_at) > self.ttl)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.erase(key);
        }

        if !expired.is_empty() {
            debug!(removed = expired.len(), "swept expired cache entries");
        }
        expired.len()
    }

    /// Sweep, then look up `key` as of `now`.
    pub fn get_at(&mut self, key: &K, now: Instant) -> Option<V> {
        self.sweep(now);
        self.entries.get(key).map(|stamped| stamped.value)
    }

    /// Sweep, then look up `key` using the current time.
    pub fn get(&mut self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Store `value` stamped with `now`. Returns `false` if `key` exists.
    pub fn insert_at(&mut self, key: K, value: V, now: Instant) -> bool {
        self.entries.insert(
            key,
            Stamped {
                value,
                inserted_at: now,
            },
        )
    }

    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.insert_at(key, value, Instant::now())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains(key)
    }

    pub fn erase(&mut self, key: &K) -> Option<V> {
        self.entries.erase(key).map(|stamped| stamped.value)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Return the cached value or run `produce` and cache what it returns.
    ///
    /// Producer errors are handed back untouched and nothing is cached.
    pub fn get_or_try_insert_with<E, F>(&mut self, key: K, now: Instant, produce: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get_at(&key, now) {
            return Ok(value);
        }

        let value = produce()?;
        self.insert_at(key, value.clone(), now);
        Ok(value)
    }

    /// Iterate over stored entries in recency order without promoting them.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Stamped<V>)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(60 * 60);
    const SECOND: Duration = Duration::from_secs(1);

    fn cache(capacity: usize) -> TtlCache<String, u32> {
        TtlCache::new(NonZeroUsize::new(capacity).unwrap(), 4 * HOUR)
    }

    #[test]
    fn entry_expires_after_ttl() {
        let t = Instant::now();
        let mut c = cache(10);
        c.insert_at("route".into(), 7, t);

        assert_eq!(c.get_at(&"route".into(), t + 4 * HOUR - SECOND), Some(7));
        assert_eq!(c.get_at(&"route".into(), t + 4 * HOUR + SECOND), None);
        assert!(c.is_empty());
    }

    #[test]
    fn entry_at_exact_ttl_is_kept() {
        let t = Instant::now();
        let mut c = cache(10);
        c.insert_at("k".into(), 1, t);
        assert_eq!(c.get_at(&"k".into(), t + 4 * HOUR), Some(1));
    }

    #[test]
    fn sweep_removes_only_expired() {
        let t = Instant::now();
        let mut c = cache(10);
        c.insert_at("old".into(), 1, t);
        c.insert_at("new".into(), 2, t + 3 * HOUR);

        let removed = c.sweep(t + 5 * HOUR);
        assert_eq!(removed, 1);
        assert!(!c.contains(&"old".into()));
        assert!(c.contains(&"new".into()));
    }

    #[test]
    fn sweep_can_empty_the_whole_cache() {
        let t = Instant::now();
        let mut c = cache(5);
        for i in 0..5 {
            c.insert_at(format!("k{i}"), i, t);
        }
        assert_eq!(c.sweep(t + 5 * HOUR), 5);
        assert!(c.is_empty());
        assert!(c.insert_at("fresh".into(), 9, t + 5 * HOUR));
    }

    #[test]
    fn get_or_try_insert_caches_success() {
        let t = Instant::now();
        let mut c = cache(2);
        let mut calls = 0;

        let v: Result<u32, ()> = c.get_or_try_insert_with("k".into(), t, || {
            calls += 1;
            Ok(5)
        });
        assert_eq!(v, Ok(5));

        let v: Result<u32, ()> = c.get_or_try_insert_with("k".into(), t + SECOND, || {
            calls += 1;
            Ok(6)
        });
        assert_eq!(v, Ok(5));
        assert_eq!(calls, 1);
    }

    #[test]
    fn get_or_try_insert_does_not_cache_errors() {
        let t = Instant::now();
        let mut c = cache(2);
        let v: Result<u32, &str> = c.get_or_try_insert_with("k".into(), t, || Err("offline"));
        assert_eq!(v, Err("offline"));
        assert!(c.is_empty());
    }

    #[test]
    fn expired_entry_is_refetched() {
        let t = Instant::now();
        let mut c = cache(2);
        let _: Result<u32, ()> = c.get_or_try_insert_with("k".into(), t, || Ok(1));
        let v: Result<u32, ()> = c.get_or_try_insert_with("k".into(), t + 5 * HOUR, || Ok(2));
        assert_eq!(v, Ok(2));
    }

    #[test]
    fn capacity_still_bounds_entries() {
        let t = Instant::now();
        let mut c = cache(2);
        c.insert_at("a".into(), 1, t);
        c.insert_at("b".into(), 2, t);
        c.insert_at("c".into(), 3, t);
        assert_eq!(c.len(), 2);
        assert!(!c.contains(&"a".into()));
    }
}
