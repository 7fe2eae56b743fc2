//! Route search client with an in-memory result cache.
//!
//! Searches are keyed by `origin + destination + date`. Results live in a
//! [`TtlCache`], so they are dropped when the cache is full (least recently
//! used first) or once they are older than the configured lifetime.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::domain::RouteKey;
use crate::rasp::{RaspApi, RaspError, RouteQuery, RouteSearch};

use super::CacheConfig;
use super::ttl::TtlCache;

/// Cached route search payload.
pub type RouteEntry = Arc<RouteSearch>;

/// Timetable client with route caching.
///
/// Wraps any [`RaspApi`] and caches merged route searches.
pub struct CachedRoutes<A> {
    api: A,
    cache: TtlCache<RouteKey, RouteEntry>,
    page_size: usize,
}

impl<A: RaspApi> CachedRoutes<A> {
    /// Create a new cached client.
    pub fn new(api: A, config: &CacheConfig) -> Self {
        Self {
            api,
            cache: TtlCache::new(config.max_capacity, config.ttl),
            page_size: config.page_size,
        }
    }

    /// Get all results for a search, from the cache if available.
    pub async fn search(&mut self, query: &RouteQuery) -> Result<RouteEntry, RaspError> {
        self.search_at(query, Instant::now()).await
    }

    /// [`search`](Self::search) with an explicit clock reading.
    pub async fn search_at(
        &mut self,
        query: &RouteQuery,
        now: Instant,
    ) -> Result<RouteEntry, RaspError> {
        let key = RouteKey::new(&query.from, &query.to, query.date);

        // Try cache first
        if let Some(cached) = self.cache.get_at(&key, now) {
            debug!(%key, "route cache hit");
            return Ok(cached);
        }

        let result = self.api.search_all(query, self.page_size).await?;
        let entry = Arc::new(result);

        // Empty results are not worth keeping: the user will likely retry
        // with other points rather than repeat the same query.
        if entry.is_empty() {
            debug!(%key, "empty route result not cached");
        } else {
            self.cache.insert_at(key.clone(), Arc::clone(&entry), now);
            info!(%key, segments = entry.segment_count(), "cached route result");
        }

        Ok(entry)
    }

    /// Access the underlying client for operations that bypass the cache.
    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> usize {
        self.cache.len()
    }

    pub fn contains(&self, key: &RouteKey) -> bool {
        self.cache.contains(key)
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }
}
