//! In-memory caching of route searches.
//!
//! Route searches are slow and rate limited, while users tend to repeat
//! them (checking a different date, going back to an earlier query). Results
//! are kept in a small LRU cache whose entries also expire after a fixed
//! lifetime, since timetables change.
//!
//! Nothing here is persisted: the cache starts empty on every run.

mod lru;
mod routes;
mod ttl;

use std::num::NonZeroUsize;
use std::time::Duration;

pub use lru::{Iter, LruCache};
pub use routes::{CachedRoutes, RouteEntry};
pub use ttl::{Stamped, TtlCache};

use crate::rasp::DEFAULT_PAGE_SIZE;

/// Default number of cached route searches.
pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(50) {
    Some(n) => n,
    None => unreachable!(),
};

/// Default lifetime of a cached route search: 4 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(4 * 60 * 60);

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: NonZeroUsize,

    /// Results requested per page when filling the cache.
    pub page_size: usize,
}

impl CacheConfig {
    pub fn with_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.max_capacity = capacity;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_capacity: DEFAULT_CAPACITY,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
