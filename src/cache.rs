//! Fragment resolution caching.
//!
//! [`RouteCache`] remembers which route a normalized fragment resolved to,
//! together with its captured arguments, so repeat navigations skip the
//! pattern walk. It is gated behind the `cache` feature and backed by the
//! [`lru`] crate.
//!
//! The router clears the cache whenever its route table changes. Lookups and
//! invalidations are counted in [`CacheStats`].
//!
//! # Examples
//!
//! ```
//! use learners_router::{RouteCache, RouteTable};
//!
//! let table = RouteTable::learners();
//! let mut cache = RouteCache::new();
//!
//! let (index, captures) = table.resolve("edx").unwrap();
//! cache.insert("edx".to_string(), index, captures);
//!
//! assert_eq!(cache.get("edx").map(|(index, _)| index), Some(1));
//! assert_eq!(cache.stats().hits, 1);
//! ```

use crate::matching::PatternMatch;
use crate::{debug_log, trace_log};
use lru::LruCache;
use std::num::NonZeroUsize;

/// Counters tracking cache hit/miss rates and invalidations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: usize,
    /// Lookups that had to resolve the fragment.
    pub misses: usize,
    /// Number of full invalidations (via [`RouteCache::clear`]).
    pub invalidations: usize,
}

impl CacheStats {
    /// Return the hit rate as a value in `0.0..=1.0`.
    ///
    /// Returns `0.0` if nothing has been looked up yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone)]
struct CachedResolution {
    route_index: usize,
    captures: PatternMatch,
}

/// LRU cache from normalized fragment to resolved route.
#[derive(Debug)]
pub struct RouteCache {
    entries: LruCache<String, CachedResolution>,
    stats: CacheStats,
}

impl RouteCache {
    /// Default number of fragments kept.
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Create a cache with [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY).
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a cache holding up to `capacity` fragments.
    ///
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    /// Look up a fragment, returning the route index and captures.
    ///
    /// Updates hit/miss stats.
    pub fn get(&mut self, fragment: &str) -> Option<(usize, PatternMatch)> {
        if let Some(entry) = self.entries.get(fragment) {
            self.stats.hits += 1;
            trace_log!("Route cache hit for '{}'", fragment);
            Some((entry.route_index, entry.captures.clone()))
        } else {
            self.stats.misses += 1;
            trace_log!("Route cache miss for '{}'", fragment);
            None
        }
    }

    /// Remember how a fragment resolved.
    pub fn insert(&mut self, fragment: String, route_index: usize, captures: PatternMatch) {
        self.entries.push(
            fragment,
            CachedResolution {
                route_index,
                captures,
            },
        );
    }

    /// Drop every entry and count one invalidation.
    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        self.stats.invalidations += 1;
        debug_log!(
            "Route cache cleared: {} entries removed ({} total invalidations, hit rate: {:.1}%)",
            removed,
            self.stats.invalidations,
            self.stats.hit_rate() * 100.0
        );
    }

    /// Return a reference to the current statistics.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Reset all counters to zero.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Number of cached fragments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached fragments.
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RouteCache {
    fn clone(&self) -> Self {
        Self {
            entries: LruCache::new(self.entries.cap()),
            stats: self.stats.clone(),
        }
    }
}
