//! Caching proxy in front of a [`Downloader`]
//!
//! Repeated requests for the same key are answered from an in-memory cache;
//! the wrapped downloader runs at most once per key for the lifetime of the
//! proxy. The cache is unbounded and never evicts.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};

use crate::infrastructure::traits::Downloader;

/// Whether a request was answered from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Miss,
}

impl fmt::Display for CacheOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheOutcome::Hit => write!(f, "cache read"),
            CacheOutcome::Miss => write!(f, "downloaded"),
        }
    }
}

/// Result of a single proxied request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub content: Option<String>,
    pub outcome: CacheOutcome,
}

/// Hit and miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

impl CacheStats {
    pub fn requests(&self) -> usize {
        self.hits + self.misses
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, Option<String>>,
    stats: CacheStats,
}

/// Memoizing proxy exposing the same interface as the real downloader.
pub struct CachingDownloader {
    inner: Arc<dyn Downloader>,
    state: Mutex<CacheState>,
}

impl CachingDownloader {
    pub fn new(inner: Arc<dyn Downloader>) -> Self {
        Self {
            inner,
            state: Mutex::new(CacheState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        // Cache entries are only inserted after a completed fetch, so a
        // poisoned lock still guards consistent data
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Answer `key` from the cache, or delegate and remember the result.
    ///
    /// The lock is held across lookup and insert, so concurrent callers
    /// sharing one proxy still trigger at most one download per key.
    pub fn fetch(&self, key: &str) -> Fetched {
        let mut state = self.state();

        if let Some(cached) = state.entries.get(key) {
            let content = cached.clone();
            state.stats.hits += 1;
            info!("cache read: {}", key);
            return Fetched {
                content,
                outcome: CacheOutcome::Hit,
            };
        }

        debug!("cache miss: {}", key);
        let content = self.inner.download(key);
        state.entries.insert(key.to_string(), content.clone());
        state.stats.misses += 1;
        Fetched {
            content,
            outcome: CacheOutcome::Miss,
        }
    }

    pub fn is_cached(&self, key: &str) -> bool {
        self.state().entries.contains_key(key)
    }

    /// Number of distinct keys seen so far.
    pub fn len(&self) -> usize {
        self.state().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.state().stats
    }
}

impl Downloader for CachingDownloader {
    fn download(&self, key: &str) -> Option<String> {
        self.fetch(key).content
    }
}

impl fmt::Debug for CachingDownloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("CachingDownloader")
            .field("entries", &state.entries.len())
            .field("stats", &state.stats)
            .finish()
    }
}
