//! I/O boundary traits for testability
//!
//! These traits abstract the expensive or non-deterministic operations,
//! allowing services to be tested with mock implementations.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::domain::{RevenueRange, RevenueSource};

/// Fetch abstraction shared by the real downloader and the caching proxy.
pub trait Downloader: Send + Sync {
    /// Fetch the resource identified by `key`.
    ///
    /// `None` means the fetch happened but produced no content.
    fn download(&self, key: &str) -> Option<String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Stand-in for an expensive fetch: logs every invocation and returns
/// deterministic content derived from the key.
#[derive(Debug, Clone)]
pub struct SimulatedDownloader {
    content_prefix: String,
}

impl Default for SimulatedDownloader {
    fn default() -> Self {
        Self::new("content of ")
    }
}

impl SimulatedDownloader {
    pub fn new(content_prefix: impl Into<String>) -> Self {
        Self {
            content_prefix: content_prefix.into(),
        }
    }
}

impl Downloader for SimulatedDownloader {
    fn download(&self, key: &str) -> Option<String> {
        info!("downloading {}", key);
        if key.is_empty() {
            return None;
        }
        Some(format!("{}{}", self.content_prefix, key))
    }
}

/// Pseudo-random revenue in a fixed inclusive range.
#[derive(Debug)]
pub struct RandomRevenue {
    range: RevenueRange,
    rng: Mutex<StdRng>,
}

impl RandomRevenue {
    /// Seeded from OS entropy.
    pub fn new(range: RevenueRange) -> Self {
        Self::with_rng(range, StdRng::from_entropy())
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(range: RevenueRange, seed: u64) -> Self {
        Self::with_rng(range, StdRng::seed_from_u64(seed))
    }

    fn with_rng(range: RevenueRange, rng: StdRng) -> Self {
        Self {
            range,
            rng: Mutex::new(rng),
        }
    }
}

impl RevenueSource for RandomRevenue {
    fn sample(&self, _employee: &str) -> u64 {
        // A poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(self.range.as_range())
    }
}
