//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{CachingDownloader, OrgChartService};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::RevenueSource;
use crate::infrastructure::traits::{Downloader, RandomRevenue, SimulatedDownloader};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Revenue generator for employee nodes
    pub revenue: Arc<dyn RevenueSource>,

    /// Real subject behind the caching proxy
    pub downloader: Arc<dyn Downloader>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> ApplicationResult<Self> {
        let range = settings.revenue_range()?;
        let revenue: Arc<dyn RevenueSource> = match settings.revenue.seed {
            Some(seed) => Arc::new(RandomRevenue::seeded(range, seed)),
            None => Arc::new(RandomRevenue::new(range)),
        };
        let downloader = Arc::new(SimulatedDownloader::new(
            settings.download.content_prefix.clone(),
        ));

        Ok(Self::with_deps(settings, revenue, downloader))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        revenue: Arc<dyn RevenueSource>,
        downloader: Arc<dyn Downloader>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            revenue,
            downloader,
        }
    }

    pub fn org_chart_service(&self) -> OrgChartService {
        OrgChartService::new(Arc::clone(&self.revenue))
    }

    /// A fresh proxy with an empty cache.
    pub fn caching_downloader(&self) -> CachingDownloader {
        CachingDownloader::new(Arc::clone(&self.downloader))
    }
}
