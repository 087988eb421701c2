//! Application services

pub mod caching_downloader;
pub mod org_chart;

pub use caching_downloader::{CacheOutcome, CacheStats, CachingDownloader, Fetched};
pub use org_chart::{OrgChartService, RevenueReport, SampleChart};
