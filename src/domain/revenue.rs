//! Revenue generation boundary for employee nodes.

use std::ops::RangeInclusive;

use crate::domain::error::{DomainError, DomainResult};

/// Lowest daily revenue an employee can report.
pub const DEFAULT_MIN_REVENUE: u64 = 1000;
/// Highest daily revenue an employee can report.
pub const DEFAULT_MAX_REVENUE: u64 = 10999;

/// Source of per-employee revenue figures.
///
/// Every call produces a fresh figure: revenue models a variable daily value
/// and is never cached by the org chart.
pub trait RevenueSource: Send + Sync {
    /// Produce a revenue figure for the named employee.
    fn sample(&self, employee: &str) -> u64;
}

/// Inclusive bounds for generated revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenueRange {
    min: u64,
    max: u64,
}

impl Default for RevenueRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_REVENUE,
            max: DEFAULT_MAX_REVENUE,
        }
    }
}

impl RevenueRange {
    pub fn new(min: u64, max: u64) -> DomainResult<Self> {
        if min > max {
            return Err(DomainError::InvalidRevenueRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn as_range(&self) -> RangeInclusive<u64> {
        self.min..=self.max
    }
}
