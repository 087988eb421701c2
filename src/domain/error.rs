//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent structural violations of the org chart.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found in org chart: {0}")]
    NodeNotFound(String),

    #[error("cycle detected: {child} cannot be placed under its own descendant {parent}")]
    CycleDetected { parent: String, child: String },

    #[error("revenue total overflows u64 in {scope}")]
    RevenueOverflow { scope: String },

    #[error("invalid revenue range: min {min} exceeds max {max}")]
    InvalidRevenueRange { min: u64, max: u64 },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
