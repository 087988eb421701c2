//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod org_chart;
pub mod revenue;
pub mod tree_display;

pub use error::{DomainError, DomainResult};
pub use org_chart::{NodeId, NodeKind, OrgChart, OrgNode, PreOrderIter};
pub use revenue::{RevenueRange, RevenueSource};
pub use tree_display::OrgChartDisplay;
