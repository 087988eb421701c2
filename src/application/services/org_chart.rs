//! Org chart service
//!
//! Builds the sample hierarchy and produces revenue reports.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::domain::{DomainError, NodeId, OrgChart, RevenueSource};

/// Per-employee revenue figures plus their total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueReport {
    /// (employee name, revenue), in pre-order
    pub entries: Vec<(String, u64)>,
    pub total: u64,
}

/// The demonstration hierarchy.
#[derive(Debug)]
pub struct SampleChart {
    pub chart: OrgChart,
    pub root: NodeId,
    pub officers: NodeId,
    pub engineering: NodeId,
}

/// Service for aggregating over org charts.
pub struct OrgChartService {
    revenue: Arc<dyn RevenueSource>,
}

impl OrgChartService {
    pub fn new(revenue: Arc<dyn RevenueSource>) -> Self {
        Self { revenue }
    }

    /// Build `Company` with two departments:
    /// `Officers` (CEO, CTO) and `Engineering` (Alice, Bob).
    #[instrument(level = "debug", skip(self))]
    pub fn sample_chart(&self) -> ApplicationResult<SampleChart> {
        let mut chart = OrgChart::new();
        let root = chart.add_department("Company");

        let officers = chart.add_department("Officers");
        for name in ["CEO", "CTO"] {
            let employee = chart.add_employee(name);
            chart.add_child(officers, employee)?;
        }

        let engineering = chart.add_department("Engineering");
        for name in ["Alice", "Bob"] {
            let employee = chart.add_employee(name);
            chart.add_child(engineering, employee)?;
        }

        chart.add_child(root, officers)?;
        chart.add_child(root, engineering)?;
        debug!("sample chart built with {} nodes", chart.len());

        Ok(SampleChart {
            chart,
            root,
            officers,
            engineering,
        })
    }

    /// Aggregate revenue for `id`; every employee is sampled afresh.
    pub fn revenue(&self, chart: &OrgChart, id: NodeId) -> ApplicationResult<u64> {
        Ok(chart.revenue(id, self.revenue.as_ref())?)
    }

    /// Sample every employee under `root` exactly once.
    ///
    /// Unlike [`OrgChartService::revenue`], the total is consistent with the
    /// listed entries.
    #[instrument(level = "debug", skip(self, chart))]
    pub fn report(&self, chart: &OrgChart, root: NodeId) -> ApplicationResult<RevenueReport> {
        let entries: Vec<(String, u64)> = chart
            .leaf_names(root)?
            .into_iter()
            .map(|name| {
                let amount = self.revenue.sample(&name);
                (name, amount)
            })
            .collect();
        let total = entries
            .iter()
            .try_fold(0u64, |total, (_, amount)| total.checked_add(*amount))
            .ok_or_else(|| DomainError::RevenueOverflow {
                scope: chart.node(root).map(|n| n.name.clone()).unwrap_or_default(),
            })?;

        Ok(RevenueReport { entries, total })
    }
}
