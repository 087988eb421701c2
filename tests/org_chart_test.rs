//! Tests for the composite org chart and OrgChartService

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rstest::rstest;

use patternlab::application::services::OrgChartService;
use patternlab::application::ApplicationError;
use patternlab::domain::{DomainError, NodeId, OrgChart, RevenueRange, RevenueSource};
use patternlab::infrastructure::traits::RandomRevenue;
use patternlab::util::testing;

/// Mock revenue source returning fixed figures per employee name
struct FixedRevenue {
    by_name: HashMap<&'static str, u64>,
    fallback: u64,
    calls: AtomicUsize,
}

impl FixedRevenue {
    fn new(pairs: &[(&'static str, u64)], fallback: u64) -> Self {
        Self {
            by_name: pairs.iter().copied().collect(),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RevenueSource for FixedRevenue {
    fn sample(&self, employee: &str) -> u64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.by_name.get(employee).copied().unwrap_or(self.fallback)
    }
}

/// Officers(CEO, CTO)
fn officers_chart() -> (OrgChart, NodeId, NodeId, NodeId) {
    let mut chart = OrgChart::new();
    let officers = chart.add_department("Officers");
    let ceo = chart.add_employee("CEO");
    let cto = chart.add_employee("CTO");
    chart.add_child(officers, ceo).unwrap();
    chart.add_child(officers, cto).unwrap();
    (chart, officers, ceo, cto)
}

// ============================================================
// Revenue aggregation
// ============================================================

#[test]
fn given_officers_with_fixed_revenues_when_summing_then_returns_total() {
    testing::init_test_setup();
    // Arrange
    let (chart, officers, _, _) = officers_chart();
    let source = FixedRevenue::new(&[("CEO", 5000), ("CTO", 6000)], 0);

    // Act
    let total = chart.revenue(officers, &source).unwrap();

    // Assert
    assert_eq!(total, 11000);
    assert_eq!(source.calls(), 2);
}

#[test]
fn given_nested_departments_when_summing_then_equals_sum_of_children() {
    // Arrange
    let service = OrgChartService::new(Arc::new(FixedRevenue::new(
        &[("CEO", 5000), ("CTO", 6000), ("Alice", 1000), ("Bob", 2500)],
        0,
    )));
    let sample = service.sample_chart().unwrap();
    let chart = &sample.chart;

    // Act
    let total = service.revenue(chart, sample.root).unwrap();
    let per_child: u64 = chart
        .children(sample.root)
        .unwrap()
        .iter()
        .map(|&child| service.revenue(chart, child).unwrap())
        .sum();

    // Assert
    assert_eq!(total, 14500);
    assert_eq!(total, per_child);
    assert_eq!(service.revenue(chart, sample.engineering).unwrap(), 3500);
}

#[rstest]
#[case(1)]
#[case(42)]
#[case(9001)]
fn given_random_source_when_sampling_leaf_repeatedly_then_always_in_range(#[case] seed: u64) {
    // Arrange
    let mut chart = OrgChart::new();
    let ceo = chart.add_employee("CEO");
    let source = RandomRevenue::seeded(RevenueRange::default(), seed);

    // Act / Assert
    for _ in 0..500 {
        let value = chart.revenue(ceo, &source).unwrap();
        assert!((1000..=10999).contains(&value), "out of range: {}", value);
    }
}

#[test]
fn given_leaf_when_sampling_twice_then_regenerated_each_call() {
    // Arrange
    let mut chart = OrgChart::new();
    let ceo = chart.add_employee("CEO");
    let source = FixedRevenue::new(&[], 1234);

    // Act
    chart.revenue(ceo, &source).unwrap();
    chart.revenue(ceo, &source).unwrap();

    // Assert
    assert_eq!(source.calls(), 2, "revenue must not be cached");
}

#[test]
fn given_duplicate_child_when_summing_then_counted_twice() {
    // Arrange
    let mut chart = OrgChart::new();
    let dept = chart.add_department("Sales");
    let rep = chart.add_employee("Rep");
    chart.add_child(dept, rep).unwrap();
    chart.add_child(dept, rep).unwrap();
    let source = FixedRevenue::new(&[("Rep", 2000)], 0);

    // Act / Assert
    assert_eq!(chart.children(dept).unwrap(), &[rep, rep]);
    assert_eq!(chart.revenue(dept, &source).unwrap(), 4000);
}

// ============================================================
// Description
// ============================================================

#[test]
fn given_officers_when_describing_then_header_followed_by_children() {
    // Arrange
    let (chart, officers, _, _) = officers_chart();

    // Act
    let text = chart.describe(officers).unwrap();

    // Assert
    assert_eq!(
        text,
        "Department: Officers (2 direct reports)\nEmployee: CEO\nEmployee: CTO\n"
    );
}

#[test]
fn given_leaf_when_describing_then_single_line() {
    let (chart, _, ceo, _) = officers_chart();
    assert_eq!(chart.describe(ceo).unwrap(), "Employee: CEO\n");
}

#[test]
fn given_nested_chart_when_describing_then_line_count_composes() {
    // Arrange
    let service = OrgChartService::new(Arc::new(FixedRevenue::new(&[], 0)));
    let sample = service.sample_chart().unwrap();
    let chart = &sample.chart;

    // Act
    let root_lines = chart.describe(sample.root).unwrap().lines().count();
    let child_lines: usize = chart
        .children(sample.root)
        .unwrap()
        .iter()
        .map(|&child| chart.describe(child).unwrap().lines().count())
        .sum();

    // Assert
    assert_eq!(root_lines, 1 + child_lines);
    assert_eq!(root_lines, 7);
}

#[test]
fn given_nested_chart_when_describing_then_pre_order() {
    let service = OrgChartService::new(Arc::new(FixedRevenue::new(&[], 0)));
    let sample = service.sample_chart().unwrap();

    let text = sample.chart.describe(sample.root).unwrap();
    let names: Vec<&str> = text
        .lines()
        .map(|line| line.split(": ").nth(1).unwrap().split(" (").next().unwrap())
        .collect();

    assert_eq!(
        names,
        ["Company", "Officers", "CEO", "CTO", "Engineering", "Alice", "Bob"]
    );
}

// ============================================================
// Add / remove
// ============================================================

#[test]
fn given_department_when_adding_then_removing_then_children_restored() {
    // Arrange
    let (mut chart, officers, _, _) = officers_chart();
    let before = chart.children(officers).unwrap().to_vec();
    let cfo = chart.add_employee("CFO");

    // Act
    chart.add_child(officers, cfo).unwrap();
    chart.remove_child(officers, cfo).unwrap();

    // Assert
    assert_eq!(chart.children(officers).unwrap(), before.as_slice());
}

#[test]
fn given_duplicates_when_removing_then_only_first_occurrence_removed() {
    // Arrange
    let mut chart = OrgChart::new();
    let dept = chart.add_department("Ops");
    let a = chart.add_employee("A");
    let b = chart.add_employee("B");
    for child in [a, b, a] {
        chart.add_child(dept, child).unwrap();
    }

    // Act
    chart.remove_child(dept, a).unwrap();

    // Assert
    assert_eq!(chart.children(dept).unwrap(), &[b, a]);
}

#[test]
fn given_absent_child_when_removing_then_noop() {
    let (mut chart, officers, _, _) = officers_chart();
    let stranger = chart.add_employee("Stranger");

    chart.remove_child(officers, stranger).unwrap();

    assert_eq!(chart.children(officers).unwrap().len(), 2);
}

#[test]
fn given_leaf_when_adding_or_removing_child_then_silently_ignored() {
    // Arrange
    let (mut chart, _, ceo, cto) = officers_chart();

    // Act
    chart.add_child(ceo, cto).unwrap();
    chart.remove_child(ceo, cto).unwrap();

    // Assert
    assert!(chart.children(ceo).unwrap().is_empty());
    assert_eq!(chart.describe(ceo).unwrap(), "Employee: CEO\n");
}

#[test]
fn given_removed_node_when_readding_then_still_usable() {
    let (mut chart, officers, ceo, cto) = officers_chart();

    chart.remove_child(officers, ceo).unwrap();
    chart.add_child(officers, ceo).unwrap();

    assert_eq!(chart.children(officers).unwrap(), &[cto, ceo]);
}

// ============================================================
// Structural errors
// ============================================================

#[test]
fn given_ancestor_when_adding_under_descendant_then_cycle_detected() {
    // Arrange
    let service = OrgChartService::new(Arc::new(FixedRevenue::new(&[], 0)));
    let mut sample = service.sample_chart().unwrap();
    let before = sample.chart.children(sample.officers).unwrap().to_vec();

    // Act
    let result = sample.chart.add_child(sample.officers, sample.root);

    // Assert
    assert!(matches!(result, Err(DomainError::CycleDetected { .. })));
    assert_eq!(
        sample.chart.children(sample.officers).unwrap(),
        before.as_slice()
    );
}

#[test]
fn given_deep_chain_when_attaching_employees_and_ancestor_then_only_ancestor_rejected() {
    // Arrange
    let mut chart = OrgChart::new();
    let top = chart.add_department("Level0");
    let mut bottom = top;
    for level in 1..50 {
        let dept = chart.add_department(format!("Level{}", level));
        chart.add_child(bottom, dept).unwrap();
        bottom = dept;
    }

    // Act
    for name in ["A", "B", "C"] {
        let employee = chart.add_employee(name);
        chart.add_child(bottom, employee).unwrap();
    }
    let result = chart.add_child(bottom, top);

    // Assert
    assert!(matches!(result, Err(DomainError::CycleDetected { .. })));
    assert_eq!(chart.children(bottom).unwrap().len(), 3);
    assert_eq!(chart.depth(top).unwrap(), 51);
    assert_eq!(chart.leaf_names(top).unwrap(), vec!["A", "B", "C"]);
}

#[test]
fn given_handle_from_other_chart_when_querying_then_node_not_found() {
    // Arrange
    let mut other = OrgChart::new();
    other.add_employee("X");
    let foreign = other.add_employee("Y");
    let chart = OrgChart::new();

    // Act
    let result = chart.describe(foreign);

    // Assert
    assert!(matches!(result, Err(DomainError::NodeNotFound(_))));
}

// ============================================================
// Inspection and reporting
// ============================================================

#[test]
fn given_sample_chart_when_inspecting_then_depth_and_leaves_match() {
    let service = OrgChartService::new(Arc::new(FixedRevenue::new(&[], 0)));
    let sample = service.sample_chart().unwrap();

    assert_eq!(sample.chart.len(), 7);
    assert_eq!(sample.chart.depth(sample.root).unwrap(), 3);
    assert_eq!(
        sample.chart.leaf_names(sample.root).unwrap(),
        vec!["CEO", "CTO", "Alice", "Bob"]
    );
}

#[test]
fn given_sample_chart_when_reporting_then_total_matches_entries() {
    // Arrange
    let source = Arc::new(FixedRevenue::new(&[("CEO", 5000), ("CTO", 6000)], 1000));
    let service = OrgChartService::new(source.clone());
    let sample = service.sample_chart().unwrap();

    // Act
    let report = service.report(&sample.chart, sample.officers).unwrap();

    // Assert
    assert_eq!(
        report.entries,
        vec![("CEO".to_string(), 5000), ("CTO".to_string(), 6000)]
    );
    assert_eq!(report.total, 11000);
    assert_eq!(source.calls(), 2, "each employee sampled exactly once");
}

#[test]
fn given_saturated_revenues_when_summing_then_overflow_reported() {
    // Arrange
    let service = OrgChartService::new(Arc::new(FixedRevenue::new(&[], u64::MAX)));
    let sample = service.sample_chart().unwrap();

    // Act
    let revenue = service.revenue(&sample.chart, sample.root);
    let report = service.report(&sample.chart, sample.root);

    // Assert
    assert!(matches!(
        revenue,
        Err(ApplicationError::Domain(DomainError::RevenueOverflow { .. }))
    ));
    assert!(matches!(
        report,
        Err(ApplicationError::Domain(DomainError::RevenueOverflow { .. }))
    ));
}

#[test]
fn given_single_saturated_employee_when_summing_then_no_overflow() {
    let mut chart = OrgChart::new();
    let dept = chart.add_department("Solo");
    let employee = chart.add_employee("Max");
    chart.add_child(dept, employee).unwrap();
    let source = FixedRevenue::new(&[], u64::MAX);

    assert_eq!(chart.revenue(dept, &source).unwrap(), u64::MAX);
}
