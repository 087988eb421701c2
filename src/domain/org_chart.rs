//! Arena-based composite tree of employees and departments.

use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::revenue::RevenueSource;

/// Handle to a node stored in an [`OrgChart`].
///
/// Handles are only meaningful for the chart that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "node#{}.{}", slot, generation)
    }
}

/// Leaf or container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Leaf: reports its own revenue, never has children
    Employee,
    /// Container: aggregates over its ordered children
    Department,
}

/// Tree node in the arena.
#[derive(Debug, Clone)]
pub struct OrgNode {
    /// Display name of the employee or department
    pub name: String,
    pub kind: NodeKind,
    /// Child handles in insertion order, duplicates allowed
    children: Vec<NodeId>,
}

impl OrgNode {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Employee
    }
}

impl fmt::Display for OrgNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Employee => write!(f, "Employee: {}", self.name),
            NodeKind::Department => write!(
                f,
                "Department: {} ({} direct reports)",
                self.name,
                self.children.len()
            ),
        }
    }
}

/// Organizational hierarchy stored in a generational arena.
///
/// Departments own their children through handles; there are no parent
/// back-references. A chart may hold several disjoint trees and detached
/// nodes: any node can serve as the root of a query.
#[derive(Debug)]
pub struct OrgChart {
    arena: Arena<OrgNode>,
}

impl Default for OrgChart {
    fn default() -> Self {
        Self::new()
    }
}

impl OrgChart {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    pub fn add_employee(&mut self, name: impl Into<String>) -> NodeId {
        self.insert(name.into(), NodeKind::Employee)
    }

    pub fn add_department(&mut self, name: impl Into<String>) -> NodeId {
        self.insert(name.into(), NodeKind::Department)
    }

    #[instrument(level = "trace", skip(self))]
    fn insert(&mut self, name: String, kind: NodeKind) -> NodeId {
        NodeId(self.arena.insert(OrgNode {
            name,
            kind,
            children: Vec::new(),
        }))
    }

    pub fn get(&self, id: NodeId) -> Option<&OrgNode> {
        self.arena.get(id.0)
    }

    /// Like [`OrgChart::get`], but a missing handle is an error.
    pub fn node(&self, id: NodeId) -> DomainResult<&OrgNode> {
        self.get(id)
            .ok_or_else(|| DomainError::NodeNotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn children(&self, id: NodeId) -> DomainResult<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    /// Append `child` to the children of `parent`.
    ///
    /// Employees silently ignore the call. Appending a department beneath
    /// itself or one of its descendants fails with `CycleDetected`.
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> DomainResult<()> {
        let parent_node = self.node(parent)?;
        let parent_name = parent_node.name.clone();
        if parent_node.is_leaf() {
            debug!("add_child ignored: {} is an employee", parent_name);
            return Ok(());
        }
        let child_node = self.node(child)?;
        let child_name = child_node.name.clone();

        // Only a department can have the parent in its subtree
        let may_cycle = !child_node.is_leaf();
        if may_cycle && self.is_descendant_or_self(child, parent) {
            return Err(DomainError::CycleDetected {
                parent: parent_name,
                child: child_name,
            });
        }

        let parent_node = self
            .arena
            .get_mut(parent.0)
            .ok_or_else(|| DomainError::NodeNotFound(parent.to_string()))?;
        parent_node.children.push(child);
        debug!("{} <- {}", parent_name, child_name);
        Ok(())
    }

    /// Remove the first occurrence of `child` from the children of `parent`.
    ///
    /// Employees silently ignore the call and removing an absent child is a
    /// no-op. The removed node stays in the chart and can be re-attached.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomainResult<()> {
        let parent_node = self
            .arena
            .get_mut(parent.0)
            .ok_or_else(|| DomainError::NodeNotFound(parent.to_string()))?;
        if parent_node.is_leaf() {
            debug!("remove_child ignored: {} is an employee", parent_node.name);
            return Ok(());
        }
        if let Some(pos) = parent_node.children.iter().position(|&c| c == child) {
            parent_node.children.remove(pos);
        }
        Ok(())
    }

    /// True if `candidate` is `ancestor` or lies in its subtree.
    fn is_descendant_or_self(&self, ancestor: NodeId, candidate: NodeId) -> bool {
        self.iter(ancestor).any(|(id, _)| id == candidate)
    }

    /// Describe a node and, for departments, its whole subtree.
    ///
    /// Departments produce a header line followed by the concatenated
    /// descriptions of their children, depth-first pre-order. Every line is
    /// newline-terminated.
    #[instrument(level = "debug", skip(self))]
    pub fn describe(&self, id: NodeId) -> DomainResult<String> {
        let mut out = String::new();
        self.write_description(id, &mut out)?;
        Ok(out)
    }

    fn write_description(&self, id: NodeId, out: &mut String) -> DomainResult<()> {
        let node = self.node(id)?;
        out.push_str(&node.to_string());
        out.push('\n');
        for &child in node.children() {
            self.write_description(child, out)?;
        }
        Ok(())
    }

    /// Revenue of an employee, or the recursive sum over a department.
    ///
    /// Employee figures are drawn from `source` on every call.
    #[instrument(level = "debug", skip(self, source))]
    pub fn revenue(&self, id: NodeId, source: &dyn RevenueSource) -> DomainResult<u64> {
        let node = self.node(id)?;
        match node.kind {
            NodeKind::Employee => Ok(source.sample(&node.name)),
            NodeKind::Department => node.children().iter().try_fold(0u64, |total, &child| {
                let amount = self.revenue(child, source)?;
                total
                    .checked_add(amount)
                    .ok_or_else(|| DomainError::RevenueOverflow {
                        scope: node.name.clone(),
                    })
            }),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, id: NodeId) -> DomainResult<usize> {
        let node = self.node(id)?;
        let mut deepest = 0;
        for &child in node.children() {
            deepest = deepest.max(self.depth(child)?);
        }
        Ok(1 + deepest)
    }

    /// Names of all employees under `id`, in pre-order.
    pub fn leaf_names(&self, id: NodeId) -> DomainResult<Vec<String>> {
        self.node(id)?;
        Ok(self
            .iter(id)
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.name.clone())
            .collect())
    }

    /// Depth-first pre-order traversal starting at `root`.
    ///
    /// An unknown root yields an empty iterator.
    pub fn iter(&self, root: NodeId) -> PreOrderIter<'_> {
        PreOrderIter::new(self, root)
    }
}

pub struct PreOrderIter<'a> {
    chart: &'a OrgChart,
    stack: Vec<NodeId>,
}

impl<'a> PreOrderIter<'a> {
    fn new(chart: &'a OrgChart, root: NodeId) -> Self {
        Self {
            chart,
            stack: vec![root],
        }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = (NodeId, &'a OrgNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.chart.get(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children().iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}
