use termtree::Tree;
use tracing::instrument;

use crate::domain::error::DomainResult;
use crate::domain::org_chart::{NodeId, NodeKind, OrgChart};

/// Conversion of an org chart subtree into a printable `termtree::Tree`.
pub trait OrgChartDisplay {
    fn to_tree(&self, root: NodeId) -> DomainResult<Tree<String>>;
}

impl OrgChartDisplay for OrgChart {
    #[instrument(level = "debug", skip(self))]
    fn to_tree(&self, root: NodeId) -> DomainResult<Tree<String>> {
        let node = self.node(root)?;
        let label = match node.kind {
            NodeKind::Employee => node.name.clone(),
            NodeKind::Department => format!("{} [{}]", node.name, node.children().len()),
        };

        let leaves = node
            .children()
            .iter()
            .map(|&child| self.to_tree(child))
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Tree::new(label).with_leaves(leaves))
    }
}
