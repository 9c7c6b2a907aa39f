//! Entity Catalog: the deduplicating arena of nodes.

use crate::node::{Node, NodeId, NodeKey, NodeKind};
use std::collections::HashMap;

/// Owns every node of the graph.
///
/// Nodes live in a `Vec` and are addressed by their position ([`NodeId`]).
/// `index` maps each (variant, key) to its handle so inserting an existing
/// entity hands back the node that is already there.
#[derive(Debug, Default)]
pub struct EntityCatalog {
    nodes: Vec<Node>,
    index: HashMap<NodeKey, NodeId>,
    /// Title handles in insertion order
    titles: Vec<NodeId>,
}

impl EntityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, or return the handle of the equal node already stored
    ///
    /// Returns `(id, inserted)`.
    pub(crate) fn intern(&mut self, node: Node) -> (NodeId, bool) {
        let key = node.key();
        if let Some(&id) = self.index.get(&key) {
            return (id, false);
        }

        let id = self.nodes.len() as NodeId;
        if node.kind() == NodeKind::Title {
            self.titles.push(id);
        }
        self.nodes.push(node);
        self.index.insert(key, id);
        (id, true)
    }

    /// Get a node by handle
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    /// Find the handle of a node by its key
    pub fn lookup(&self, key: &NodeKey) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// Find a title by exact name
    pub fn title_id(&self, name: &str) -> Option<NodeId> {
        self.lookup(&NodeKey::Title(name.to_string()))
    }

    /// Title handles in the order titles were first added
    pub fn title_ids(&self) -> &[NodeId] {
        &self.titles
    }

    /// Iterate over `(handle, node)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (idx as NodeId, node))
    }

    /// Number of nodes of the given kind
    pub fn count(&self, kind: NodeKind) -> usize {
        match kind {
            NodeKind::Title => self.titles.len(),
            _ => self.nodes.iter().filter(|n| n.kind() == kind).count(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
