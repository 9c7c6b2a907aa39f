//! The immutable movie graph: catalog plus typed adjacency.

use crate::catalog::EntityCatalog;
use crate::node::{EdgeKind, Node, NodeId, NodeKind};
use serde::Serialize;
use std::fmt;

/// In-memory property graph of titles and their attributes.
///
/// Built once by [`GraphBuilder`](crate::GraphBuilder) and read-only after
/// that. There is no interior mutability, so an `Arc<MovieGraph>` can be
/// read from any number of threads at once.
#[derive(Debug, Default)]
pub struct MovieGraph {
    catalog: EntityCatalog,
    /// Neighbors of each node, indexed by `NodeId`.
    /// Each list holds no duplicate pairs and keeps insertion order.
    adjacency: Vec<Vec<(NodeId, EdgeKind)>>,
    edge_count: usize,
}

impl MovieGraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // Construction - only the builder calls these

    pub(crate) fn add_node(&mut self, node: Node) -> NodeId {
        let (id, inserted) = self.catalog.intern(node);
        if inserted {
            self.adjacency.push(Vec::new());
        }
        id
    }

    /// Add an undirected edge between a title and an attribute node.
    ///
    /// Adding the same edge twice is a no-op.
    pub(crate) fn add_edge(&mut self, title: NodeId, target: NodeId, kind: EdgeKind) {
        let title_adj = &mut self.adjacency[title as usize];
        if title_adj.contains(&(target, kind)) {
            return;
        }
        title_adj.push((target, kind));
        self.adjacency[target as usize].push((title, kind));
        self.edge_count += 1;
    }

    // Read access

    pub fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.catalog.get(id)
    }

    /// Find a title by exact name
    pub fn title_id(&self, name: &str) -> Option<NodeId> {
        self.catalog.title_id(name)
    }

    pub fn contains_title(&self, name: &str) -> bool {
        self.title_id(name).is_some()
    }

    /// Title handles in graph iteration order (first appearance in the input)
    pub fn title_ids(&self) -> &[NodeId] {
        self.catalog.title_ids()
    }

    /// Title names in graph iteration order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.title_ids()
            .iter()
            .filter_map(move |&id| self.catalog.get(id)?.name())
    }

    /// All `(neighbor, edge kind)` pairs of a node
    pub fn neighbors(&self, id: NodeId) -> &[(NodeId, EdgeKind)] {
        self.adjacency
            .get(id as usize)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Neighbor nodes reached through one edge kind
    pub fn neighbors_by_edge(&self, id: NodeId, kind: EdgeKind) -> impl Iterator<Item = &Node> {
        self.neighbors(id)
            .iter()
            .filter(move |(_, edge)| *edge == kind)
            .filter_map(move |&(neighbor, _)| self.catalog.get(neighbor))
    }

    /// Neighbors of the title called `name` through one edge kind
    ///
    /// Empty when the title is not in the graph.
    pub fn title_neighbors(&self, name: &str, kind: EdgeKind) -> Vec<&Node> {
        match self.title_id(name) {
            Some(id) => self.neighbors_by_edge(id, kind).collect(),
            None => Vec::new(),
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Node and edge counts
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            titles: self.catalog.count(NodeKind::Title),
            years: self.catalog.count(NodeKind::Year),
            genres: self.catalog.count(NodeKind::Genre),
            directors: self.catalog.count(NodeKind::Director),
            actors: self.catalog.count(NodeKind::Actor),
            edges: self.edge_count,
        }
    }
}

/// Size of a graph, per node kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub titles: usize,
    pub years: usize,
    pub genres: usize,
    pub directors: usize,
    pub actors: usize,
    pub edges: usize,
}

impl GraphStats {
    pub fn nodes(&self) -> usize {
        self.titles + self.years + self.genres + self.directors + self.actors
    }
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} titles, {} years, {} genres, {} directors, {} actors, {} edges",
            self.titles, self.years, self.genres, self.directors, self.actors, self.edges
        )
    }
}
