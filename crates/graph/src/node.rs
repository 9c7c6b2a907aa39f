//! Node and edge types of the movie graph.
//!
//! Every entity is a variant of the closed [`Node`] union. Identity is the
//! variant plus its key ([`NodeKey`]), so two genres called "Drama" are the
//! same node no matter how many titles point at them.

use data_loader::{Payload, Year};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense handle of a node in the catalog arena
pub type NodeId = u32;

/// Type tag of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Title,
    Year,
    Genre,
    Director,
    Actor,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Title => "title",
            NodeKind::Year => "year",
            NodeKind::Genre => "genre",
            NodeKind::Director => "director",
            NodeKind::Actor => "actor",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of an edge. Every edge joins a title to one attribute node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    #[serde(rename = "title_year")]
    TitleYear,
    #[serde(rename = "title_genre")]
    TitleGenre,
    #[serde(rename = "title_director")]
    TitleDirector,
    #[serde(rename = "title_actor")]
    TitleActor,
}

impl EdgeKind {
    /// All edge kinds, in the order a title's attributes are expanded
    pub const ALL: [EdgeKind; 4] = [
        EdgeKind::TitleYear,
        EdgeKind::TitleGenre,
        EdgeKind::TitleDirector,
        EdgeKind::TitleActor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::TitleYear => "title_year",
            EdgeKind::TitleGenre => "title_genre",
            EdgeKind::TitleDirector => "title_director",
            EdgeKind::TitleActor => "title_actor",
        }
    }

    /// Kind of the non-title end of this edge
    pub fn target_kind(&self) -> NodeKind {
        match self {
            EdgeKind::TitleYear => NodeKind::Year,
            EdgeKind::TitleGenre => NodeKind::Genre,
            EdgeKind::TitleDirector => NodeKind::Director,
            EdgeKind::TitleActor => NodeKind::Actor,
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed entity in the graph
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Title { name: String, payload: Payload },
    Year(Year),
    Genre(String),
    Director(String),
    Actor(String),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Title { .. } => NodeKind::Title,
            Node::Year(_) => NodeKind::Year,
            Node::Genre(_) => NodeKind::Genre,
            Node::Director(_) => NodeKind::Director,
            Node::Actor(_) => NodeKind::Actor,
        }
    }

    /// Identity of this node inside the catalog
    pub fn key(&self) -> NodeKey {
        match self {
            Node::Title { name, .. } => NodeKey::Title(name.clone()),
            Node::Year(year) => NodeKey::Year(*year),
            Node::Genre(name) => NodeKey::Genre(name.clone()),
            Node::Director(name) => NodeKey::Director(name.clone()),
            Node::Actor(name) => NodeKey::Actor(name.clone()),
        }
    }

    /// The scalar this node stands for: an integer for years, the name otherwise
    pub fn value(&self) -> NodeValue<'_> {
        match self {
            Node::Year(year) => NodeValue::Integer(i64::from(*year)),
            Node::Title { name, .. }
            | Node::Genre(name)
            | Node::Director(name)
            | Node::Actor(name) => NodeValue::Text(name),
        }
    }

    /// Name of the node, `None` for years
    pub fn name(&self) -> Option<&str> {
        match self.value() {
            NodeValue::Text(name) => Some(name),
            NodeValue::Integer(_) => None,
        }
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Node::Title { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.value())
    }
}

/// Deduplication key: variant plus name or year
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Title(String),
    Year(Year),
    Genre(String),
    Director(String),
    Actor(String),
}

/// Borrowed scalar view of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeValue<'a> {
    Integer(i64),
    Text(&'a str),
}

impl fmt::Display for NodeValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeValue::Integer(v) => write!(f, "{}", v),
            NodeValue::Text(s) => f.write_str(s),
        }
    }
}
