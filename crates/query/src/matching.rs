//! The partial match predicate between queried values and graph neighbors.
//!
//! - integer vs integer: exact equality
//! - text vs text: any whitespace token of the query, lower-cased, is a
//!   substring of the lower-cased neighbor ("Spielberg" matches
//!   "Steven Spielberg", "dark" matches "The Dark Knight Rises")
//! - mixed kinds never match
//!
//! Containment is whole-token: "dramatic" does not match "Drama".

use graph::NodeValue;
use serde::Serialize;
use std::fmt;

/// One entry of the queried-attribute set
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Integer(i64),
    Text(String),
}

impl From<NodeValue<'_>> for QueryValue {
    fn from(value: NodeValue<'_>) -> Self {
        match value {
            NodeValue::Integer(v) => QueryValue::Integer(v),
            NodeValue::Text(s) => QueryValue::Text(s.to_string()),
        }
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Integer(v) => write!(f, "{}", v),
            QueryValue::Text(s) => f.write_str(s),
        }
    }
}

/// Does `queried` match the neighbor value `neighbor`?
pub fn matches_partial(queried: &QueryValue, neighbor: NodeValue<'_>) -> bool {
    QueryTerm::new(queried.clone()).matches(&NeighborValue::from(neighbor))
}

/// A queried value with its lower-cased tokens computed once
#[derive(Debug, Clone)]
pub struct QueryTerm {
    value: QueryValue,
    tokens: Vec<String>,
}

impl QueryTerm {
    pub fn new(value: QueryValue) -> Self {
        let tokens = match &value {
            QueryValue::Text(s) => s.split_whitespace().map(str::to_lowercase).collect(),
            QueryValue::Integer(_) => Vec::new(),
        };
        Self { value, tokens }
    }

    pub fn value(&self) -> &QueryValue {
        &self.value
    }

    pub(crate) fn matches(&self, neighbor: &NeighborValue) -> bool {
        match (&self.value, neighbor) {
            (QueryValue::Integer(q), NeighborValue::Integer(n)) => q == n,
            (QueryValue::Text(_), NeighborValue::Text(lowered)) => {
                self.tokens.iter().any(|token| lowered.contains(token.as_str()))
            }
            _ => false,
        }
    }
}

/// Neighbor value prepared for matching (text already lower-cased)
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NeighborValue {
    Integer(i64),
    Text(String),
}

impl From<NodeValue<'_>> for NeighborValue {
    fn from(value: NodeValue<'_>) -> Self {
        match value {
            NodeValue::Integer(v) => NeighborValue::Integer(v),
            NodeValue::Text(s) => NeighborValue::Text(s.to_lowercase()),
        }
    }
}
