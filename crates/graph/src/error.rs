//! Error types for graph construction and projection.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A record failed validation while building the graph
    #[error("Malformed record {title:?}: {reason}")]
    MalformedRecord { title: String, reason: String },

    /// A title was requested that the catalog does not contain
    #[error("Unknown title: {0}")]
    UnknownTitle(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
