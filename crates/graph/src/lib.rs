//! # Graph Crate
//!
//! In-memory property graph over movie entities.
//!
//! ## Components
//!
//! ### Entity Catalog
//! Deduplicating arena of typed nodes (titles, years, genres, directors,
//! actors). Each unique (variant, key) gets one `NodeId`.
//!
//! ### Graph Builder
//! Consumes `MovieRecord`s and links every title to its year, genres,
//! directors and actors with typed edges. Shared attribute nodes are what
//! make "movies with the same director" a one-hop walk.
//!
//! ### Attribute Projector
//! Walks a title's edges to rebuild a flat `MovieDetails` record.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::load_movies;
//! use graph::GraphBuilder;
//! use std::sync::Arc;
//!
//! let records = load_movies(Path::new("data/imdb_top_1000.csv"))?;
//! let graph = Arc::new(GraphBuilder::build(records)?);
//!
//! let details = graph.project("Catch Me If You Can")?;
//! println!("{} ({})", details.title, details.year);
//! ```
//!
//! The graph is immutable once built; share it with `Arc` and read it from
//! as many threads as needed.

pub mod error;
pub mod node;
pub mod catalog;
pub mod graph;
pub mod builder;
pub mod projector;

// Re-export commonly used types
pub use builder::{build_graph, GraphBuilder};
pub use catalog::EntityCatalog;
pub use error::{GraphError, Result};
pub use graph::{GraphStats, MovieGraph};
pub use node::{EdgeKind, Node, NodeId, NodeKey, NodeKind, NodeValue};
pub use projector::{project, MovieDetails};
