//! Similarity query engine over the movie graph.
//!
//! This crate provides:
//! - QueryParams and the lenient reader for translator output
//! - The partial match predicate between queried values and neighbors
//! - QueryEngine for scoring every title against a query
//! - RankStage trait and RankingPipeline for turning scores into results
//!
//! ## Architecture
//! A query is processed in stages:
//! 1. Params resolve into a flat queried-attribute set (literal values plus
//!    the attributes of referenced titles)
//! 2. Every title is scored by the fraction of queried values that match
//!    one of its neighbors (in parallel, with rayon)
//! 3. The ranking pipeline drops zeros, sorts, keeps exact matches when
//!    there are any, and truncates
//!
//! ## Example Usage
//! ```ignore
//! use query::{QueryEngine, QueryParams};
//!
//! let engine = QueryEngine::new(graph.clone());
//!
//! let params = QueryParams::new()
//!     .with_year(2002)
//!     .with_director("Spielberg");
//! for scored in engine.query(&params) {
//!     println!("{} ({:.2})", scored.title, scored.score);
//! }
//!
//! // Translator output
//! let params = QueryParams::from_yaml("same_attributes_as:\n    director: Heat\n")?;
//! ```

pub mod error;
pub mod types;
pub mod matching;
pub mod params;
pub mod traits;
pub mod stages;
pub mod ranking_pipeline;
pub mod engine;

// Re-export main types
pub use engine::{query, queried_attributes, QueryConfig, QueryEngine, DEFAULT_RESULT_LIMIT};
pub use error::{QueryError, Result};
pub use matching::{matches_partial, QueryTerm, QueryValue};
pub use params::{AttributeKind, QueryParams};
pub use ranking_pipeline::RankingPipeline;
pub use traits::RankStage;
pub use types::ScoredTitle;
