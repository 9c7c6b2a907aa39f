//! Server crate for the movie graph search engine.
//!
//! This crate contains the search service that coordinates translation,
//! querying and projection for the presentation layer.

pub mod service;

pub use service::{MovieSearchService, QueryTranslator, ResultFraming, SearchResponse};
