//! # Data Loader Crate
//!
//! This crate turns the IMDB "top 1000" movie CSV into normalized
//! [`MovieRecord`]s for the graph builder.
//!
//! ## Main Components
//!
//! - **types**: `MovieRecord`, payload scalars (`AttributeValue`)
//! - **parser**: CSV splitting and row normalization
//! - **loader**: `load_movies` entry point with logging
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::load_movies;
//! use std::path::Path;
//!
//! let records = load_movies(Path::new("data/imdb_top_1000.csv"))?;
//! println!("Loaded {} movies", records.len());
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod loader;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use loader::{load_movies, summarize, LoadSummary};
pub use types::{fields, AttributeValue, MovieRecord, Payload, Year};
