//! Core record types for the movie dataset.
//!
//! A [`MovieRecord`] is the normalized, post-ingestion shape of one movie:
//! the relational fields (year, genres, directors, actors) are split out so
//! the graph builder can turn them into edges, and everything else lands in
//! an open [`Payload`] of scalar [`AttributeValue`]s.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Release year of a movie
pub type Year = i32;

/// Non-relational attributes of a title (poster, runtime, rating, ...)
///
/// BTreeMap keeps serialization order stable.
pub type Payload = BTreeMap<String, AttributeValue>;

/// Well-known payload keys produced by the CSV loader.
pub mod fields {
    pub const POSTER: &str = "Poster";
    pub const RUNTIME: &str = "Runtime";
    pub const RATING: &str = "Rating";
    pub const OVERVIEW: &str = "Overview";
}

// =============================================================================
// Payload Values
// =============================================================================

/// A single scalar payload value.
///
/// Closed set of kinds so consumers of the projected record know exactly
/// what they can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(v) => Some(*v),
            AttributeValue::Integer(v) => Some(*v as f64),
            AttributeValue::Text(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Integer(v) => write!(f, "{}", v),
            AttributeValue::Float(v) => write!(f, "{}", v),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

// =============================================================================
// MovieRecord
// =============================================================================

/// One normalized movie, ready to be fed to the graph builder.
///
/// `year` is optional here because the source data can lack it; the graph
/// builder is the one that rejects a record without a year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub year: Option<Year>,
    pub genres: Vec<String>,
    pub directors: Vec<String>,
    pub actors: Vec<String>,
    /// Every other scalar column of the source row
    pub payload: Payload,
}

impl MovieRecord {
    /// Create a record with a title and year and no other attributes
    pub fn new(title: impl Into<String>, year: Year) -> Self {
        Self {
            title: title.into(),
            year: Some(year),
            genres: Vec::new(),
            directors: Vec::new(),
            actors: Vec::new(),
            payload: Payload::new(),
        }
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_directors<I, S>(mut self, directors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directors = directors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_actors<I, S>(mut self, actors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actors = actors.into_iter().map(Into::into).collect();
        self
    }

    /// Set a single payload field (builder style)
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }
}
