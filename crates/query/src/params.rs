//! Structured query parameters and the defensive reader for translator output.
//!
//! The natural-language translator emits key/value text such as
//!
//! ```text
//! year: 2004
//! director: Steven Spielberg
//! ```
//!
//! or
//!
//! ```text
//! same_attributes_as:
//!     director: Eternal Sunshine of the Spotless Mind
//! ```
//!
//! That output is untrusted. Unknown keys are ignored, values of the wrong
//! shape are dropped, and only text that is not a key/value document at all
//! is an error.

use crate::error::{QueryError, Result};
use data_loader::Year;
use graph::EdgeKind;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Attribute kinds a `same_attributes_as` entry can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Year,
    Genre,
    Director,
    Actor,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 4] = [
        AttributeKind::Year,
        AttributeKind::Genre,
        AttributeKind::Director,
        AttributeKind::Actor,
    ];

    /// The `title_{kind}` edge this attribute is stored under
    pub fn edge_kind(&self) -> EdgeKind {
        match self {
            AttributeKind::Year => EdgeKind::TitleYear,
            AttributeKind::Genre => EdgeKind::TitleGenre,
            AttributeKind::Director => EdgeKind::TitleDirector,
            AttributeKind::Actor => EdgeKind::TitleActor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Year => "year",
            AttributeKind::Genre => "genre",
            AttributeKind::Director => "director",
            AttributeKind::Actor => "actor",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeKind {
    type Err = String;

    /// Case-insensitive; plural forms are accepted
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "year" | "years" => Ok(AttributeKind::Year),
            "genre" | "genres" => Ok(AttributeKind::Genre),
            "director" | "directors" => Ok(AttributeKind::Director),
            "actor" | "actors" => Ok(AttributeKind::Actor),
            other => Err(format!("unknown attribute kind: {}", other)),
        }
    }
}

/// A structured movie query. Every field is optional and they combine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawParams")]
pub struct QueryParams {
    /// "Movies like this one": query by all of this title's attributes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<Year>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    /// Use another title's values for these attribute kinds
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub same_attributes_as: BTreeMap<AttributeKind, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_year(mut self, year: Year) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Add a `same_attributes_as` entry
    pub fn with_same_as(mut self, kind: AttributeKind, title: impl Into<String>) -> Self {
        self.same_attributes_as.insert(kind, title.into());
        self
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.year.is_none()
            && self.genre.is_none()
            && self.director.is_none()
            && self.actor.is_none()
            && self.same_attributes_as.is_empty()
    }

    /// Read translator output in YAML form
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| QueryError::InvalidTranslation {
            format: "YAML",
            reason: e.to_string(),
        })
    }

    /// Read translator output in JSON form
    pub fn from_json(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(text).map_err(|e| QueryError::InvalidTranslation {
            format: "JSON",
            reason: e.to_string(),
        })
    }
}

// =============================================================================
// Lenient wire shape
// =============================================================================

/// Whatever the translator put in a field
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Lenient {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Lenient {
    /// Text view: numbers are rendered as text, blanks and other shapes dropped
    fn into_text(self, field: &str) -> Option<String> {
        let text = match self {
            Lenient::Text(s) => s.trim().to_string(),
            Lenient::Integer(v) => v.to_string(),
            Lenient::Float(v) => v.to_string(),
            Lenient::Other(_) => {
                warn!(field, "Ignoring non-scalar query parameter");
                return None;
            }
        };
        (!text.is_empty()).then_some(text)
    }

    fn into_year(self) -> Option<Year> {
        let year = match self {
            Lenient::Integer(v) => Year::try_from(v).ok(),
            Lenient::Float(v) if v.fract() == 0.0 && v.abs() <= f64::from(Year::MAX) => {
                Some(v as Year)
            }
            Lenient::Text(s) => s.trim().parse().ok(),
            _ => None,
        };
        if year.is_none() {
            warn!("Ignoring unusable year parameter");
        }
        year
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSameAs {
    Map(BTreeMap<String, Lenient>),
    Other(IgnoredAny),
}

/// Every field optional, unknown fields ignored
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawParams {
    title: Option<Lenient>,
    year: Option<Lenient>,
    genre: Option<Lenient>,
    director: Option<Lenient>,
    actor: Option<Lenient>,
    same_attributes_as: Option<RawSameAs>,
}

impl From<RawParams> for QueryParams {
    fn from(raw: RawParams) -> Self {
        let mut same_attributes_as = BTreeMap::new();
        match raw.same_attributes_as {
            Some(RawSameAs::Map(entries)) => {
                for (key, value) in entries {
                    let Ok(kind) = key.parse::<AttributeKind>() else {
                        warn!(key = %key, "Ignoring same_attributes_as entry with unknown attribute kind");
                        continue;
                    };
                    if let Some(title) = value.into_text("same_attributes_as") {
                        same_attributes_as.insert(kind, title);
                    }
                }
            }
            Some(RawSameAs::Other(_)) => {
                warn!("Ignoring same_attributes_as that is not a map");
            }
            None => {}
        }

        QueryParams {
            title: raw.title.and_then(|v| v.into_text("title")),
            year: raw.year.and_then(Lenient::into_year),
            genre: raw.genre.and_then(|v| v.into_text("genre")),
            director: raw.director.and_then(|v| v.into_text("director")),
            actor: raw.actor.and_then(|v| v.into_text("actor")),
            same_attributes_as,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_literal_fields() {
        let params = QueryParams::from_yaml("year: 2004\ndirector: Steven Spielberg\n").unwrap();
        assert_eq!(params, QueryParams::new().with_year(2004).with_director("Steven Spielberg"));
    }

    #[test]
    fn test_yaml_same_attributes_as() {
        let text = "same_attributes_as:\n    director: Eternal Sunshine of the Spotless Mind\n";
        let params = QueryParams::from_yaml(text).unwrap();
        assert_eq!(
            params.same_attributes_as.get(&AttributeKind::Director).map(String::as_str),
            Some("Eternal Sunshine of the Spotless Mind")
        );
        assert!(params.title.is_none());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let params = QueryParams::from_yaml("genre: Drama\nmood: gloomy\nrating: 8\n").unwrap();
        assert_eq!(params, QueryParams::new().with_genre("Drama"));
    }

    #[test]
    fn test_wrong_shapes_are_dropped() {
        let text = "genre:\n  - Drama\n  - Crime\nactor: true\nyear: soon\nsame_attributes_as: Heat\n";
        let params = QueryParams::from_yaml(text).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_year_variants() {
        assert_eq!(QueryParams::from_yaml("year: '2002'").unwrap().year, Some(2002));
        assert_eq!(QueryParams::from_json(r#"{"year": 2002.0}"#).unwrap().year, Some(2002));
        assert_eq!(QueryParams::from_json(r#"{"year": 2002.5}"#).unwrap().year, None);
    }

    #[test]
    fn test_numeric_title_is_text() {
        let params = QueryParams::from_yaml("title: 1917").unwrap();
        assert_eq!(params.title.as_deref(), Some("1917"));
    }

    #[test]
    fn test_same_as_kinds() {
        let text = r#"{"same_attributes_as": {"Directors": "Heat", "actor": "Ronin", "title": "Alien"}}"#;
        let params = QueryParams::from_json(text).unwrap();
        assert_eq!(params.same_attributes_as.len(), 2);
        assert_eq!(params.same_attributes_as[&AttributeKind::Director], "Heat");
        assert_eq!(params.same_attributes_as[&AttributeKind::Actor], "Ronin");
    }

    #[test]
    fn test_empty_and_null() {
        assert!(QueryParams::from_yaml("").unwrap().is_empty());
        assert!(QueryParams::from_yaml("title: ~\ngenre: ''").unwrap().is_empty());
        assert!(QueryParams::from_json("{}").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_text_is_an_error() {
        assert!(matches!(
            QueryParams::from_json("{not json"),
            Err(QueryError::InvalidTranslation { format: "JSON", .. })
        ));
        assert!(QueryParams::from_yaml("year: [2002").is_err());
    }

    #[test]
    fn test_attribute_kind_parse() {
        assert_eq!("Genres".parse::<AttributeKind>(), Ok(AttributeKind::Genre));
        assert!("rating".parse::<AttributeKind>().is_err());
        assert_eq!(AttributeKind::Actor.edge_kind(), EdgeKind::TitleActor);
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let params = QueryParams::new()
            .with_genre("Drama")
            .with_same_as(AttributeKind::Director, "Heat");
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"genre":"Drama","same_attributes_as":{"director":"Heat"}}"#);
    }
}
