//! Attribute Projector: flattens a title and its edges into one record.

use crate::error::{GraphError, Result};
use crate::graph::MovieGraph;
use crate::node::{EdgeKind, Node};
use data_loader::{Payload, Year};
use serde::{Deserialize, Serialize};

/// Presentation-ready view of one title
///
/// Serializes to the flat shape the UI expects: relational fields plus the
/// payload keys (`Poster`, `Runtime`, `Rating`, `Overview`, ...) at top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub title: String,
    pub year: Year,
    pub directors: Vec<String>,
    pub actors: Vec<String>,
    #[serde(rename = "genre")]
    pub genres: Vec<String>,
    #[serde(flatten)]
    pub payload: Payload,
}

/// Rebuild the full record of `title` by walking its edges
///
/// Sequences come back in ingestion order because adjacency lists keep
/// insertion order.
pub fn project(graph: &MovieGraph, title: &str) -> Result<MovieDetails> {
    let id = graph
        .title_id(title)
        .ok_or_else(|| GraphError::UnknownTitle(title.to_string()))?;

    let payload = graph
        .node(id)
        .and_then(Node::payload)
        .cloned()
        .unwrap_or_default();

    let mut year = None;
    let mut details = MovieDetails {
        title: title.to_string(),
        year: 0,
        directors: Vec::new(),
        actors: Vec::new(),
        genres: Vec::new(),
        payload,
    };

    for &(neighbor, edge) in graph.neighbors(id) {
        let Some(node) = graph.node(neighbor) else {
            continue;
        };
        match (edge, node) {
            (EdgeKind::TitleYear, Node::Year(value)) => year = Some(*value),
            (EdgeKind::TitleGenre, Node::Genre(name)) => details.genres.push(name.clone()),
            (EdgeKind::TitleDirector, Node::Director(name)) => details.directors.push(name.clone()),
            (EdgeKind::TitleActor, Node::Actor(name)) => details.actors.push(name.clone()),
            _ => {}
        }
    }

    details.year = year.ok_or_else(|| GraphError::MalformedRecord {
        title: title.to_string(),
        reason: "no title_year edge".to_string(),
    })?;
    Ok(details)
}

impl MovieGraph {
    /// See [`project`]
    pub fn project(&self, title: &str) -> Result<MovieDetails> {
        project(self, title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;
    use data_loader::{fields, AttributeValue, MovieRecord};

    fn create_test_graph() -> MovieGraph {
        GraphBuilder::build(vec![
            MovieRecord::new("Catch Me If You Can", 2002)
                .with_genres(["Biography", "Crime", "Drama"])
                .with_directors(["Steven Spielberg"])
                .with_actors(["Leonardo DiCaprio", "Tom Hanks", "Christopher Walken", "Martin Sheen"])
                .with_attribute(fields::RUNTIME, 141_i64)
                .with_attribute(fields::RATING, 8.1)
                .with_attribute(fields::POSTER, "https://example.com/catch.jpg"),
        ])
        .unwrap()
    }

    #[test]
    fn test_project() {
        let graph = create_test_graph();
        let details = project(&graph, "Catch Me If You Can").unwrap();

        assert_eq!(details.title, "Catch Me If You Can");
        assert_eq!(details.year, 2002);
        assert_eq!(details.genres, vec!["Biography", "Crime", "Drama"]);
        assert_eq!(details.directors, vec!["Steven Spielberg"]);
        assert_eq!(details.actors[0], "Leonardo DiCaprio");
        assert_eq!(details.payload[fields::RUNTIME], AttributeValue::Integer(141));
    }

    #[test]
    fn test_project_unknown_title() {
        let graph = create_test_graph();
        assert_eq!(
            graph.project("Jaws"),
            Err(GraphError::UnknownTitle("Jaws".to_string()))
        );
    }

    #[test]
    fn test_serialized_shape() {
        let graph = create_test_graph();
        let details = graph.project("Catch Me If You Can").unwrap();
        let json = serde_json::to_value(&details).unwrap();

        assert_eq!(json["year"], 2002);
        assert_eq!(json["genre"][0], "Biography");
        assert_eq!(json["directors"][0], "Steven Spielberg");
        assert_eq!(json["Runtime"], 141);
        assert_eq!(json["Rating"], 8.1);
        assert_eq!(json["Poster"], "https://example.com/catch.jpg");
    }
}
