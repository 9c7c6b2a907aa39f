//! Graph Builder: turns normalized movie records into a [`MovieGraph`].
//!
//! ## Algorithm
//! 1. Validate each record (non-empty title, a release year)
//! 2. Coalesce records that share a title
//! 3. For every record, intern the title node with its payload
//! 4. Intern the year node and link it with a `title_year` edge
//! 5. Intern each genre, director and actor and link it with its typed edge
//!
//! Attribute nodes are interned by exact key, which is what lets two titles
//! with the same director meet at one shared node.

use crate::error::{GraphError, Result};
use crate::graph::MovieGraph;
use crate::node::{EdgeKind, Node};
use data_loader::MovieRecord;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Builds the graph in one pass. Consumed by [`GraphBuilder::build`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    records: Vec<MovieRecord>,
    /// Title -> position in `records`
    positions: HashMap<String, usize>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a complete set of records
    ///
    /// Fails on the first malformed record; no partial graph is returned.
    pub fn build<I>(records: I) -> Result<MovieGraph>
    where
        I: IntoIterator<Item = MovieRecord>,
    {
        let mut builder = Self::new();
        for record in records {
            builder.add_record(record)?;
        }
        Ok(builder.finish())
    }

    /// Validate a record and queue it for the graph
    ///
    /// A title seen before is merged onto the earlier record:
    /// - year and payload: last write wins
    /// - genres, directors, actors: union, first-seen order
    pub fn add_record(&mut self, record: MovieRecord) -> Result<()> {
        validate(&record)?;

        match self.positions.get(&record.title) {
            Some(&idx) => {
                warn!(title = %record.title, "Duplicate title, merging onto earlier record");
                merge_into(&mut self.records[idx], record);
            }
            None => {
                self.positions.insert(record.title.clone(), self.records.len());
                self.records.push(record);
            }
        }
        Ok(())
    }

    /// Materialize nodes and edges
    pub fn finish(self) -> MovieGraph {
        let mut graph = MovieGraph::new();

        for record in self.records {
            let MovieRecord {
                title,
                year,
                genres,
                directors,
                actors,
                payload,
            } = record;

            // `validate` guarantees a year
            let Some(year) = year else { continue };

            let title_id = graph.add_node(Node::Title {
                name: title,
                payload,
            });

            let year_id = graph.add_node(Node::Year(year));
            graph.add_edge(title_id, year_id, EdgeKind::TitleYear);

            for genre in genres.into_iter().filter(|g| !g.trim().is_empty()) {
                let id = graph.add_node(Node::Genre(genre));
                graph.add_edge(title_id, id, EdgeKind::TitleGenre);
            }
            for director in directors.into_iter().filter(|d| !d.trim().is_empty()) {
                let id = graph.add_node(Node::Director(director));
                graph.add_edge(title_id, id, EdgeKind::TitleDirector);
            }
            for actor in actors.into_iter().filter(|a| !a.trim().is_empty()) {
                let id = graph.add_node(Node::Actor(actor));
                graph.add_edge(title_id, id, EdgeKind::TitleActor);
            }
        }

        info!("Built movie graph: {}", graph.stats());
        graph
    }
}

/// Convenience wrapper around [`GraphBuilder::build`]
pub fn build_graph<I>(records: I) -> Result<MovieGraph>
where
    I: IntoIterator<Item = MovieRecord>,
{
    GraphBuilder::build(records)
}

fn validate(record: &MovieRecord) -> Result<()> {
    if record.title.trim().is_empty() {
        return Err(GraphError::MalformedRecord {
            title: record.title.clone(),
            reason: "empty title".to_string(),
        });
    }
    if record.year.is_none() {
        return Err(GraphError::MalformedRecord {
            title: record.title.clone(),
            reason: "missing year".to_string(),
        });
    }
    Ok(())
}

fn merge_into(existing: &mut MovieRecord, record: MovieRecord) {
    if existing.year != record.year {
        debug!(
            title = %existing.title,
            "Release year changed from {:?} to {:?}",
            existing.year,
            record.year
        );
    }
    existing.year = record.year;
    existing.payload = record.payload;
    union_into(&mut existing.genres, record.genres);
    union_into(&mut existing.directors, record.directors);
    union_into(&mut existing.actors, record.actors);
}

fn union_into(existing: &mut Vec<String>, incoming: Vec<String>) {
    for value in incoming {
        if !existing.contains(&value) {
            existing.push(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeKey, NodeKind};
    use data_loader::{fields, AttributeValue};

    fn create_test_records() -> Vec<MovieRecord> {
        vec![
            MovieRecord::new("Catch Me If You Can", 2002)
                .with_genres(["Biography", "Crime", "Drama"])
                .with_directors(["Steven Spielberg"])
                .with_actors(["Leonardo DiCaprio", "Tom Hanks", "Christopher Walken", "Martin Sheen"])
                .with_attribute(fields::RUNTIME, 141_i64),
            MovieRecord::new("Minority Report", 2002)
                .with_genres(["Action", "Crime", "Mystery"])
                .with_directors(["Steven Spielberg"])
                .with_actors(["Tom Cruise", "Colin Farrell", "Samantha Morton", "Max von Sydow"]),
            MovieRecord::new("Cast Away", 2000)
                .with_genres(["Adventure", "Drama", "Romance"])
                .with_directors(["Robert Zemeckis"])
                .with_actors(["Tom Hanks", "Helen Hunt"]),
        ]
    }

    #[test]
    fn test_build_shares_attribute_nodes() {
        let graph = GraphBuilder::build(create_test_records()).unwrap();
        let stats = graph.stats();

        assert_eq!(stats.titles, 3);
        assert_eq!(stats.years, 2);
        // Biography, Crime, Drama, Action, Mystery, Adventure, Romance
        assert_eq!(stats.genres, 7);
        assert_eq!(stats.directors, 2);
        // Tom Hanks appears twice but is one node
        assert_eq!(stats.actors, 9);
        assert_eq!(stats.edges, 3 + 9 + 3 + 10);

        let spielberg = graph
            .catalog()
            .lookup(&NodeKey::Director("Steven Spielberg".to_string()))
            .unwrap();
        assert_eq!(graph.neighbors(spielberg).len(), 2);
    }

    #[test]
    fn test_every_title_has_one_year() {
        let graph = GraphBuilder::build(create_test_records()).unwrap();
        for &id in graph.title_ids() {
            assert_eq!(graph.neighbors_by_edge(id, EdgeKind::TitleYear).count(), 1);
        }
    }

    #[test]
    fn test_no_orphan_attribute_nodes() {
        let graph = GraphBuilder::build(create_test_records()).unwrap();
        for (id, node) in graph.catalog().iter() {
            if node.kind() != NodeKind::Title {
                assert!(!graph.neighbors(id).is_empty(), "orphan node {}", node);
            }
        }
    }

    #[test]
    fn test_missing_year_is_malformed() {
        let mut records = create_test_records();
        records[1].year = None;

        let result = GraphBuilder::build(records);
        assert_eq!(
            result.unwrap_err(),
            GraphError::MalformedRecord {
                title: "Minority Report".to_string(),
                reason: "missing year".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_title_is_malformed() {
        let result = GraphBuilder::build(vec![MovieRecord::new("  ", 1999)]);
        assert!(matches!(result, Err(GraphError::MalformedRecord { .. })));
    }

    #[test]
    fn test_duplicate_titles_merge() {
        let records = vec![
            MovieRecord::new("Heat", 1994)
                .with_genres(["Crime"])
                .with_actors(["Al Pacino"])
                .with_attribute(fields::RUNTIME, 170_i64),
            MovieRecord::new("Heat", 1995)
                .with_genres(["Crime", "Drama"])
                .with_actors(["Robert De Niro"])
                .with_attribute(fields::RATING, 8.3),
        ];

        let graph = GraphBuilder::build(records).unwrap();
        let stats = graph.stats();
        assert_eq!(stats.titles, 1);
        // The overwritten year never becomes a node
        assert_eq!(stats.years, 1);
        assert_eq!(graph.title_neighbors("Heat", EdgeKind::TitleYear), vec![&Node::Year(1995)]);

        let actors: Vec<&str> = graph
            .title_neighbors("Heat", EdgeKind::TitleActor)
            .into_iter()
            .filter_map(Node::name)
            .collect();
        assert_eq!(actors, vec!["Al Pacino", "Robert De Niro"]);

        // Payload is replaced, not merged
        let id = graph.title_id("Heat").unwrap();
        let payload = graph.node(id).unwrap().payload().unwrap();
        assert_eq!(payload.get(fields::RATING), Some(&AttributeValue::Float(8.3)));
        assert!(payload.get(fields::RUNTIME).is_none());
    }

    #[test]
    fn test_blank_names_are_skipped() {
        let records = vec![MovieRecord::new("Heat", 1995).with_genres(["Crime", " "])];
        let graph = GraphBuilder::build(records).unwrap();
        assert_eq!(graph.stats().genres, 1);
    }

    #[test]
    fn test_build_empty() {
        let graph = build_graph(Vec::new()).unwrap();
        assert_eq!(graph.stats().nodes(), 0);
    }
}
