//! Query Engine - fuzzy, similarity-ranked search over the movie graph.
//!
//! ## Algorithm
//! 1. Resolve the params into a flat queried-attribute set:
//!    a. literal `year`, `genre`, `director`, `actor`
//!    b. for each `same_attributes_as` entry, the referenced title's
//!       neighbors through the matching `title_{kind}` edge
//!    c. for `title`, all of that title's own attribute neighbors
//! 2. For every title, count the queried values that partially match at
//!    least one of its neighbors
//! 3. Score = matched / total
//! 4. Rank: drop zeros, sort (stable), keep only exact matches if any,
//!    truncate
//!
//! Unresolved titles contribute nothing. An empty queried-attribute set
//! returns no results.

use crate::matching::{NeighborValue, QueryTerm, QueryValue};
use crate::params::QueryParams;
use crate::ranking_pipeline::RankingPipeline;
use crate::types::ScoredTitle;
use graph::{EdgeKind, MovieGraph, NodeId};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Maximum number of results unless configured otherwise
pub const DEFAULT_RESULT_LIMIT: usize = 5;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    /// Cap on the number of ranked titles returned
    pub result_limit: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

/// Runs queries against a shared, immutable graph.
///
/// Cloning is cheap; clones share the graph and the ranking pipeline.
#[derive(Clone)]
pub struct QueryEngine {
    /// Shared reference to the graph (read-only, so no lock needed)
    graph: Arc<MovieGraph>,
    config: QueryConfig,
    pipeline: Arc<RankingPipeline>,
}

impl QueryEngine {
    /// Create an engine with the default configuration
    pub fn new(graph: Arc<MovieGraph>) -> Self {
        let config = QueryConfig::default();
        Self {
            graph,
            pipeline: Arc::new(RankingPipeline::standard(config.result_limit)),
            config,
        }
    }

    /// Configure the maximum number of results (default: 5)
    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.config.result_limit = limit;
        self.pipeline = Arc::new(RankingPipeline::standard(limit));
        self
    }

    pub fn graph(&self) -> &Arc<MovieGraph> {
        &self.graph
    }

    pub fn config(&self) -> QueryConfig {
        self.config
    }

    /// The flat set of values `params` resolves to
    pub fn queried_attributes(&self, params: &QueryParams) -> Vec<QueryValue> {
        queried_attributes(&self.graph, params)
    }

    /// Rank titles against `params`
    ///
    /// Returns at most `result_limit` titles, best first.
    #[instrument(skip(self, params), fields(limit = self.config.result_limit))]
    pub fn query(&self, params: &QueryParams) -> Vec<ScoredTitle> {
        rank(&self.graph, params, &self.pipeline)
    }
}

/// Rank titles against `params` with the default result limit
pub fn query(graph: &MovieGraph, params: &QueryParams) -> Vec<ScoredTitle> {
    rank(graph, params, &RankingPipeline::standard(DEFAULT_RESULT_LIMIT))
}

fn rank(graph: &MovieGraph, params: &QueryParams, pipeline: &RankingPipeline) -> Vec<ScoredTitle> {
    let values = queried_attributes(graph, params);
    if values.is_empty() {
        debug!("Empty queried-attribute set, nothing to score");
        return Vec::new();
    }
    debug!("Queried-attribute set has {} values", values.len());

    let terms: Vec<QueryTerm> = values.into_iter().map(QueryTerm::new).collect();
    let scored = score_titles(graph, &terms);
    let ranked = pipeline.apply(scored);

    debug!(
        "Ranked {} titles (exact match: {})",
        ranked.len(),
        ranked.first().is_some_and(ScoredTitle::is_exact)
    );
    ranked
}

/// Resolve params into the queried-attribute set
pub fn queried_attributes(graph: &MovieGraph, params: &QueryParams) -> Vec<QueryValue> {
    let mut values = Vec::new();

    // Literal values
    if let Some(year) = params.year {
        values.push(QueryValue::Integer(i64::from(year)));
    }
    for text in [&params.genre, &params.director, &params.actor]
        .into_iter()
        .flatten()
    {
        if let Some(text) = non_blank(text) {
            values.push(QueryValue::Text(text.to_string()));
        }
    }

    // Another title's values for one attribute kind
    for (kind, reference) in &params.same_attributes_as {
        match non_blank(reference).and_then(|r| graph.title_id(r)) {
            Some(id) => push_neighbors(graph, id, kind.edge_kind(), &mut values),
            None => debug!(reference = %reference, kind = %kind, "Unresolved same_attributes_as reference"),
        }
    }

    // "Like this title": all of its attributes
    if let Some(title) = params.title.as_deref().and_then(non_blank) {
        match graph.title_id(title) {
            Some(id) => {
                for kind in EdgeKind::ALL {
                    push_neighbors(graph, id, kind, &mut values);
                }
            }
            None => debug!(title, "Unresolved title"),
        }
    }

    values
}

fn push_neighbors(graph: &MovieGraph, id: NodeId, kind: EdgeKind, values: &mut Vec<QueryValue>) {
    values.extend(
        graph
            .neighbors_by_edge(id, kind)
            .map(|node| QueryValue::from(node.value())),
    );
}

/// Score every title against the prepared terms
///
/// Titles are scored in parallel; the result keeps graph iteration order so
/// later stable sorting breaks ties deterministically.
fn score_titles(graph: &MovieGraph, terms: &[QueryTerm]) -> Vec<ScoredTitle> {
    let total = terms.len();

    graph
        .title_ids()
        .par_iter()
        .filter_map(|&id| {
            let title = graph.node(id)?.name()?;

            let neighbors: Vec<NeighborValue> = graph
                .neighbors(id)
                .iter()
                .filter_map(|&(neighbor, _)| graph.node(neighbor))
                .map(|node| NeighborValue::from(node.value()))
                .collect();

            let matched = terms
                .iter()
                .filter(|term| neighbors.iter().any(|n| term.matches(n)))
                .count();

            Some(ScoredTitle::new(title, matched, total))
        })
        .collect()
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::AttributeKind;
    use data_loader::MovieRecord;
    use graph::GraphBuilder;

    fn create_test_graph() -> Arc<MovieGraph> {
        let records = vec![
            MovieRecord::new("Catch Me If You Can", 2002)
                .with_genres(["Biography", "Crime", "Drama"])
                .with_directors(["Steven Spielberg"])
                .with_actors(["Leonardo DiCaprio", "Tom Hanks", "Christopher Walken", "Martin Sheen"]),
            MovieRecord::new("Minority Report", 2002)
                .with_genres(["Action", "Crime", "Mystery"])
                .with_directors(["Steven Spielberg"])
                .with_actors(["Tom Cruise", "Colin Farrell", "Samantha Morton", "Max von Sydow"]),
            MovieRecord::new("Jurassic Park", 1993)
                .with_genres(["Action", "Adventure", "Sci-Fi"])
                .with_directors(["Steven Spielberg"])
                .with_actors(["Sam Neill", "Laura Dern", "Jeff Goldblum", "Richard Attenborough"]),
            MovieRecord::new("Road to Perdition", 2002)
                .with_genres(["Crime", "Drama", "Thriller"])
                .with_directors(["Sam Mendes"])
                .with_actors(["Paul Newman", "Jude Law", "Daniel Craig", "Stanley Tucci"]),
        ];
        Arc::new(GraphBuilder::build(records).unwrap())
    }

    fn titles(ranked: &[ScoredTitle]) -> Vec<&str> {
        ranked.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_queried_attributes_literal_order() {
        let engine = QueryEngine::new(create_test_graph());
        let params = QueryParams::new()
            .with_actor("Hanks")
            .with_genre("Drama")
            .with_year(2002);

        assert_eq!(
            engine.queried_attributes(&params),
            vec![
                QueryValue::Integer(2002),
                QueryValue::Text("Drama".to_string()),
                QueryValue::Text("Hanks".to_string()),
            ]
        );
    }

    #[test]
    fn test_title_expands_to_all_attributes() {
        let engine = QueryEngine::new(create_test_graph());
        let values = engine.queried_attributes(&QueryParams::new().with_title("Minority Report"));

        // 1 year + 3 genres + 1 director + 4 actors
        assert_eq!(values.len(), 9);
        assert_eq!(values[0], QueryValue::Integer(2002));
    }

    #[test]
    fn test_same_attributes_as_uses_canonical_edge() {
        let engine = QueryEngine::new(create_test_graph());
        let params = QueryParams::new().with_same_as(AttributeKind::Director, "Catch Me If You Can");

        assert_eq!(
            engine.queried_attributes(&params),
            vec![QueryValue::Text("Steven Spielberg".to_string())]
        );
    }

    #[test]
    fn test_year_and_director() {
        let engine = QueryEngine::new(create_test_graph());
        let params = QueryParams::new().with_year(2002).with_director("Spielberg");

        let ranked = engine.query(&params);
        assert_eq!(titles(&ranked), vec!["Catch Me If You Can", "Minority Report"]);
        assert!(ranked.iter().all(|t| t.score == 1.0));
    }

    #[test]
    fn test_partial_scores_when_no_exact_match() {
        let engine = QueryEngine::new(create_test_graph());
        // Nothing is both 1993 and a thriller
        let params = QueryParams::new().with_year(1993).with_genre("Thriller");

        let ranked = engine.query(&params);
        assert_eq!(titles(&ranked), vec!["Jurassic Park", "Road to Perdition"]);
        assert!(ranked.iter().all(|t| t.score == 0.5));
    }

    #[test]
    fn test_self_match_is_sole_result() {
        let engine = QueryEngine::new(create_test_graph());
        let ranked = engine.query(&QueryParams::new().with_title("Road to Perdition"));

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].title, "Road to Perdition");
        assert_eq!(ranked[0].score, 1.0);
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let engine = QueryEngine::new(create_test_graph());
        assert!(engine.query(&QueryParams::new()).is_empty());
        assert!(engine.query(&QueryParams::new().with_genre("  ")).is_empty());
    }

    #[test]
    fn test_unresolved_references_contribute_nothing() {
        let engine = QueryEngine::new(create_test_graph());

        let params = QueryParams::new()
            .with_title("Schindler's List")
            .with_same_as(AttributeKind::Actor, "Jaws");
        assert!(engine.query(&params).is_empty());

        // An unresolved reference does not dilute the literal values
        let params = QueryParams::new()
            .with_year(1993)
            .with_same_as(AttributeKind::Actor, "Jaws");
        let ranked = engine.query(&params);
        assert_eq!(titles(&ranked), vec!["Jurassic Park"]);
        assert_eq!(ranked[0].score, 1.0);
    }

    #[test]
    fn test_result_limit() {
        let engine = QueryEngine::new(create_test_graph()).with_result_limit(1);
        let ranked = engine.query(&QueryParams::new().with_genre("Crime"));
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].title, "Catch Me If You Can");
        assert_eq!(engine.config().result_limit, 1);
    }

    #[test]
    fn test_free_function_matches_engine() {
        let graph = create_test_graph();
        let engine = QueryEngine::new(graph.clone());
        let params = QueryParams::new().with_actor("Tom");

        assert_eq!(query(&graph, &params), engine.query(&params));
    }
}
