//! # Movie Search Service
//!
//! This module coordinates a search request end to end:
//! 1. (Optional) translate a natural-language question into parameters
//! 2. Read the parameters defensively
//! 3. Rank titles with the query engine
//! 4. Project every ranked title into a full record
//! 5. Frame the result as exact or similar matches
//!
//! The engine output is passed along as structured data; nothing is
//! rendered to text and parsed back.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use graph::{MovieDetails, MovieGraph};
use query::{QueryEngine, QueryParams, ScoredTitle};

/// Turns a user question into query parameter text (YAML or JSON)
///
/// The language-model backed implementation lives outside this crate. Any
/// `Fn(&str) -> Result<String>` closure is a translator, which is what tests
/// and the CLI use.
pub trait QueryTranslator: Send + Sync {
    fn translate(&self, question: &str) -> Result<String>;
}

impl<F> QueryTranslator for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn translate(&self, question: &str) -> Result<String> {
        self(question)
    }
}

/// How the presentation layer should describe the results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultFraming {
    /// Every result matched all queried values
    Exact,
    /// Best partial matches
    Similar,
    NoResults,
}

impl ResultFraming {
    fn from_matches(matches: &[ScoredTitle]) -> Self {
        match matches.first() {
            None => ResultFraming::NoResults,
            Some(best) if best.is_exact() => ResultFraming::Exact,
            Some(_) => ResultFraming::Similar,
        }
    }
}

/// Result of one search, ready for presentation
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub framing: ResultFraming,
    /// Ranked titles, best first
    pub matches: Vec<ScoredTitle>,
    /// Full record of each ranked title, same order as `matches`
    pub movies: Vec<MovieDetails>,
}

impl SearchResponse {
    pub fn headline(&self) -> &'static str {
        match self.framing {
            ResultFraming::Exact => "Here are the movies that match exactly what you asked for",
            ResultFraming::Similar => "Here are the movies that are similar to what you asked for",
            ResultFraming::NoResults => "No movies matched what you asked for",
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Ranked entries paired with their details
    pub fn iter(&self) -> impl Iterator<Item = (&ScoredTitle, &MovieDetails)> {
        self.matches.iter().zip(self.movies.iter())
    }
}

/// Main service that coordinates query and projection
#[derive(Clone)]
pub struct MovieSearchService {
    engine: QueryEngine,
}

impl MovieSearchService {
    /// Create a service over a built graph (result limit: 5)
    pub fn new(graph: Arc<MovieGraph>) -> Self {
        Self {
            engine: QueryEngine::new(graph),
        }
    }

    /// Configure the maximum number of results
    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.engine = self.engine.with_result_limit(limit);
        self
    }

    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    pub fn graph(&self) -> &Arc<MovieGraph> {
        self.engine.graph()
    }

    /// Rank, project and frame one query
    pub fn search(&self, params: &QueryParams) -> SearchResponse {
        let start_time = Instant::now();

        let matches = self.engine.query(params);
        let movies = self.project_matches(&matches);
        let framing = ResultFraming::from_matches(&matches);

        info!(
            "Search returned {} results ({:?}) in {:.2?}",
            matches.len(),
            framing,
            start_time.elapsed()
        );

        SearchResponse {
            framing,
            matches,
            movies,
        }
    }

    /// Translate a question, then search
    ///
    /// Fails only if the translator fails or its output is not a key/value
    /// document. Unknown or malformed fields inside the document are ignored.
    pub fn ask(&self, translator: &dyn QueryTranslator, question: &str) -> Result<SearchResponse> {
        let text = translator
            .translate(question)
            .context("Failed to translate question")?;
        debug!(question, params = %text, "Translated question");

        let params = QueryParams::from_yaml(&text)
            .context("Translator returned unusable query parameters")?;
        if params.is_empty() {
            warn!(question, "Translation produced no usable parameters");
        }

        Ok(self.search(&params))
    }

    /// Run [`search`](Self::search) on the blocking thread pool
    ///
    /// Ranking is CPU-bound; this keeps it off the async workers.
    pub async fn search_blocking(&self, params: QueryParams) -> Result<SearchResponse> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.search(&params))
            .await
            .context("Search task panicked")
    }

    /// Expand ranked titles into full records
    ///
    /// Ranked titles come from the catalog, so a miss is a broken invariant:
    /// fatal in debug builds, skipped with a warning otherwise.
    fn project_matches(&self, matches: &[ScoredTitle]) -> Vec<MovieDetails> {
        matches
            .iter()
            .filter_map(|scored| match self.graph().project(&scored.title) {
                Ok(details) => Some(details),
                Err(err) => {
                    debug_assert!(false, "ranked title missing from graph: {}", err);
                    warn!("Skipping ranked title: {}", err);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use data_loader::{fields, MovieRecord};
    use graph::GraphBuilder;

    fn build_test_graph() -> Arc<MovieGraph> {
        let records = vec![
            MovieRecord::new("Catch Me If You Can", 2002)
                .with_genres(["Biography", "Crime", "Drama"])
                .with_directors(["Steven Spielberg"])
                .with_actors(["Leonardo DiCaprio", "Tom Hanks", "Christopher Walken", "Martin Sheen"])
                .with_attribute(fields::RUNTIME, 141_i64),
            MovieRecord::new("Minority Report", 2002)
                .with_genres(["Action", "Crime", "Mystery"])
                .with_directors(["Steven Spielberg"])
                .with_actors(["Tom Cruise", "Colin Farrell", "Samantha Morton", "Max von Sydow"]),
            MovieRecord::new("Eternal Sunshine of the Spotless Mind", 2004)
                .with_genres(["Drama", "Romance", "Sci-Fi"])
                .with_directors(["Michel Gondry"])
                .with_actors(["Jim Carrey", "Kate Winslet", "Tom Wilkinson", "Gerry Robert Byrne"]),
        ];
        Arc::new(GraphBuilder::build(records).expect("Failed to build test graph"))
    }

    fn build_test_service() -> MovieSearchService {
        MovieSearchService::new(build_test_graph())
    }

    // ============================================================================
    // search
    // ============================================================================

    #[test]
    fn test_search_exact_matches() {
        let service = build_test_service();
        let params = QueryParams::new().with_year(2002).with_director("Spielberg");

        let response = service.search(&params);

        assert_eq!(response.framing, ResultFraming::Exact);
        assert_eq!(response.matches.len(), 2);
        assert_eq!(response.movies.len(), 2);
        for (scored, details) in response.iter() {
            assert_eq!(scored.title, details.title);
            assert_eq!(details.directors, vec!["Steven Spielberg"]);
        }
        assert!(response.headline().contains("exactly"));
    }

    #[test]
    fn test_search_similar_matches() {
        let service = build_test_service();
        let params = QueryParams::new().with_year(2004).with_director("Spielberg");

        let response = service.search(&params);

        assert_eq!(response.framing, ResultFraming::Similar);
        assert_eq!(
            response.headline(),
            "Here are the movies that are similar to what you asked for"
        );
        assert!(response.matches.iter().all(|m| m.score == 0.5));
    }

    #[test]
    fn test_search_no_results() {
        let service = build_test_service();
        let response = service.search(&QueryParams::new());

        assert_eq!(response.framing, ResultFraming::NoResults);
        assert!(response.is_empty());
        assert!(response.movies.is_empty());
    }

    #[test]
    fn test_result_limit() {
        let service = build_test_service().with_result_limit(1);
        let response = service.search(&QueryParams::new().with_genre("Crime"));
        assert_eq!(response.matches.len(), 1);
        assert_eq!(service.engine().config().result_limit, 1);
    }

    #[test]
    fn test_response_serializes_structured() {
        let service = build_test_service();
        let response = service.search(&QueryParams::new().with_title("Catch Me If You Can"));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["framing"], "exact");
        assert_eq!(json["matches"][0]["title"], "Catch Me If You Can");
        assert_eq!(json["matches"][0]["score"], 1.0);
        assert_eq!(json["movies"][0]["Runtime"], 141);
    }

    // ============================================================================
    // ask
    // ============================================================================

    #[test]
    fn test_ask_with_closure_translator() {
        let service = build_test_service();
        let translator = |_: &str| -> Result<String> {
            Ok("same_attributes_as:\n    director: Catch Me If You Can\n".to_string())
        };

        let response = service
            .ask(&translator, "Movies by whoever made Catch Me If You Can")
            .unwrap();

        let titles: Vec<&str> = response.matches.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Catch Me If You Can", "Minority Report"]);
    }

    #[test]
    fn test_ask_ignores_unknown_fields() {
        let service = build_test_service();
        let translator =
            |_: &str| -> Result<String> { Ok("genre: Romance\nmood: wistful\n".to_string()) };

        let response = service.ask(&translator, "Something wistful").unwrap();
        assert_eq!(response.matches[0].title, "Eternal Sunshine of the Spotless Mind");
    }

    #[test]
    fn test_ask_translator_failure() {
        let service = build_test_service();
        let translator = |_: &str| -> Result<String> { Err(anyhow!("service unavailable")) };

        let err = service.ask(&translator, "anything").unwrap_err();
        assert!(err.to_string().contains("Failed to translate question"));
    }

    #[test]
    fn test_ask_unreadable_translation() {
        let service = build_test_service();
        let translator = |_: &str| -> Result<String> { Ok("year: [2002".to_string()) };

        assert!(service.ask(&translator, "anything").is_err());
    }

    // ============================================================================
    // search_blocking
    // ============================================================================

    #[tokio::test]
    async fn test_search_blocking_matches_search() {
        let service = build_test_service();
        let params = QueryParams::new().with_actor("Tom");

        let expected = service.search(&params);
        let response = service.search_blocking(params).await.unwrap();

        assert_eq!(response.matches, expected.matches);
        assert_eq!(response.movies, expected.movies);
    }

    #[tokio::test]
    async fn test_concurrent_searches_share_graph() {
        let service = build_test_service();

        let handles: Vec<_> = ["Catch Me If You Can", "Minority Report"]
            .into_iter()
            .map(|title| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .search_blocking(QueryParams::new().with_title(title))
                        .await
                })
            })
            .collect();

        for handle in handles {
            let response = handle.await.unwrap().unwrap();
            assert_eq!(response.framing, ResultFraming::Exact);
            assert_eq!(response.matches.len(), 1);
        }
    }
}
