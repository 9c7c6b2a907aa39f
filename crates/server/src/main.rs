//! Simple test harness for the search service.
//!
//! This binary loads the movie catalog, builds the graph and runs a few
//! sample searches end to end.
//!
//! Usage: server [DATA_FILE]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use data_loader::load_movies;
use graph::GraphBuilder;
use query::{AttributeKind, QueryParams};
use server::MovieSearchService;

const DEFAULT_DATA_FILE: &str = "data/imdb_top_1000.csv";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,query=debug")),
        )
        .init();

    info!("Starting movie graph search test harness");

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    info!("Loading movies from {}...", path.display());
    let records = load_movies(&path)
        .with_context(|| format!("Failed to load movies from {}", path.display()))?;

    let graph = GraphBuilder::build(records).context("Failed to build movie graph")?;
    let service = MovieSearchService::new(Arc::new(graph));
    info!("Graph ready: {}", service.graph().stats());

    let samples = [
        QueryParams::new().with_year(2002).with_director("Spielberg"),
        QueryParams::new().with_title("Catch Me If You Can"),
        QueryParams::new()
            .with_genre("Drama")
            .with_same_as(AttributeKind::Actor, "Cast Away"),
    ];

    for params in samples {
        info!("Searching for {:?}", params);
        let response = service.search_blocking(params).await?;

        info!("{}:", response.headline());
        for (i, (scored, details)) in response.iter().enumerate() {
            info!(
                "{}. {} ({}) - Score: {:.3}",
                i + 1,
                details.title,
                details.year,
                scored.score
            );
            info!("   Genres: {}", details.genres.join(", "));
            info!("   Directed by {}", details.directors.join(", "));
        }
    }

    Ok(())
}
