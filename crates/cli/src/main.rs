use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{fields, load_movies, summarize, LoadSummary};
use graph::{GraphBuilder, MovieDetails, MovieGraph};
use query::{AttributeKind, QueryParams};
use server::{MovieSearchService, ResultFraming, SearchResponse};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// Movie Graph - similarity search over a movie knowledge graph
#[derive(Parser)]
#[command(name = "movie-graph")]
#[command(about = "Find movies by shared year, genre, director and cast", long_about = None)]
struct Cli {
    /// Path to the IMDB top 1000 CSV file
    #[arg(short, long, default_value = "data/imdb_top_1000.csv")]
    data_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a structured query
    Query {
        /// Find movies like this title (uses all of its attributes)
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        genre: Option<String>,

        #[arg(long)]
        director: Option<String>,

        #[arg(long)]
        actor: Option<String>,

        /// Use another title's values for one attribute, e.g. director=Heat
        #[arg(long = "same-as", value_name = "KIND=TITLE", value_parser = parse_same_as)]
        same_as: Vec<(AttributeKind, String)>,

        /// Maximum number of results
        #[arg(long, default_value = "5")]
        limit: usize,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search with pre-translated YAML or JSON parameters
    Ask {
        /// Parameter text, e.g. "year: 2004"
        #[arg(long, conflicts_with = "params_file", required_unless_present = "params_file")]
        params: Option<String>,

        /// File holding the parameter text
        #[arg(long)]
        params_file: Option<PathBuf>,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the full record of one title
    Show {
        /// Exact title
        #[arg(long)]
        title: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show dataset and graph statistics
    Stats,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the dataset and build the graph
    println!("Loading movies from {}...", cli.data_file.display());
    let start = Instant::now();
    let records = load_movies(&cli.data_file).context("Failed to load movie dataset")?;
    let summary = summarize(&records);
    let graph = Arc::new(GraphBuilder::build(records).context("Failed to build movie graph")?);
    println!("{} Built graph in {:?}", "✓".green(), start.elapsed());
    info!("Graph ready: {}", graph.stats());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Query {
            title,
            year,
            genre,
            director,
            actor,
            same_as,
            limit,
            json,
        } => {
            let params = QueryParams {
                title,
                year,
                genre,
                director,
                actor,
                same_attributes_as: same_as.into_iter().collect(),
            };
            handle_query(graph, params, limit, json)?
        }
        Commands::Ask {
            params,
            params_file,
            json,
        } => handle_ask(graph, params, params_file, json)?,
        Commands::Show { title, json } => handle_show(&graph, &title, json)?,
        Commands::Stats => handle_stats(&graph, summary),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(graph, requests, concurrent).await?,
    }

    Ok(())
}

/// Parse a `KIND=TITLE` pair for `--same-as`
fn parse_same_as(s: &str) -> std::result::Result<(AttributeKind, String), String> {
    let (kind, title) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KIND=TITLE, got '{}'", s))?;
    let title = title.trim();
    if title.is_empty() {
        return Err("title must not be empty".to_string());
    }
    Ok((kind.parse()?, title.to_string()))
}

/// Handle the 'query' command
fn handle_query(graph: Arc<MovieGraph>, params: QueryParams, limit: usize, json: bool) -> Result<()> {
    if params.is_empty() {
        return Err(anyhow!(
            "Nothing to search for; pass at least one of --title, --year, --genre, --director, --actor, --same-as"
        ));
    }

    debug!(?params, limit, "Running structured query");
    let service = MovieSearchService::new(graph).with_result_limit(limit);
    let response = service.search(&params);
    print_response(&response, json)
}

/// Handle the 'ask' command
fn handle_ask(
    graph: Arc<MovieGraph>,
    params: Option<String>,
    params_file: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let text = match (params, params_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => return Err(anyhow!("Pass --params or --params-file")),
    };

    // The parameters are already translated; hand them through unchanged
    let translator = move |_: &str| -> Result<String> { Ok(text.clone()) };

    let service = MovieSearchService::new(graph);
    let response = service.ask(&translator, "pre-translated parameters")?;
    print_response(&response, json)
}

/// Handle the 'show' command
fn handle_show(graph: &MovieGraph, title: &str, json: bool) -> Result<()> {
    let details = graph
        .project(title)
        .with_context(|| format!("Cannot show '{}'", title))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
    } else {
        println!("{}", format!("{} ({})", details.title, details.year).bold().blue());
        print_details(&details);
    }
    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(graph: &MovieGraph, summary: LoadSummary) {
    let stats = graph.stats();

    println!("{}", "Dataset:".bold().blue());
    println!("{}Records: {}", "• ".green(), summary.records);
    println!("{}Duplicate titles merged: {}", "• ".green(), summary.duplicate_titles);

    println!("{}", "Graph:".bold().blue());
    println!("{}Titles: {}", "• ".cyan(), stats.titles);
    println!("{}Years: {}", "• ".cyan(), stats.years);
    println!("{}Genres: {}", "• ".cyan(), stats.genres);
    println!("{}Directors: {}", "• ".cyan(), stats.directors);
    println!("{}Actors: {}", "• ".cyan(), stats.actors);
    println!("{}Nodes: {}", "• ".cyan(), stats.nodes());
    println!("{}Edges: {}", "• ".cyan(), stats.edges);
}

/// Handle the 'benchmark' command
///
/// Each request is a "movies like this one" query for a random title.
async fn handle_benchmark(graph: Arc<MovieGraph>, requests: usize, concurrent: usize) -> Result<()> {
    if requests == 0 {
        return Err(anyhow!("--requests must be at least 1"));
    }

    let titles: Vec<String> = graph.titles().map(str::to_string).collect();
    if titles.is_empty() {
        return Err(anyhow!("The graph has no titles to query"));
    }

    let service = MovieSearchService::new(graph);
    let permits = Arc::new(Semaphore::new(concurrent.max(1)));

    // Use tokio::spawn to make concurrent requests
    let start = Instant::now();
    let mut handles = Vec::with_capacity(requests);
    for _ in 0..requests {
        let title = titles[rand::random_range(0..titles.len())].clone();
        let service = service.clone();
        let permits = permits.clone();
        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let request_start = Instant::now();
            service
                .search_blocking(QueryParams::new().with_title(title))
                .await?;
            Ok::<_, anyhow::Error>(request_start.elapsed())
        }));
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = Vec::with_capacity(requests);
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = start.elapsed();

    timings.sort();
    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;
    let percentile = |p: f64| timings[((timings.len() - 1) as f64 * p).round() as usize];
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent.max(1));
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Print a search response as text or JSON
fn print_response(response: &SearchResponse, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(());
    }

    let headline = match response.framing {
        ResultFraming::Exact => response.headline().bold().green(),
        ResultFraming::Similar => response.headline().bold().yellow(),
        ResultFraming::NoResults => response.headline().bold().red(),
    };
    println!("{}", headline);

    for (i, (scored, details)) in response.iter().enumerate() {
        println!(
            "{}. {} ({}) - Score: {:.2} ({}/{})",
            (i + 1).to_string().green(),
            details.title.bold(),
            details.year,
            scored.score,
            scored.matched,
            scored.total
        );
        print_details(details);
    }
    Ok(())
}

/// Helper function to print the attributes of one title
fn print_details(details: &MovieDetails) {
    println!("   Genres: {}", details.genres.join(", "));
    println!("   Directed by: {}", details.directors.join(", "));
    println!("   Starring: {}", details.actors.join(", "));
    if let Some(rating) = details.payload.get(fields::RATING) {
        println!("   Rating: {}", rating);
    }
    if let Some(runtime) = details.payload.get(fields::RUNTIME) {
        println!("   Runtime: {} min", runtime);
    }
    if let Some(overview) = details.payload.get(fields::OVERVIEW) {
        println!("   {}", overview.to_string().italic());
    }
}
