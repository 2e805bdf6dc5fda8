use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::Catalog;
use engine::{GestaltMatcher, LevenshteinMatcher, ResolverConfig};
use rand::Rng;
use server::config::parse_cutoff;
use server::{MovieSummary, RecommendationService};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// ReelRecs - Content-Based Movie Recommendations
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Content-based movie recommendations from title, genre, cast and crew text", long_about = None)]
struct Cli {
    /// Path to the movie catalog CSV
    #[arg(short, long, default_value = "data/movies.csv")]
    catalog: PathBuf,

    /// Minimum title similarity (0.0 - 1.0) for a query to match
    #[arg(long, default_value_t = 0.6, value_parser = parse_cutoff)]
    cutoff: f64,

    /// Match titles case-insensitively
    #[arg(long)]
    ignore_case: bool,

    /// String similarity used to match titles
    #[arg(long, value_enum, default_value_t = MatcherKind::Gestalt)]
    matcher: MatcherKind,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MatcherKind {
    /// Ratcliff/Obershelp pattern matching
    Gestalt,
    /// Normalized edit distance
    Levenshtein,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movies similar to a title
    Recommend {
        /// Movie title (typos are fine)
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// Show the catalog titles closest to a query
    Search {
        /// Movie title to look up (fuzzy match)
        #[arg(long)]
        title: String,
    },

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
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading catalog from {}...", cli.catalog.display());
    let start = Instant::now();
    let catalog = Catalog::load_from_csv(&cli.catalog)
        .with_context(|| format!("Failed to load catalog from {}", cli.catalog.display()))?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );

    // Building the similarity matrix is the slow part
    let start = Instant::now();
    let service = Arc::new(build_service(catalog, &cli));
    println!(
        "{} Built content model ({} terms) in {:?}",
        "✓".green(),
        service.model().vocabulary_len(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend { title, limit } => handle_recommend(&service, &title, limit)?,
        Commands::Search { title } => handle_search(&service, &title),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(service, requests, concurrent).await?,
    }

    Ok(())
}

fn build_service(catalog: Catalog, cli: &Cli) -> RecommendationService {
    let config = ResolverConfig {
        cutoff: cli.cutoff,
        ignore_case: cli.ignore_case,
        ..Default::default()
    };
    let service = RecommendationService::new(Arc::new(catalog), config);
    match cli.matcher {
        MatcherKind::Gestalt => service.with_matcher(GestaltMatcher::new()),
        MatcherKind::Levenshtein => service.with_matcher(LevenshteinMatcher::new()),
    }
}

/// Handle the 'recommend' command
fn handle_recommend(service: &RecommendationService, title: &str, limit: usize) -> Result<()> {
    let Some(found) = service.recommend_with_seed(title, limit)? else {
        println!("{} No movie found matching '{}'", "✗".red(), title);
        return Ok(());
    };
    if found.seed.title != title {
        println!(
            "Showing results for {} (similarity {:.2})",
            found.seed.title.bold(),
            found.seed.score
        );
    }

    print_recommendations(&found.seed.title, &found.movies);
    Ok(())
}

/// Handle the 'search' command
fn handle_search(service: &RecommendationService, title: &str) {
    let matches = service.close_matches(title);
    if matches.is_empty() {
        println!("{} No titles close to '{}'", "✗".red(), title);
        return;
    }

    println!("{}", format!("Closest titles to '{}':", title).bold().blue());
    for candidate in matches {
        let Some(item) = service.catalog().get_item(candidate.id) else {
            continue;
        };
        let summary = MovieSummary::from_item(item);
        println!(
            "{}: {} {} [{}] - similarity {:.2}",
            candidate.id.to_string().green(),
            summary.title,
            year_suffix(&summary.year),
            summary.genres,
            candidate.score
        );
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    service: Arc<RecommendationService>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    anyhow::ensure!(requests > 0, "--requests must be at least 1");
    let titles: Vec<String> = service.catalog().titles().map(str::to_string).collect();

    // Random catalog titles, so every request resolves and ranks
    let queries: Vec<String> = {
        let mut rng = rand::rng();
        (0..requests)
            .map(|_| titles[rng.random_range(0..titles.len())].clone())
            .collect()
    };

    // Use tokio::spawn to make concurrent requests, at most `concurrent` in flight
    let limiter = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();
    let mut handles = vec![];
    for query in queries {
        let service = service.clone();
        let limiter = limiter.clone();
        let handle = tokio::spawn(async move {
            let _permit = limiter.acquire_owned().await?;
            let start = Instant::now();
            tokio::task::spawn_blocking(move || service.recommend(&query, 10)).await??;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / (timings.len() as u32);
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
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

/// Helper function to format and print recommendations
fn print_recommendations(seed_title: &str, recommendations: &[MovieSummary]) {
    if recommendations.is_empty() {
        println!("No recommendations found for {}", seed_title);
        return;
    }

    println!(
        "{}",
        format!("Because you liked {}:", seed_title).bold().blue()
    );
    for (i, movie) in recommendations.iter().enumerate() {
        let rating = movie
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}. {} {} [{}] - Rating: {}",
            (i + 1).to_string().green(),
            movie.title.bold(),
            year_suffix(&movie.year),
            movie.genres,
            rating
        );
        if !movie.director.is_empty() {
            println!("   Directed by {}", movie.director);
        }
        if !movie.tagline.is_empty() {
            println!("   {}", movie.tagline.italic());
        }
    }
}

fn year_suffix(year: &str) -> String {
    if year.is_empty() {
        String::new()
    } else {
        format!("({})", year)
    }
}
