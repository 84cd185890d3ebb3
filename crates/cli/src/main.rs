use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{ItemPolicy, MediaItem, RankedRecommendation, ScoringEngine, UserProfile};
use payload::{load_request, ScoringRequest};
use rand::Rng;
use server::ServerConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

const GENRES: [&str; 10] = [
    "ACTION",
    "ADVENTURE",
    "COMEDY",
    "DRAMA",
    "FANTASY",
    "HORROR",
    "MYSTERY",
    "ROMANCE",
    "SCI_FI",
    "THRILLER",
];

/// recs - genre-affinity recommendation scoring
#[derive(Parser)]
#[command(name = "recs")]
#[command(about = "Score media catalogs against user genre preferences")]
#[command(long_about = "Score media catalogs against user genre preferences.

Blend weights, the default limit and the item policy come from the same
RECS_* variables (and .env) the server reads: RECS_CONTENT_WEIGHT,
RECS_POPULARITY_WEIGHT, RECS_DEFAULT_LIMIT and RECS_ITEM_POLICY.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a request file's catalog for its user
    Recommend {
        /// JSON request file (user_profile, available_media, limit)
        #[arg(long)]
        request: PathBuf,

        /// Override the request's limit
        #[arg(long)]
        limit: Option<i64>,

        /// Show content, popularity and blended score for each item
        #[arg(long)]
        explain: bool,

        /// Print the response envelope as JSON
        #[arg(long)]
        json: bool,

        /// Reject the request if any catalog record has no usable id,
        /// whatever RECS_ITEM_POLICY says
        #[arg(long)]
        strict: bool,
    },

    /// Show the genre profile carried by a request file
    Profile {
        #[arg(long)]
        request: PathBuf,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Use this request instead of a synthetic one
        #[arg(long)]
        request: Option<PathBuf>,

        /// Catalog size for the synthetic request
        #[arg(long, default_value = "1000")]
        items: usize,

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

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            request,
            limit,
            explain,
            json,
            strict,
        } => handle_recommend(&request, limit, explain, json, strict)?,
        Commands::Profile { request } => handle_profile(&request)?,
        Commands::Benchmark {
            request,
            items,
            requests,
            concurrent,
        } => handle_benchmark(request.as_deref(), items, requests, concurrent).await?,
    }

    Ok(())
}

/// Engine configured from `RECS_*` variables, like the server's.
fn configured_engine() -> Result<ScoringEngine> {
    let config = ServerConfig::from_env()?;
    let engine_config = config
        .engine_config()
        .context("Invalid RECS_* engine settings")?;
    Ok(ScoringEngine::with_config(engine_config))
}

fn read_request(path: &Path) -> Result<ScoringRequest> {
    load_request(path).with_context(|| format!("Failed to load request {}", path.display()))
}

/// Handle the 'recommend' command
fn handle_recommend(
    path: &Path,
    limit: Option<i64>,
    explain: bool,
    json: bool,
    strict: bool,
) -> Result<()> {
    let mut request = read_request(path)?;
    if limit.is_some() {
        request.limit = limit;
    }

    let mut engine = configured_engine()?;
    if strict {
        engine = engine.with_item_policy(ItemPolicy::Strict);
    }

    let start = Instant::now();
    let response = request
        .evaluate(&engine)
        .context("Failed to score request")?;
    let elapsed = start.elapsed();

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!(
        "{} Scored {} candidates for user {} in {:?}",
        "✓".green(),
        request.media.len(),
        response.user_id.bold(),
        elapsed
    );
    print_recommendations(&response.recommendations, explain);
    Ok(())
}

/// Handle the 'profile' command
fn handle_profile(path: &Path) -> Result<()> {
    let request = read_request(path)?;
    let profile = &request.profile;

    println!("{}", format!("User ID: {}", profile.user_id).bold().blue());
    match profile.total_engagement_score {
        Some(total) => println!("{}Total engagement: {:.2}", "• ".green(), total),
        None => println!("{}Total engagement: -", "• ".green()),
    }
    println!(
        "{}Already interacted: {} items",
        "• ".green(),
        profile.interacted_media_ids.len()
    );
    println!("{}Catalog size: {} items", "• ".green(), request.media.len());

    let ranked = profile.ranked_genres();
    if ranked.is_empty() {
        println!("No genre preferences; ranking falls back to popularity.");
        return Ok(());
    }

    // Rescaled by the largest weight; the total must stay finite.
    let max = profile.max_weight();
    let total: f64 = ranked
        .iter()
        .map(|(genre, _)| profile.clamped_weight(genre) / max)
        .sum();
    println!("Genre preferences:");
    for (genre, weight) in &ranked {
        let share = if max > 0.0 && total > 0.0 {
            profile.clamped_weight(genre) / max / total * 100.0
        } else {
            0.0
        };
        println!("  - {:<12} {:>8.2} ({:>5.1}%)", genre, weight, share);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    path: Option<&Path>,
    items: usize,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    anyhow::ensure!(requests > 0, "--requests must be at least 1");

    let request = match path {
        Some(path) => read_request(path)?,
        None => synthetic_request(items),
    };
    println!(
        "Benchmarking {} requests over {} candidates ({} concurrent)",
        requests,
        request.media.len(),
        concurrent.max(1)
    );

    let engine = Arc::new(configured_engine()?);
    let request = Arc::new(request);
    let permits = Arc::new(Semaphore::new(concurrent.max(1)));

    let wall_clock = Instant::now();
    let mut handles = Vec::with_capacity(requests);
    for _ in 0..requests {
        let engine = Arc::clone(&engine);
        let request = Arc::clone(&request);
        let permits = Arc::clone(&permits);
        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let start = Instant::now();
            tokio::task::spawn_blocking(move || request.evaluate(&engine)).await??;
            Ok::<_, anyhow::Error>(start.elapsed())
        }));
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = Vec::with_capacity(requests);
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();

    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / timings.len() as u32;
    timings.sort();
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(&timings, 0.50));
    println!("P95 latency: {:?}", percentile(&timings, 0.95));
    println!("P99 latency: {:?}", percentile(&timings, 0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Nearest-rank percentile of an ascending slice.
fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let rank = (p * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

/// Random profile and catalog for benchmarking.
fn synthetic_request(items: usize) -> ScoringRequest {
    let mut rng = rand::rng();

    let mut profile = UserProfile::new("benchmark-user");
    for genre in GENRES {
        if rng.random_bool(0.6) {
            profile = profile.with_genre(genre, rng.random_range(0.0..10.0));
        }
    }

    let media: Vec<MediaItem> = (0..items)
        .map(|i| {
            let tags = rng.random_range(1..=3);
            let genres: Vec<&str> = (0..tags)
                .map(|_| GENRES[rng.random_range(0..GENRES.len())])
                .collect();
            MediaItem::new(format!("media-{i}"), genres, rng.random_range(0.0..1.0))
        })
        .collect();

    for item in media.iter().take(items / 10) {
        profile = profile.with_interaction(item.media_id.clone());
    }

    ScoringRequest {
        profile,
        media,
        limit: Some(20),
    }
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[RankedRecommendation], explain: bool) {
    println!("{}", "Recommendations:".bold().blue());
    if recommendations.is_empty() {
        println!("  (none)");
        return;
    }

    for (i, rec) in recommendations.iter().enumerate() {
        let title = rec.details.title.as_deref().unwrap_or(&rec.media_id);
        let year = rec
            .details
            .release_year
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        println!(
            "{}. {}{} [{}] - Score: {:.3}",
            (i + 1).to_string().green(),
            title,
            year,
            rec.genres.join(", "),
            rec.recommendation_score
        );
        if explain {
            println!(
                "   id: {}  content: {:.3}  popularity: {:.3}",
                rec.media_id, rec.content_score, rec.popularity_score
            );
        }
    }
}
