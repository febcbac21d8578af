//! reviewpulse CLI
//!
//! Interactive exploration of airline review datasets: filter, aggregate,
//! and render summaries from the terminal.

mod config;
mod progress;
mod tui;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use reviewpulse_core::{
    keyword_corpus, monthly_trend, platform_histogram, rating_histogram, ReviewSummary, Sentiment,
};
use reviewpulse_filters::{FilterSpec, KeywordExtractor};
use reviewpulse_formats::{cached_reviews, ReviewReader};

use config::FilterOverrides;

#[derive(Parser)]
#[command(name = "reviewpulse")]
#[command(version, about = "Interactive airline review exploration dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output reports in JSON format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print summary metrics and distributions for a filtered dataset
    Summary {
        /// Input reviews file (.csv, or .gz for gzip-compressed CSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Filter config file (YAML or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Inclusive start date (YYYY-MM-DD; defaults to 12 months before
        /// the newest review)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Inclusive end date (YYYY-MM-DD; defaults to the newest review)
        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Platform to include; repeat for several (defaults to all present)
        #[arg(long = "platform")]
        platforms: Vec<String>,

        /// Review type to include; repeat for several (defaults to all present)
        #[arg(long = "type")]
        types: Vec<String>,

        /// Minimum rating (defaults to the dataset minimum)
        #[arg(long)]
        rating_min: Option<i64>,

        /// Maximum rating (defaults to the dataset maximum)
        #[arg(long)]
        rating_max: Option<i64>,

        /// Number of keywords per sentiment panel
        #[arg(long, default_value = "15")]
        keywords: usize,
    },

    /// Print the first normalized records of a dataset
    Inspect {
        /// Path to the reviews file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Number of records to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Count records in a dataset
    Count {
        /// Path to the reviews file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Launch the interactive dashboard
    Tui {
        /// Input reviews file (.csv, or .gz for gzip-compressed CSV)
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_ansi(!cli.json) // Disable colors if JSON output
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Summary {
            input,
            config,
            start_date,
            end_date,
            platforms,
            types,
            rating_min,
            rating_max,
            keywords,
        } => {
            summary(
                input, config, start_date, end_date, platforms, types, rating_min, rating_max,
                keywords, cli.json,
            )
            .await?;
        }
        Commands::Inspect { input, limit } => {
            inspect_dataset(input, limit).await?;
        }
        Commands::Count { input } => {
            count_dataset(input).await?;
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
        Commands::Tui { input } => {
            tui::run_tui(input)?;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn summary(
    input: PathBuf,
    config: Option<PathBuf>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    platforms: Vec<String>,
    types: Vec<String>,
    rating_min: Option<i64>,
    rating_max: Option<i64>,
    keywords: usize,
    json_output: bool,
) -> Result<()> {
    info!("Loading reviews from {:?}", input);
    let data = cached_reviews(&input)?;

    // Dataset defaults, then config file, then CLI flags
    let mut spec = FilterSpec::defaults_for(&data);
    if let Some(config_path) = config {
        spec = FilterOverrides::load(&config_path)?.apply(spec);
    }
    let flags = FilterOverrides {
        start_date,
        end_date,
        platforms: if platforms.is_empty() { None } else { Some(platforms) },
        types: if types.is_empty() { None } else { Some(types) },
        rating_min,
        rating_max,
    };
    let (spec, swapped) = flags.apply(spec).normalized();
    if swapped {
        info!("Swapped dates so start is before end");
    }

    let filtered = spec.apply(&data);
    let summary = ReviewSummary::compute(&filtered);
    let ratings = rating_histogram(&filtered);
    let platforms_by_count = platform_histogram(&filtered);
    let trend = monthly_trend(&filtered);

    let extractor = KeywordExtractor::new();
    let positive =
        extractor.top_keywords(&keyword_corpus(&filtered, Sentiment::Positive), keywords);
    let negative =
        extractor.top_keywords(&keyword_corpus(&filtered, Sentiment::Negative), keywords);

    if json_output {
        let keyword_json = |ranked: &[(String, usize)]| {
            ranked
                .iter()
                .map(|(word, count)| serde_json::json!({ "word": word, "count": count }))
                .collect::<Vec<_>>()
        };
        let report = serde_json::json!({
            "input": input.to_string_lossy().to_string(),
            "filters": spec,
            "date_range_swapped": swapped,
            "summary": summary,
            "banner": summary.banner(),
            "rating_histogram": ratings,
            "platform_histogram": platforms_by_count,
            "monthly_trend": trend,
            "positive_keywords": keyword_json(&positive),
            "negative_keywords": keyword_json(&negative),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        progress::print_dashboard_report(
            &input,
            &spec,
            swapped,
            &summary,
            &ratings,
            &platforms_by_count,
            &trend,
            &positive,
            &negative,
        );
    }

    Ok(())
}

async fn inspect_dataset(input: PathBuf, limit: usize) -> Result<()> {
    info!("Inspecting dataset: {:?}", input);

    let mut reader = ReviewReader::open(&input)?;
    let mut count = 0;

    while let Some(result) = reader.next() {
        let record = result?;
        println!(
            "Record #{}: {}",
            record.source_line,
            serde_json::to_string_pretty(&record)?
        );

        count += 1;
        if count >= limit {
            break;
        }
    }

    info!(
        "Processed {} records ({} bytes)",
        reader.records_processed(),
        reader.bytes_processed()
    );

    Ok(())
}

async fn count_dataset(input: PathBuf) -> Result<()> {
    info!("Counting records in: {:?}", input);

    let mut reader = ReviewReader::open(&input)?;

    let pb = reader.total_bytes().map(progress::byte_progress_bar);

    let mut count = 0;
    while let Some(result) = reader.next() {
        let _record = result?;
        count += 1;

        if let Some(ref pb) = pb {
            pb.set_position(reader.bytes_processed());
        }

        if count % 10000 == 0 {
            info!("Processed {} records...", count);
        }
    }

    if let Some(pb) = pb {
        pb.finish();
    }

    println!("Total records: {}", count);
    info!("Processed {} bytes", reader.bytes_processed());

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}
