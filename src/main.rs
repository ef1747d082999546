use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::*;
use gmail_search::{
    config::Config,
    extract::BodyStrategy,
    render::format_summary,
    search::{DirectorySource, SearchQuery, Searcher},
};
use tracing_subscriber::EnvFilter;

/// Search exported Gmail messages by sender and subject.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Sender address to search for
    #[clap(long, env = "GMAIL_SEARCH_FROM")]
    from: String,

    /// Text the subject must contain
    #[clap(long, env = "GMAIL_SEARCH_SUBJECT")]
    subject: String,

    /// Directory of exported messages, overrides the configuration
    #[clap(short, long)]
    dir: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Body selection strategy: first-match or prefer-plain
    #[clap(long)]
    strategy: Option<BodyStrategy>,

    /// Number of body characters to show
    #[clap(long)]
    preview_len: Option<usize>,

    /// Print the full report as JSON
    #[clap(long)]
    json: bool,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,gmail_search=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(dir) = args.dir {
        config.messages_dir = dir;
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if let Some(preview_len) = args.preview_len {
        config.preview_len = preview_len;
    }

    let searcher = Searcher::builder()
        .source(DirectorySource::new(&config.messages_dir))
        .strategy(config.strategy)
        .max_depth(config.max_depth)
        .build();

    let query = SearchQuery::new(args.from, args.subject);
    let report = searcher.search(&query)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.is_empty() {
        println!("No emails found.");
        return Ok(());
    }

    for summary in &report.summaries {
        println!("\n{}", format_summary(summary, config.preview_len));
    }

    for failure in &report.failures {
        eprintln!(
            "{} {}: {}",
            "❌ Failed:".red().bold(),
            failure.id,
            failure.error
        );
    }

    Ok(())
}
