use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use anamnesis::config;
use anamnesis::corpus::{clean, narrative, table};
use anamnesis::scrape::{crawl_community, CrawlConfig, HttpFetcher};
use anamnesis::triage::{annotate_table, RuleLibrary};

#[derive(Parser)]
#[command(name = "anamnesis")]
#[command(about = "Collect and annotate rare-disease experience narratives", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl the community listing into a raw posts table
    Scrape {
        /// Output table
        #[arg(long, value_name = "FILE", default_value = config::RAW_POSTS_FILE)]
        out: PathBuf,
        /// Listing pages to walk
        #[arg(long, default_value_t = config::DEFAULT_PAGE_COUNT)]
        pages: usize,
    },
    /// Drop moderation and meta posts by title
    Clean {
        /// Input table
        #[arg(long = "in", value_name = "FILE")]
        input: PathBuf,
        /// Output table
        #[arg(long, value_name = "FILE", default_value = config::CLEANED_POSTS_FILE)]
        out: PathBuf,
    },
    /// Keep only first-person experience narratives
    Filter {
        /// Input table
        #[arg(long = "in", value_name = "FILE")]
        input: PathBuf,
        /// Output table
        #[arg(long, value_name = "FILE", default_value = config::EXPERIENCE_POSTS_FILE)]
        out: PathBuf,
    },
    /// Append diagnosis_status and timeline columns to every row
    Annotate {
        /// Input table
        #[arg(long = "in", value_name = "FILE")]
        input: PathBuf,
        /// Output table
        #[arg(long, value_name = "FILE", default_value = config::ANNOTATED_POSTS_FILE)]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} v{}", config::APP_NAME, config::APP_VERSION);

    match Cli::parse().command {
        Commands::Scrape { out, pages } => scrape(&out, pages),
        Commands::Clean { input, out } => clean_posts(&input, &out),
        Commands::Filter { input, out } => filter_posts(&input, &out),
        Commands::Annotate { input, out } => annotate_posts(&input, &out),
    }
}

fn scrape(out: &Path, pages: usize) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new();
    let cfg = CrawlConfig {
        pages,
        ..CrawlConfig::default()
    };
    let posts = crawl_community(&fetcher, &cfg)?;
    table::write_posts(out, &posts)
        .with_context(|| format!("writing {}", out.display()))?;
    tracing::info!(posts = posts.len(), file = %out.display(), "raw corpus saved");
    Ok(())
}

fn clean_posts(input: &Path, out: &Path) -> anyhow::Result<()> {
    let mut reader = table::open_reader(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let mut writer = table::create_writer(out)
        .with_context(|| format!("creating {}", out.display()))?;
    let summary = clean::strip_moderation_posts(&mut reader, &mut writer)?;
    tracing::info!(
        rows_in = summary.rows_in,
        rows_out = summary.rows_out,
        file = %out.display(),
        "moderation posts dropped"
    );
    Ok(())
}

fn filter_posts(input: &Path, out: &Path) -> anyhow::Result<()> {
    let mut reader = table::open_reader(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let mut writer = table::create_writer(out)
        .with_context(|| format!("creating {}", out.display()))?;
    let summary = narrative::keep_experience_posts(&mut reader, &mut writer)?;
    tracing::info!(
        rows_in = summary.rows_in,
        rows_out = summary.rows_out,
        file = %out.display(),
        "experience narratives kept"
    );
    Ok(())
}

fn annotate_posts(input: &Path, out: &Path) -> anyhow::Result<()> {
    let library = RuleLibrary::new();
    let mut reader = table::open_reader(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let mut writer = table::create_writer(out)
        .with_context(|| format!("creating {}", out.display()))?;
    let summary = annotate_table(&library, &mut reader, &mut writer)?;
    tracing::info!(
        rows = summary.rows,
        undiagnosed = summary.undiagnosed,
        diagnosed = summary.diagnosed,
        congenital = summary.congenital,
        suspected = summary.suspected,
        unspecified = summary.unspecified,
        file = %out.display(),
        "rows annotated"
    );
    Ok(())
}
