//! Search a keyword, extract the top posts, and rank their keywords.
//!
//! Usage: blogscrape <keyword> [-n N] [--config FILE] [--output DIR] [--json]
//!        [--top-keywords K] [--min-count C] [--log-format text|json]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rs_blogscrape::export::{create_run_dir, export_report};
use rs_blogscrape::observability::{init_logging, LogConfig, LogFormat};
use rs_blogscrape::{HttpCrawler, Options, PostReport};

#[derive(Debug, Parser)]
#[command(name = "blogscrape", version, about = "Blog search scraping with keyword ranking")]
struct Cli {
    /// Search keyword.
    keyword: String,

    /// Number of top results to process.
    #[arg(short = 'n', long, default_value_t = 3)]
    count: usize,

    /// TOML options file.
    #[arg(long, env = "BLOGSCRAPE_CONFIG")]
    config: Option<PathBuf>,

    /// Base directory for exported files; nothing is written without it.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print reports as JSON instead of a summary.
    #[arg(long)]
    json: bool,

    /// Keywords kept per post (0 keeps all).
    #[arg(long)]
    top_keywords: Option<usize>,

    /// Minimum occurrences for a keyword to be ranked.
    #[arg(long)]
    min_count: Option<usize>,

    /// Log encoding on stderr.
    #[arg(long, default_value = "text")]
    log_format: LogFormat,
}

fn load_options(cli: &Cli) -> Result<Options> {
    let mut options = match &cli.config {
        Some(path) => Options::from_file(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => Options::default(),
    }
    .with_env_overrides();

    if let Some(top) = cli.top_keywords {
        options.keyword_top_n = top;
    }
    if let Some(min) = cli.min_count {
        options.keyword_min_count = min;
    }
    options.validate().context("invalid options")?;
    Ok(options)
}

fn print_summary(reports: &[PostReport]) {
    println!("{}", "=".repeat(60));
    for report in reports {
        println!("\n[TOP{}] {}", report.rank, report.title);
        println!("  URL: {}", report.url);
        match (&report.body, &report.error) {
            (Some(body), _) => {
                println!("  Body: {} chars", body.chars().count());
                let top: Vec<String> = report
                    .keywords
                    .iter()
                    .take(10)
                    .map(|k| format!("{}({})", k.keyword, k.count))
                    .collect();
                if !top.is_empty() {
                    println!("  Keywords: {}", top.join(", "));
                }
            }
            (None, Some(error)) => println!("  Failed: {error}"),
            (None, None) => println!("  Failed"),
        }
    }
    println!("\n{}", "=".repeat(60));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&LogConfig {
        format: cli.log_format,
        ..LogConfig::default()
    })?;

    let options = load_options(&cli)?;
    let crawler = HttpCrawler::http(options);
    let reports = crawler
        .crawl(&cli.keyword, cli.count)
        .await
        .with_context(|| format!("crawling '{}'", cli.keyword))?;

    if let Some(base) = &cli.output {
        let run_dir = create_run_dir(base, reports.len())
            .with_context(|| format!("creating run directory under {}", base.display()))?;
        for report in &reports {
            if let Some(files) = export_report(&run_dir, report)? {
                tracing::info!(rank = report.rank, path = %files.text.display(), "exported");
            }
        }
        eprintln!("Results written to {}", run_dir.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_summary(&reports);
    }

    Ok(())
}
