//! repo-crawl - find files by name in a GitHub repository
//!
//! # Usage
//! ```bash
//! repo-crawl LTLA libscran master                     # All CMakeLists.txt files
//! repo-crawl LTLA libscran v1.0.0 --name Cargo.toml   # Another file name
//! repo-crawl LTLA libscran main --local ~/src/libscran --json
//! ```

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repo_crawl::crawl::CMAKE_LISTS;
use repo_crawl::models::{DEFAULT_API_BASE, DEFAULT_MAX_CONCURRENCY};
use repo_crawl::{
    CrawlOptions, CrawlRequest, EntryFetcher, ExactName, GitHubFetcher, LocalRepoFetcher,
    RepositoryCoordinate, TreeCrawler,
};

/// Find files by name in a GitHub repository
#[derive(Parser)]
#[command(name = "repo-crawl")]
#[command(about = "Find files by name in a GitHub repository", long_about = None)]
struct Cli {
    /// Repository owner
    owner: String,

    /// Repository name
    name: String,

    /// Commit, branch or tag to crawl
    #[arg(value_name = "REF")]
    reference: String,

    /// File name to look for
    #[arg(short = 'n', long = "name", value_name = "FILE", default_value = CMAKE_LISTS)]
    name_filter: String,

    /// Access token; avoids the anonymous rate limit
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Maximum number of directory listings in flight
    #[arg(short, long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    concurrency: usize,

    /// Base URL of the contents API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_url: String,

    /// Crawl a local clone instead of the GitHub API
    #[arg(short, long, value_name = "REPO_PATH")]
    local: Option<String>,

    /// Print results as a JSON array
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut options = CrawlOptions::default()
        .max_concurrency(cli.concurrency)
        .api_base(&cli.api_url);
    if let Some(token) = &cli.token {
        options = options.credential(token);
    }

    let fetcher: Arc<dyn EntryFetcher> = match &cli.local {
        Some(path) => match LocalRepoFetcher::open(path) {
            Ok(f) => Arc::new(f),
            Err(e) => {
                eprintln!("✗ {}", e);
                std::process::exit(1);
            }
        },
        None => match GitHubFetcher::from_options(&options) {
            Ok(f) => Arc::new(f),
            Err(e) => {
                eprintln!("✗ {}", e);
                std::process::exit(1);
            }
        },
    };

    let crawler = TreeCrawler::from_arc(fetcher).with_max_concurrency(options.max_concurrency);
    let request = CrawlRequest::new(
        RepositoryCoordinate::new(&cli.owner, &cli.name, &cli.reference),
        ExactName::new(&cli.name_filter),
    )
    .with_credential(options.credential);

    let results = match crawler.crawl(request).await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for path in &results {
            println!("{}", path);
        }
    }

    Ok(())
}
