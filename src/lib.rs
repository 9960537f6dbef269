//! Find files by name in a remote repository tree.
//!
//! The tree is walked one directory listing at a time through an
//! [`EntryFetcher`]; subdirectories are listed concurrently (bounded by
//! [`CrawlOptions::max_concurrency`]) and every file whose name satisfies a
//! [`NamePredicate`] contributes its path to the [`ResultSet`].
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), repo_crawl::CrawlError> {
//! use repo_crawl::CrawlOptions;
//!
//! let options = CrawlOptions::default().credential("ghp_...");
//! let manifests = repo_crawl::find_cmake_lists("LTLA", "libscran", "master", options).await?;
//! for path in &manifests {
//!     println!("{}", path);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Any listing failure fails the whole crawl with a [`FetchError`] naming the
//! directory that could not be listed; there are no partial results.

pub mod crawl;
pub mod error;
pub mod fetch;
pub mod models;

pub use crawl::{CrawlStats, ExactName, NamePredicate, TreeCrawler};
pub use error::{ConfigError, CrawlError, FetchError, FetchErrorKind, Location};
pub use fetch::{EntryFetcher, GitHubFetcher, LocalRepoFetcher};
pub use models::{
    CrawlOptions, CrawlRequest, Credential, DirectoryEntry, EntryKind, RepositoryCoordinate,
    ResultSet,
};

/// Crawl a GitHub repository at `reference` and collect the paths of files
/// whose name satisfies `predicate`.
pub async fn find_matching_files(
    owner: &str,
    name: &str,
    reference: &str,
    predicate: impl NamePredicate + 'static,
    options: CrawlOptions,
) -> Result<ResultSet, CrawlError> {
    let fetcher = GitHubFetcher::from_options(&options)?;
    let crawler = TreeCrawler::new(fetcher).with_max_concurrency(options.max_concurrency);

    let request = CrawlRequest::new(RepositoryCoordinate::new(owner, name, reference), predicate)
        .with_credential(options.credential);

    Ok(crawler.crawl(request).await?)
}

/// Find all `CMakeLists.txt` files in a GitHub repository.
pub async fn find_cmake_lists(
    owner: &str,
    name: &str,
    reference: &str,
    options: CrawlOptions,
) -> Result<ResultSet, CrawlError> {
    find_matching_files(owner, name, reference, ExactName::cmake_lists(), options).await
}
