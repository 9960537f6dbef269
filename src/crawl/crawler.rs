use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::{Id, JoinSet};
use tracing::{debug, info, warn};

use crate::crawl::NamePredicate;
use crate::error::{FetchError, FetchErrorKind, Location, Result};
use crate::fetch::EntryFetcher;
use crate::models::{
    CrawlRequest, Credential, DEFAULT_MAX_CONCURRENCY, DirectoryEntry, EntryKind,
    RepositoryCoordinate, ResultSet,
};

/// Read-only state shared by every listing task of one crawl.
struct CrawlContext {
    fetcher: Arc<dyn EntryFetcher>,
    coordinate: RepositoryCoordinate,
    predicate: Arc<dyn NamePredicate>,
    credential: Option<Credential>,
}

/// One directory's contribution: its direct matches and the subdirectories
/// still to visit.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Listing {
    pub matches: Vec<String>,
    pub subdirs: Vec<String>,
    pub files: usize,
    pub skipped: usize,
}

/// Split a directory listing into matches and directories to descend into.
///
/// Entries of unsupported kinds (symlinks, submodules, unknown types) are
/// counted as skipped and otherwise ignored. Listing order is preserved.
pub fn partition(entries: Vec<DirectoryEntry>, predicate: &dyn NamePredicate) -> Listing {
    let mut listing = Listing::default();

    for entry in entries {
        match entry.kind {
            EntryKind::File => {
                listing.files += 1;
                if predicate.is_match(&entry.name) {
                    listing.matches.push(entry.path);
                }
            }
            EntryKind::Directory => listing.subdirs.push(entry.path),
            kind => {
                debug!(path = %entry.path, ?kind, "Skipping unsupported entry");
                listing.skipped += 1;
            }
        }
    }

    listing
}

async fn visit(ctx: Arc<CrawlContext>, path: Option<String>) -> Result<Listing> {
    let entries = ctx
        .fetcher
        .list(&ctx.coordinate, path.as_deref(), ctx.credential.as_ref())
        .await?;

    debug!(
        path = path.as_deref().unwrap_or("(root)"),
        entries = entries.len(),
        "Listed directory"
    );

    Ok(partition(entries, ctx.predicate.as_ref()))
}

/// Counters for one completed crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Directories listed, root included.
    pub dirs: usize,
    /// File entries seen, matched or not.
    pub files: usize,
    /// Entries of unsupported kinds.
    pub skipped: usize,
    pub matches: usize,
    pub duration: Duration,
}

/// Walks a repository tree through an [`EntryFetcher`], listing directories
/// concurrently.
///
/// At most `max_concurrency` listings are in flight; further directories wait
/// in a FIFO queue. The result is only produced once every directory has
/// been listed. The first listing failure ends the crawl: the remaining
/// listings are aborted and their results discarded.
pub struct TreeCrawler {
    fetcher: Arc<dyn EntryFetcher>,
    max_concurrency: usize,
}

impl TreeCrawler {
    pub fn new(fetcher: impl EntryFetcher + 'static) -> Self {
        Self::from_arc(Arc::new(fetcher))
    }

    pub fn from_arc(fetcher: Arc<dyn EntryFetcher>) -> Self {
        Self {
            fetcher,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Cap on concurrent listings. Zero is treated as one.
    pub fn with_max_concurrency(mut self, n: usize) -> Self {
        self.max_concurrency = n.max(1);
        self
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Paths of all files below the root whose name satisfies the predicate.
    pub async fn crawl(&self, request: CrawlRequest) -> Result<ResultSet> {
        self.crawl_with_stats(request).await.map(|(results, _)| results)
    }

    pub async fn crawl_with_stats(&self, request: CrawlRequest) -> Result<(ResultSet, CrawlStats)> {
        let start = Instant::now();
        let ctx = Arc::new(CrawlContext {
            fetcher: Arc::clone(&self.fetcher),
            coordinate: request.coordinate,
            predicate: request.predicate,
            credential: request.credential,
        });

        info!(
            repo = %ctx.coordinate,
            max_concurrency = self.max_concurrency,
            "Starting crawl"
        );

        let mut pending: VecDeque<Option<String>> = VecDeque::from([None]);
        let mut in_flight: HashMap<Id, Option<String>> = HashMap::new();
        let mut tasks: JoinSet<Result<Listing>> = JoinSet::new();
        let mut results = ResultSet::new();
        let mut stats = CrawlStats::default();

        loop {
            while tasks.len() < self.max_concurrency {
                let Some(path) = pending.pop_front() else {
                    break;
                };
                let handle = tasks.spawn(visit(Arc::clone(&ctx), path.clone()));
                in_flight.insert(handle.id(), path);
            }

            let Some(joined) = tasks.join_next_with_id().await else {
                break;
            };

            let listing = match joined {
                Ok((id, Ok(listing))) => {
                    in_flight.remove(&id);
                    listing
                }
                Ok((_, Err(e))) => {
                    warn!(error = %e, outstanding = tasks.len(), "Crawl failed");
                    // Dropping the set aborts the remaining listings.
                    return Err(e);
                }
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Err(e) => {
                    let path = in_flight.remove(&e.id()).flatten();
                    warn!(path = path.as_deref().unwrap_or("(root)"), "Listing task cancelled");
                    return Err(FetchError::new(
                        Location::new(&ctx.coordinate, path.as_deref()),
                        FetchErrorKind::Cancelled,
                    ));
                }
            };

            stats.dirs += 1;
            stats.files += listing.files;
            stats.skipped += listing.skipped;
            results.extend(listing.matches);
            pending.extend(listing.subdirs.into_iter().map(Some));
        }

        stats.matches = results.len();
        stats.duration = start.elapsed();

        info!(
            repo = %ctx.coordinate,
            dirs = stats.dirs,
            files = stats.files,
            skipped = stats.skipped,
            matches = stats.matches,
            elapsed_ms = stats.duration.as_millis() as u64,
            "Crawl complete"
        );

        Ok((results, stats))
    }
}
