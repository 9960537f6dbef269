//! Crawl inputs.
//!
//! - `Credential`: opaque access token, redacted in `Debug`
//! - `CrawlRequest`: coordinate + predicate + credential for one crawl
//! - `CrawlOptions`: caller-facing knobs for `find_matching_files`

use std::fmt;
use std::sync::Arc;

use crate::crawl::NamePredicate;
use crate::models::RepositoryCoordinate;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Clone)]
pub struct CrawlRequest {
    pub coordinate: RepositoryCoordinate,
    pub predicate: Arc<dyn NamePredicate>,
    pub credential: Option<Credential>,
}

impl CrawlRequest {
    pub fn new(coordinate: RepositoryCoordinate, predicate: impl NamePredicate + 'static) -> Self {
        Self {
            coordinate,
            predicate: Arc::new(predicate),
            credential: None,
        }
    }

    pub fn with_credential(mut self, credential: Option<Credential>) -> Self {
        self.credential = credential;
        self
    }
}

impl fmt::Debug for CrawlRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrawlRequest")
            .field("coordinate", &self.coordinate)
            .field("credential", &self.credential)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Access token. Helps avoid the anonymous rate limit on GitHub.
    pub credential: Option<Credential>,
    /// Upper bound on listings in flight at once. Values below 1 are raised to 1.
    pub max_concurrency: usize,
    /// Base URL of the contents API.
    pub api_base: String,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            credential: None,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl CrawlOptions {
    pub fn credential(mut self, token: impl Into<String>) -> Self {
        self.credential = Some(Credential::new(token));
        self
    }

    pub fn max_concurrency(mut self, n: usize) -> Self {
        self.max_concurrency = n;
        self
    }

    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }
}
