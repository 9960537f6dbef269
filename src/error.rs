//! Listing error types.
//!
//! `FetchError` is the single error the crawler propagates. It pairs the
//! `Location` that could not be listed with a `FetchErrorKind` describing
//! what went wrong underneath.
//!
//! Display mirrors the message users see from the CLI:
//! `failed to inspect contents at 'src' for 'owner/name@main' (HTTP 404)`

use std::fmt;

use thiserror::Error;

use crate::models::RepositoryCoordinate;

/// Where a listing was attempted: the repository coordinate plus the
/// directory path (`None` for the root).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub owner: String,
    pub name: String,
    pub reference: String,
    pub path: Option<String>,
}

impl Location {
    pub fn new(coordinate: &RepositoryCoordinate, path: Option<&str>) -> Self {
        Self {
            owner: coordinate.owner.clone(),
            name: coordinate.name.clone(),
            reference: coordinate.reference.clone(),
            path: path.map(str::to_string),
        }
    }

    /// `root` for the repository root, otherwise the quoted path.
    pub fn place(&self) -> String {
        match &self.path {
            None => "root".to_string(),
            Some(p) => format!("'{}'", p),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} for '{}/{}@{}'",
            self.place(),
            self.owner,
            self.name,
            self.reference
        )
    }
}

#[derive(Error, Debug)]
pub enum FetchErrorKind {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed listing: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("not a directory")]
    NotADirectory,

    #[error("listing cancelled")]
    Cancelled,
}

#[derive(Error, Debug)]
#[error("failed to inspect contents at {location} ({kind})")]
pub struct FetchError {
    pub location: Location,
    #[source]
    pub kind: FetchErrorKind,
}

impl FetchError {
    pub fn new(location: Location, kind: impl Into<FetchErrorKind>) -> Self {
        Self {
            location,
            kind: kind.into(),
        }
    }

    /// The HTTP status code behind this error, if the remote answered.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            FetchErrorKind::Status(code) => Some(*code),
            FetchErrorKind::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The directory path that failed, `None` when it was the root.
    pub fn path(&self) -> Option<&str> {
        self.location.path.as_deref()
    }
}

/// Invalid fetcher configuration, reported before any crawl starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidApiBase { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to open repository '{path}': {source}")]
    RepoNotFound {
        path: String,
        #[source]
        source: git2::Error,
    },
}

/// Everything `find_matching_files` can fail with: a bad setup, or a
/// listing failure during the crawl.
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

pub type Result<T> = std::result::Result<T, FetchError>;
