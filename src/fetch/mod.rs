//! Directory listing backends.
//!
//! The crawler only depends on the [`EntryFetcher`] contract:
//! - `github`: GitHub REST "repository contents" endpoint
//! - `local`: trees of a local git repository at a reference

pub mod github;
pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Credential, DirectoryEntry, RepositoryCoordinate};

pub use github::GitHubFetcher;
pub use local::LocalRepoFetcher;

/// Lists the immediate children of one directory.
///
/// `path` is `None` for the repository root, otherwise a directory path this
/// fetcher returned earlier. The credential is passed through untouched;
/// fetchers that have no use for it ignore it.
///
/// Implementations report every failure (bad status, transport, malformed
/// payload) as a [`FetchError`](crate::error::FetchError) carrying the
/// queried location. They must not retry on the crawler's behalf unless the
/// retry lives entirely inside the fetcher.
#[async_trait]
pub trait EntryFetcher: Send + Sync {
    async fn list(
        &self,
        coordinate: &RepositoryCoordinate,
        path: Option<&str>,
        credential: Option<&Credential>,
    ) -> Result<Vec<DirectoryEntry>>;
}
