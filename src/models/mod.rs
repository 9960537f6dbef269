//! Plain data passed between the fetchers and the crawler.
//!
//! - `tree`: RepositoryCoordinate, DirectoryEntry, EntryKind, ResultSet
//! - `request`: CrawlRequest, CrawlOptions, Credential

pub mod request;
pub mod tree;

pub use request::*;
pub use tree::*;
