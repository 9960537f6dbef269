//! Concurrent tree traversal.
//!
//! - `crawler`: TreeCrawler, the bounded fan-out walk and its stats
//! - `predicate`: NamePredicate and the built-in ExactName matcher

pub mod crawler;
pub mod predicate;

pub use crawler::{CrawlStats, TreeCrawler};
pub use predicate::{CMAKE_LISTS, ExactName, NamePredicate};
