/// Decides whether a file name is of interest.
///
/// Only file entries are offered to the predicate, and only their name (not
/// the full path). Any `Fn(&str) -> bool` closure works:
///
/// ```rust
/// use repo_crawl::NamePredicate;
///
/// let rust_sources = |name: &str| name.ends_with(".rs");
/// assert!(rust_sources.is_match("lib.rs"));
/// ```
///
/// `Send + Sync` are required since the predicate is shared with every
/// listing task.
pub trait NamePredicate: Send + Sync {
    fn is_match(&self, name: &str) -> bool;
}

impl<F> NamePredicate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_match(&self, name: &str) -> bool {
        self(name)
    }
}

/// Build manifest for CMake projects.
pub const CMAKE_LISTS: &str = "CMakeLists.txt";

/// Matches file names equal to a literal, case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactName(String);

impl ExactName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn cmake_lists() -> Self {
        Self::new(CMAKE_LISTS)
    }
}

impl NamePredicate for ExactName {
    fn is_match(&self, name: &str) -> bool {
        name == self.0
    }
}
