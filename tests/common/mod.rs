//! Shared test fixtures: an in-memory listing backend with failure, hang
//! and latency injection.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use repo_crawl::error::Result;
use repo_crawl::{
    Credential, DirectoryEntry, EntryFetcher, EntryKind, FetchError, FetchErrorKind, Location,
    RepositoryCoordinate,
};

/// Directory listings keyed by directory path (`""` for the root).
#[derive(Default)]
pub struct MemoryFetcher {
    tree: HashMap<String, Vec<DirectoryEntry>>,
    failures: HashMap<String, u16>,
    hangs: HashSet<String>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: Mutex<Vec<String>>,
    credentials: Mutex<Vec<Option<String>>>,
}

impl MemoryFetcher {
    /// An empty repository: the root lists no entries.
    pub fn empty() -> Self {
        let mut fetcher = Self::default();
        fetcher.tree.insert(String::new(), Vec::new());
        fetcher
    }

    /// Build a tree from file paths, creating intermediate directories.
    pub fn from_files(files: &[&str]) -> Self {
        let mut fetcher = Self::empty();
        for file in files {
            fetcher.add(file, EntryKind::File);
        }
        fetcher
    }

    pub fn with_dir(mut self, path: &str) -> Self {
        self.add(path, EntryKind::Directory);
        self
    }

    pub fn with_entry(mut self, path: &str, kind: EntryKind) -> Self {
        self.add(path, kind);
        self
    }

    pub fn fail_at(mut self, dir: &str, status: u16) -> Self {
        self.failures.insert(dir.to_string(), status);
        self
    }

    pub fn hang_at(mut self, dir: &str) -> Self {
        self.hangs.insert(dir.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Highest number of listings observed in flight at once.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Directories listed so far, in call order (`""` for the root).
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn credentials_seen(&self) -> Vec<Option<String>> {
        self.credentials.lock().unwrap().clone()
    }

    fn add(&mut self, path: &str, kind: EntryKind) {
        let (parent, name) = match path.rsplit_once('/') {
            Some((parent, name)) => (parent, name),
            None => ("", path),
        };
        if !parent.is_empty() {
            self.ensure_dir(parent);
        }
        self.push_entry(parent, DirectoryEntry::new(name, path, kind));
        if kind == EntryKind::Directory {
            self.tree.entry(path.to_string()).or_default();
        }
    }

    fn ensure_dir(&mut self, path: &str) {
        if self.tree.contains_key(path) {
            return;
        }
        self.add(path, EntryKind::Directory);
    }

    fn push_entry(&mut self, dir: &str, entry: DirectoryEntry) {
        let entries = self.tree.entry(dir.to_string()).or_default();
        if !entries.iter().any(|e| e.path == entry.path) {
            entries.push(entry);
        }
    }
}

struct InFlight<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize, peak: &AtomicUsize) -> Self {
        let now = counter.fetch_add(1, Ordering::SeqCst) + 1;
        peak.fetch_max(now, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl EntryFetcher for MemoryFetcher {
    async fn list(
        &self,
        coordinate: &RepositoryCoordinate,
        path: Option<&str>,
        credential: Option<&Credential>,
    ) -> Result<Vec<DirectoryEntry>> {
        let key = path.unwrap_or("").to_string();
        let _guard = InFlight::enter(&self.in_flight, &self.peak);

        self.calls.lock().unwrap().push(key.clone());
        self.credentials
            .lock()
            .unwrap()
            .push(credential.map(|c| c.expose().to_string()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.hangs.contains(&key) {
            std::future::pending::<()>().await;
        }

        let location = || Location::new(coordinate, path);
        if let Some(status) = self.failures.get(&key) {
            return Err(FetchError::new(location(), FetchErrorKind::Status(*status)));
        }

        self.tree
            .get(&key)
            .cloned()
            .ok_or_else(|| FetchError::new(location(), FetchErrorKind::Status(404)))
    }
}

pub fn coordinate() -> RepositoryCoordinate {
    RepositoryCoordinate::new("LTLA", "libscran", "master")
}
