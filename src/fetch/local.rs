//! Directory listing backed by a local git repository.
//!
//! Resolves the coordinate's reference with rev-parse (branch, tag, commit
//! hash, `HEAD~2`, ...) and lists the tree at the requested path. Owner and
//! repository name are only used to label errors.
//!
//! Each coordinate is pinned to the tree it resolved to on first use, so a
//! branch moving mid-crawl cannot mix snapshots. Open a new fetcher to see
//! later commits.
//!
//! Object kinds map onto entry kinds as:
//! - blob → `File` (mode 120000 → `Symlink`)
//! - tree → `Directory`
//! - commit (gitlink) → `Submodule`
//! - anything with a non-UTF-8 name → `Other`

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use git2::{ObjectType, Oid, Repository, Tree};
use tracing::debug;

use crate::error::{ConfigError, FetchError, FetchErrorKind, Location, Result};
use crate::fetch::EntryFetcher;
use crate::models::{Credential, DirectoryEntry, EntryKind, RepositoryCoordinate};

const SYMLINK_MODE: i32 = 0o120000;

pub struct LocalRepoFetcher {
    inner: Arc<LocalRepo>,
    pub path: String,
}

struct LocalRepo {
    repo: Mutex<Repository>,
    /// Root tree each coordinate resolved to.
    snapshots: Mutex<HashMap<RepositoryCoordinate, Oid>>,
}

impl LocalRepoFetcher {
    pub fn open<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let repo = Repository::discover(&path).map_err(|source| ConfigError::RepoNotFound {
            path: path_str.clone(),
            source,
        })?;

        Ok(Self {
            inner: Arc::new(LocalRepo {
                repo: Mutex::new(repo),
                snapshots: Mutex::new(HashMap::new()),
            }),
            path: path_str,
        })
    }
}

impl LocalRepo {
    fn snapshot(
        &self,
        repo: &Repository,
        coordinate: &RepositoryCoordinate,
    ) -> std::result::Result<Oid, FetchErrorKind> {
        let mut snapshots = self.snapshots.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(oid) = snapshots.get(coordinate) {
            return Ok(*oid);
        }

        let oid = repo.revparse_single(&coordinate.reference)?.peel_to_tree()?.id();
        debug!(repo = %coordinate, tree = %oid, "Pinned reference");
        snapshots.insert(coordinate.clone(), oid);
        Ok(oid)
    }

    fn list_tree(
        &self,
        coordinate: &RepositoryCoordinate,
        path: Option<&str>,
    ) -> std::result::Result<Vec<DirectoryEntry>, FetchErrorKind> {
        // A poisoned lock only means another listing panicked; the repository
        // handle itself is still usable.
        let repo = self.repo.lock().unwrap_or_else(|e| e.into_inner());

        let root = repo.find_tree(self.snapshot(&repo, coordinate)?)?;
        let base_path = path.unwrap_or("");

        let target = if base_path.is_empty() {
            root
        } else {
            let entry = root.get_path(Path::new(base_path))?;
            if entry.kind() != Some(ObjectType::Tree) {
                return Err(FetchErrorKind::NotADirectory);
            }
            entry.to_object(&repo)?.peel_to_tree()?
        };

        Ok(tree_entries(&target, base_path))
    }
}

fn tree_entries(tree: &Tree<'_>, base_path: &str) -> Vec<DirectoryEntry> {
    tree.iter()
        .map(|entry| {
            let join = |name: &str| {
                if base_path.is_empty() {
                    name.to_string()
                } else {
                    format!("{}/{}", base_path, name)
                }
            };

            let Ok(name) = std::str::from_utf8(entry.name_bytes()) else {
                let lossy = String::from_utf8_lossy(entry.name_bytes()).into_owned();
                debug!(parent = base_path, name = %lossy, "Skipping entry with non-UTF-8 name");
                let path = join(&lossy);
                return DirectoryEntry::new(lossy, path, EntryKind::Other);
            };

            let kind = match entry.kind() {
                Some(ObjectType::Blob) if entry.filemode() == SYMLINK_MODE => EntryKind::Symlink,
                Some(ObjectType::Blob) => EntryKind::File,
                Some(ObjectType::Tree) => EntryKind::Directory,
                Some(ObjectType::Commit) => EntryKind::Submodule,
                _ => EntryKind::Other,
            };

            DirectoryEntry::new(name, join(name), kind)
        })
        .collect()
}

#[async_trait]
impl EntryFetcher for LocalRepoFetcher {
    async fn list(
        &self,
        coordinate: &RepositoryCoordinate,
        path: Option<&str>,
        _credential: Option<&Credential>,
    ) -> Result<Vec<DirectoryEntry>> {
        let inner = Arc::clone(&self.inner);
        let owned_coordinate = coordinate.clone();
        let owned_path = path.map(str::to_string);

        let joined = tokio::task::spawn_blocking(move || {
            inner.list_tree(&owned_coordinate, owned_path.as_deref())
        })
        .await;

        let kind = match joined {
            Ok(Ok(entries)) => return Ok(entries),
            Ok(Err(kind)) => kind,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => FetchErrorKind::Cancelled,
        };
        Err(FetchError::new(Location::new(coordinate, path), kind))
    }
}
