//! Local-filesystem implementation of the host collaborator traits.
//!
//! [`LocalWorkspace`] roots all operations at a workspace directory.
//! Enumeration walks the tree with `walkdir` on a blocking task, skipping a
//! default ignore set (VCS metadata, dependency and build output
//! directories) as the first-pass filter an editor host would apply, then
//! matches each file's relative path against the inclusion pattern and
//! exclusion set. Results are forward-slash separated, sorted, and capped.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use walkdir::WalkDir;

use crate::host::{FileEnumeration, FileExistence, HostError, HostResult};
use crate::pattern::{self, Pattern};

/// Directories never descended into during enumeration.
const DEFAULT_IGNORE_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "__pycache__",
    "target",
    ".venv",
    "venv",
    "build",
    "dist",
    "out",
];

/// Cap on enumeration results, matching the search limit an editor host
/// imposes on workspace-wide file queries.
const MAX_FIND_RESULTS: usize = 1000;

/// A workspace on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalWorkspace {
    root: PathBuf,
}

impl LocalWorkspace {
    /// Create a workspace rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalWorkspace { root: root.into() }
    }

    /// The workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn is_ignored_dir(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| DEFAULT_IGNORE_DIRS.contains(&name))
}

fn scan(root: &Path, pattern: &str, exclude: &[String]) -> HostResult<Vec<String>> {
    let include = Pattern::compile_cached(pattern)
        .map_err(|err| HostError::Io(err.to_string()))?;

    let mut results = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_ignored_dir(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // Unreadable subtrees are skipped, not fatal.
                tracing::debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = match entry.path().strip_prefix(root) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        let relative = relative
            .to_string_lossy()
            .replace(std::path::MAIN_SEPARATOR, "/");

        if !include.matches(&relative) {
            continue;
        }
        match pattern::is_excluded(&relative, exclude) {
            Ok(true) => continue,
            Ok(false) => {}
            Err(err) => return Err(HostError::Io(err.to_string())),
        }

        results.push(relative);
        if results.len() >= MAX_FIND_RESULTS {
            tracing::warn!(pattern, limit = MAX_FIND_RESULTS, "enumeration hit result cap");
            break;
        }
    }

    results.sort();
    Ok(results)
}

#[async_trait]
impl FileExistence for LocalWorkspace {
    async fn exists(&self, relative_path: &str) -> HostResult<bool> {
        let full_path = self.root.join(relative_path);
        match tokio::fs::metadata(&full_path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(HostError::from(err)),
        }
    }
}

#[async_trait]
impl FileEnumeration for LocalWorkspace {
    async fn find(&self, pattern: &str, exclude: &[String]) -> HostResult<Vec<String>> {
        let root = self.root.clone();
        let pattern = pattern.to_string();
        let exclude = exclude.to_vec();
        tokio::task::spawn_blocking(move || scan(&root, &pattern, &exclude))
            .await
            .map_err(|err| HostError::Io(err.to_string()))?
    }
}
