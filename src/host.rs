//! Host collaborator traits.
//!
//! The resolver never touches the filesystem directly. It consumes two
//! narrow capabilities supplied by the embedding host:
//!
//! - [`FileExistence`]: does a workspace-relative path name a file?
//! - [`FileEnumeration`]: which workspace-relative paths match a pattern?
//!
//! Implement these traits to adapt the host's own file layer (an editor's
//! search service, a virtual filesystem, the local disk). The crate ships
//! [`crate::workspace::LocalWorkspace`] for the local-disk case.
//!
//! Enumeration is expected to apply the host's own ignore rules (version
//! control ignores, editor excludes) as a first-pass filter; the resolver
//! applies the configured exclusion patterns on top of whatever comes back.

use async_trait::async_trait;
use thiserror::Error;

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Errors from host collaborator operations.
#[derive(Debug, Clone, Error)]
pub enum HostError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for HostError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::NotFound => HostError::NotFound(err.to_string()),
            ErrorKind::PermissionDenied => HostError::PermissionDenied(err.to_string()),
            _ => HostError::Io(err.to_string()),
        }
    }
}

/// File existence check against the workspace.
#[async_trait]
pub trait FileExistence: Send + Sync {
    /// True if `relative_path` names an existing regular file.
    async fn exists(&self, relative_path: &str) -> HostResult<bool>;
}

/// Pattern-driven file enumeration over the workspace.
#[async_trait]
pub trait FileEnumeration: Send + Sync {
    /// Enumerate workspace-relative paths (forward-slash separated) that
    /// match `pattern` and none of the `exclude` patterns.
    ///
    /// Order is unspecified; the resolver sorts for determinism.
    async fn find(&self, pattern: &str, exclude: &[String]) -> HostResult<Vec<String>>;
}

/// Combined host capability consumed by the resolver.
pub trait WorkspaceHost: FileExistence + FileEnumeration {}

impl<T: FileExistence + FileEnumeration> WorkspaceHost for T {}
