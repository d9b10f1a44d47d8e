//! Lazy tree resolution.
//!
//! The resolver materializes the declarative configuration into a display
//! tree, one level at a time, on demand from the renderer:
//!
//! - [`Resolver::resolve_root`] maps each top-level group config 1:1 to a
//!   group node carrying no children yet.
//! - [`Resolver::resolve_children`] resolves one group's declared children,
//!   consulting the host for file existence and pattern matches.
//!
//! Resolution is stateless given its inputs. The only bookkeeping is the
//! [`ResolvePass`]: a side table of already-resolved children keyed by node
//! id, written once per node and discarded when the host triggers a
//! refresh. Re-querying an expanded node within one pass returns the cached
//! sequence without touching the host again.
//!
//! Failure semantics: host I/O errors degrade the affected branch to empty
//! results (logged, not propagated) so one racy or misconfigured filter
//! cannot blank the rest of the tree. Pattern translation errors propagate;
//! they indicate broken configuration and must stay visible.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::config::{NodeConfig, NodeSpec};
use crate::error::NavError;
use crate::host::WorkspaceHost;
use crate::icon;
use crate::pattern::{self, Pattern};

/// Kind of a resolved node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// A configured container; children resolved lazily on expansion.
    Group,
    /// Wrapper around the existing entries of a static file list.
    FileGroup,
    /// Wrapper around the matches of a filter pattern.
    FilterGroup,
    /// A file leaf; activation opens it in the host.
    File,
}

impl NodeKind {
    /// True for kinds that may carry children.
    pub fn is_container(&self) -> bool {
        !matches!(self, NodeKind::File)
    }
}

/// Identity of a resolved node within one pass.
pub type NodeId = u64;

/// One node of the materialized display tree.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedNode {
    /// Pass-scoped identity, used as the child-cache key.
    pub node_id: NodeId,
    /// Display label. Filter groups carry a trailing match count.
    pub label: String,
    /// Node kind.
    pub kind: NodeKind,
    /// Symbolic icon name for the renderer.
    pub icon: String,
    /// Hover text: the relative path for file leaves, the label otherwise.
    pub tooltip: String,
    /// Initial collapsible-state hint.
    pub expanded: bool,
    /// Absolute path, set only on file leaves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_path: Option<PathBuf>,
    /// Originating configuration, retained on group nodes so their
    /// children can be resolved on a later expansion.
    #[serde(skip)]
    config: Option<NodeConfig>,
}

/// One resolution pass: node-id allocation plus the child side table.
///
/// A pass lives from one refresh to the next. Dropping it invalidates every
/// cached child sequence; the next render starts from `resolve_root` with a
/// fresh pass.
#[derive(Debug, Default)]
pub struct ResolvePass {
    children: HashMap<NodeId, Vec<ResolvedNode>>,
    next_id: NodeId,
}

impl ResolvePass {
    fn alloc_id(&mut self) -> NodeId {
        self.next_id += 1;
        self.next_id
    }
}

/// Resolves configuration nodes against a workspace host.
pub struct Resolver {
    root: PathBuf,
    host: Arc<dyn WorkspaceHost>,
}

impl Resolver {
    /// Create a resolver for the workspace rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, host: Arc<dyn WorkspaceHost>) -> Self {
        Resolver {
            root: root.into(),
            host,
        }
    }

    /// Begin a fresh resolution pass, discarding any prior cache.
    pub fn begin_pass(&self) -> ResolvePass {
        ResolvePass::default()
    }

    /// Map each top-level group config, in order, to a group node.
    ///
    /// Children are not resolved here; the renderer asks for them per node
    /// via [`Resolver::resolve_children`] when the user expands it.
    pub fn resolve_root(&self, pass: &mut ResolvePass, groups: &[NodeConfig]) -> Vec<ResolvedNode> {
        groups
            .iter()
            .map(|group| self.group_node(pass, group))
            .collect()
    }

    /// Resolve the children of `node`.
    ///
    /// Group nodes dispatch on each declared child's kind; leaves yield an
    /// empty sequence. Within one pass, repeat queries for the same node
    /// return the cached sequence without collaborator calls.
    pub async fn resolve_children(
        &self,
        pass: &mut ResolvePass,
        node: &ResolvedNode,
    ) -> Result<Vec<ResolvedNode>, NavError> {
        if let Some(cached) = pass.children.get(&node.node_id) {
            return Ok(cached.clone());
        }

        let children = match (&node.kind, &node.config) {
            (NodeKind::Group, Some(config)) => {
                let NodeSpec::Group { children } = &config.spec else {
                    return Ok(Vec::new());
                };
                let mut items = Vec::new();
                for child in children {
                    match &child.spec {
                        NodeSpec::Files { files } => {
                            self.resolve_files(pass, child, files, &mut items).await;
                        }
                        NodeSpec::Filter { pattern, exclude } => {
                            self.resolve_filter(pass, child, pattern, exclude, &mut items)
                                .await?;
                        }
                        NodeSpec::Group { .. } => {
                            items.push(self.group_node(pass, child));
                        }
                    }
                }
                items
            }
            _ => return Ok(Vec::new()),
        };

        pass.children.insert(node.node_id, children.clone());
        Ok(children)
    }

    /// Resolve a static file-list child.
    ///
    /// Declared paths that do not exist are skipped without error; stale
    /// configuration may reference conditionally-present files. If nothing
    /// resolves, the child contributes no node at all.
    async fn resolve_files(
        &self,
        pass: &mut ResolvePass,
        config: &NodeConfig,
        files: &[String],
        items: &mut Vec<ResolvedNode>,
    ) {
        let mut leaves = Vec::new();
        for path in files {
            match self.host.exists(path).await {
                Ok(true) => leaves.push(self.file_node(pass, path)),
                Ok(false) => {
                    tracing::debug!(path, group = %config.name, "skipping missing file entry");
                }
                Err(err) => {
                    tracing::warn!(path, error = %err, "existence check failed, skipping entry");
                }
            }
        }

        if leaves.is_empty() {
            return;
        }

        let group = ResolvedNode {
            node_id: pass.alloc_id(),
            label: config.name.clone(),
            kind: NodeKind::FileGroup,
            icon: config.icon.clone().unwrap_or_else(|| icon::FILE_GROUP.into()),
            tooltip: config.name.clone(),
            expanded: config.expanded,
            resource_path: None,
            config: None,
        };
        pass.children.insert(group.node_id, leaves);
        items.push(group);
    }

    /// Resolve a filter child.
    ///
    /// Matches come from the host enumeration, are re-checked against the
    /// exclusion set, and are sorted by relative path for determinism. An
    /// empty result contributes no node. Host enumeration failure degrades
    /// this child to empty; pattern errors propagate.
    async fn resolve_filter(
        &self,
        pass: &mut ResolvePass,
        config: &NodeConfig,
        include: &str,
        exclude: &[String],
        items: &mut Vec<ResolvedNode>,
    ) -> Result<(), NavError> {
        // Validate patterns before any I/O so structural configuration bugs
        // surface even when the host would have returned nothing.
        Pattern::compile_cached(include)?;
        for pattern in exclude {
            Pattern::compile_cached(pattern)?;
        }

        let found = match self.host.find(include, exclude).await {
            Ok(paths) => paths,
            Err(err) => {
                tracing::warn!(
                    pattern = include,
                    error = %err,
                    "file enumeration failed, dropping filter branch"
                );
                return Ok(());
            }
        };

        let mut matched = Vec::with_capacity(found.len());
        for path in found {
            if !pattern::is_excluded(&path, exclude)? {
                matched.push(path);
            }
        }
        matched.sort();

        if matched.is_empty() {
            tracing::debug!(pattern = include, group = %config.name, "filter matched nothing");
            return Ok(());
        }

        let label = format!("{} ({})", config.name, matched.len());
        let leaves: Vec<ResolvedNode> = matched
            .iter()
            .map(|path| self.file_node(pass, path))
            .collect();

        let group = ResolvedNode {
            node_id: pass.alloc_id(),
            label: label.clone(),
            kind: NodeKind::FilterGroup,
            icon: config
                .icon
                .clone()
                .unwrap_or_else(|| icon::FILTER_GROUP.into()),
            tooltip: label,
            expanded: config.expanded,
            resource_path: None,
            config: None,
        };
        pass.children.insert(group.node_id, leaves);
        items.push(group);
        Ok(())
    }

    fn group_node(&self, pass: &mut ResolvePass, config: &NodeConfig) -> ResolvedNode {
        ResolvedNode {
            node_id: pass.alloc_id(),
            label: config.name.clone(),
            kind: NodeKind::Group,
            icon: config.icon.clone().unwrap_or_else(|| icon::GROUP.into()),
            tooltip: config.name.clone(),
            expanded: config.expanded,
            resource_path: None,
            config: Some(config.clone()),
        }
    }

    fn file_node(&self, pass: &mut ResolvePass, relative_path: &str) -> ResolvedNode {
        let file_name = relative_path
            .rsplit('/')
            .next()
            .unwrap_or(relative_path)
            .to_string();
        ResolvedNode {
            node_id: pass.alloc_id(),
            icon: icon::for_file_name(&file_name).to_string(),
            label: file_name,
            kind: NodeKind::File,
            tooltip: relative_path.to_string(),
            expanded: false,
            resource_path: Some(self.root.join(relative_path)),
            config: None,
        }
    }
}
