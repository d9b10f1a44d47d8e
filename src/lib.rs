//! navtree: configurable workspace navigation tree.
//!
//! This crate provides the core of a sidebar file-navigation panel:
//! - Declarative configuration model (groups, file lists, glob filters)
//! - Glob pattern matcher (`*`, `**`, `?`)
//! - Lazy tree resolver that materializes configuration against a workspace
//! - Host collaborator traits for file existence and enumeration
//! - Local-filesystem host implementation
//!
//! Rendering, file opening, settings UI, and file watching belong to the
//! embedding host; it drives resolution through [`resolve::Resolver`] and
//! re-resolves from the root on refresh.

pub mod config;
pub mod error;
pub mod host;
pub mod icon;
pub mod pattern;
pub mod resolve;
pub mod workspace;

pub use config::{ConfigStore, NavConfig, NodeConfig, NodeSpec, SettingsStore};
pub use error::NavError;
pub use host::{FileEnumeration, FileExistence, WorkspaceHost};
pub use pattern::Pattern;
pub use resolve::{NodeKind, ResolvePass, ResolvedNode, Resolver};
pub use workspace::LocalWorkspace;
