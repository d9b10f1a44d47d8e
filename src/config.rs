//! Declarative configuration model and settings store.
//!
//! Configuration is a user-authored tree of nodes. Each node has a `name`,
//! an optional `icon` override, and a `type`:
//!
//! - `group`: ordered child nodes, resolved lazily on expansion
//! - `files`: exact relative paths, shown when they exist
//! - `filter`: one inclusion glob plus exclusion globs, matched live
//!
//! The persisted shape is a JSON document owned by the host's settings
//! store; [`SettingsStore`] is a plain-file rendition of that store. The
//! resolver treats configuration as a read-only snapshot and never mutates
//! it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or saving the settings document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write the settings file.
    #[error("failed to access config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not a valid configuration document.
    #[error("malformed config at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn default_expanded() -> bool {
    true
}

/// One node of the declarative configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Display name of the node.
    pub name: String,

    /// Icon override. When absent, container nodes fall back to the
    /// per-kind default and file leaves to the extension table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Initial collapsible-state hint for the renderer.
    #[serde(default = "default_expanded")]
    pub expanded: bool,

    /// Kind-specific payload, tagged by `type`.
    #[serde(flatten)]
    pub spec: NodeSpec,
}

/// Kind-specific payload of a configuration node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeSpec {
    /// A named container of further nodes.
    Group {
        #[serde(default)]
        children: Vec<NodeConfig>,
    },
    /// A static list of exact relative paths.
    Files {
        #[serde(default)]
        files: Vec<String>,
    },
    /// A dynamic file set: one inclusion glob, any number of exclusions.
    Filter {
        pattern: String,
        #[serde(default)]
        exclude: Vec<String>,
    },
}

impl NodeConfig {
    /// Create a group node.
    pub fn group(name: impl Into<String>, children: Vec<NodeConfig>) -> Self {
        NodeConfig {
            name: name.into(),
            icon: None,
            expanded: true,
            spec: NodeSpec::Group { children },
        }
    }

    /// Create a static file-list node.
    pub fn files(name: impl Into<String>, files: Vec<String>) -> Self {
        NodeConfig {
            name: name.into(),
            icon: None,
            expanded: true,
            spec: NodeSpec::Files { files },
        }
    }

    /// Create a filter node.
    pub fn filter(
        name: impl Into<String>,
        pattern: impl Into<String>,
        exclude: Vec<String>,
    ) -> Self {
        NodeConfig {
            name: name.into(),
            icon: None,
            expanded: true,
            spec: NodeSpec::Filter {
                pattern: pattern.into(),
                exclude,
            },
        }
    }

    /// Set the icon override.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// The full persisted configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavConfig {
    /// Top-level navigation groups, in display order.
    #[serde(default)]
    pub groups: Vec<NodeConfig>,
}

/// Read access to the current configuration snapshot.
pub trait ConfigStore {
    /// The top-level groups, in declaration order.
    fn groups(&self) -> Vec<NodeConfig>;
}

impl ConfigStore for NavConfig {
    fn groups(&self) -> Vec<NodeConfig> {
        self.groups.clone()
    }
}

/// JSON-file-backed settings store.
///
/// Stands in for the host's settings storage: loads the document on
/// construction, writes it back on [`SettingsStore::save`]. A missing file
/// loads as the default empty configuration rather than an error, so a
/// fresh workspace starts with no groups.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    config: NavConfig,
}

impl SettingsStore {
    /// Load the settings document at `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let config = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                NavConfig::default()
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.clone(),
                    source,
                })
            }
        };
        Ok(SettingsStore { path, config })
    }

    /// Write the current document back to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(&self.config).map_err(|source| {
            ConfigError::Json {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, text).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Append a new empty group with the default folder icon.
    pub fn add_group(&mut self, name: impl Into<String>) {
        self.config
            .groups
            .push(NodeConfig::group(name, Vec::new()).with_icon(crate::icon::GROUP));
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current configuration document.
    pub fn config(&self) -> &NavConfig {
        &self.config
    }
}

impl ConfigStore for SettingsStore {
    fn groups(&self) -> Vec<NodeConfig> {
        self.config.groups.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod model {
        use super::*;

        #[test]
        fn parses_all_node_kinds() {
            let doc = r#"{
                "groups": [
                    {
                        "name": "Sources",
                        "icon": "folder",
                        "type": "group",
                        "children": [
                            {
                                "name": "Entry Points",
                                "type": "files",
                                "files": ["src/main.cpp", "src/app.cpp"]
                            },
                            {
                                "name": "Headers",
                                "type": "filter",
                                "pattern": "**/*.h",
                                "exclude": ["vendor/**"]
                            }
                        ]
                    }
                ]
            }"#;

            let config: NavConfig = serde_json::from_str(doc).unwrap();
            assert_eq!(config.groups.len(), 1);

            let group = &config.groups[0];
            assert_eq!(group.name, "Sources");
            assert_eq!(group.icon.as_deref(), Some("folder"));
            assert!(group.expanded);

            let NodeSpec::Group { children } = &group.spec else {
                panic!("expected group node");
            };
            assert_eq!(children.len(), 2);
            assert!(matches!(children[0].spec, NodeSpec::Files { .. }));
            assert!(matches!(children[1].spec, NodeSpec::Filter { .. }));
        }

        #[test]
        fn missing_optional_fields_default() {
            let doc = r#"{"name": "G", "type": "group"}"#;
            let node: NodeConfig = serde_json::from_str(doc).unwrap();
            assert!(node.icon.is_none());
            assert!(node.expanded);
            assert!(matches!(node.spec, NodeSpec::Group { ref children } if children.is_empty()));
        }

        #[test]
        fn serializes_round_trip() {
            let config = NavConfig {
                groups: vec![NodeConfig::group(
                    "Docs",
                    vec![NodeConfig::filter("Markdown", "**/*.md", vec![])],
                )],
            };
            let text = serde_json::to_string(&config).unwrap();
            let back: NavConfig = serde_json::from_str(&text).unwrap();
            assert_eq!(back, config);
        }
    }

    mod store {
        use super::*;

        #[test]
        fn missing_file_loads_default() {
            let dir = tempfile::tempdir().unwrap();
            let store = SettingsStore::load(dir.path().join(".navtree.json")).unwrap();
            assert!(store.groups().is_empty());
        }

        #[test]
        fn malformed_file_is_an_error() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join(".navtree.json");
            fs::write(&path, "{ not json").unwrap();
            let err = SettingsStore::load(&path).unwrap_err();
            assert!(matches!(err, ConfigError::Json { .. }));
        }

        #[test]
        fn add_group_persists_through_save_and_load() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join(".navtree.json");

            let mut store = SettingsStore::load(&path).unwrap();
            store.add_group("Project Files");
            store.save().unwrap();

            let reloaded = SettingsStore::load(&path).unwrap();
            let groups = reloaded.groups();
            assert_eq!(groups.len(), 1);
            assert_eq!(groups[0].name, "Project Files");
            assert_eq!(groups[0].icon.as_deref(), Some("folder"));
        }
    }
}
