//! navtree CLI binary entry point.
//!
//! A plain-text renderer for the navigation tree: it loads the settings
//! document, resolves the configured groups against the workspace, and
//! prints the materialized tree. Each invocation is one full resolution
//! pass, so re-running the command is the refresh mechanism.
//!
//! ## Usage
//!
//! ```bash
//! # Print the resolved navigation tree for the current workspace
//! navtree tree
//!
//! # Use an explicit workspace and settings file
//! navtree --workspace ~/proj --config ~/proj/.navtree.json tree
//!
//! # Manage top-level groups
//! navtree groups add "Project Files"
//! navtree groups list
//! ```

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use navtree::resolve::{NodeKind, ResolvePass, ResolvedNode, Resolver};
use navtree::{ConfigStore, LocalWorkspace, NavError, SettingsStore};

/// Configurable workspace navigation tree.
///
/// Resolves declarative groups, file lists, and glob filters against a
/// workspace and prints the resulting tree.
#[derive(Parser)]
#[command(name = "navtree")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Workspace root directory (default: current directory)
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    /// Settings file (default: .navtree.json in the workspace)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the configured navigation tree and print it.
    Tree,

    /// Manage top-level navigation groups.
    Groups {
        #[command(subcommand)]
        action: GroupsAction,
    },
}

#[derive(Subcommand)]
enum GroupsAction {
    /// Append a new empty group to the settings file.
    Add {
        /// Display name for the new group
        name: String,
    },
    /// List top-level group names.
    List,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let workspace = cli
        .workspace
        .unwrap_or_else(|| std::env::current_dir().expect("failed to get current directory"));
    let config_path = cli.config.unwrap_or_else(|| workspace.join(".navtree.json"));

    let result = match cli.command {
        Commands::Tree => run_tree(&workspace, &config_path).await,
        Commands::Groups { action } => match action {
            GroupsAction::Add { name } => run_groups_add(&config_path, &name),
            GroupsAction::List => run_groups_list(&config_path),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code().code())
        }
    }
}

async fn run_tree(workspace: &Path, config_path: &Path) -> Result<(), NavError> {
    let store = SettingsStore::load(config_path)?;
    let groups = store.groups();
    if groups.is_empty() {
        println!(
            "no navigation groups configured (settings: {})",
            config_path.display()
        );
        return Ok(());
    }

    let host = Arc::new(LocalWorkspace::new(workspace));
    let resolver = Resolver::new(workspace, host);
    let mut pass = resolver.begin_pass();

    let roots = resolver.resolve_root(&mut pass, &groups);
    for node in &roots {
        print_subtree(&resolver, &mut pass, node, 0).await?;
    }
    Ok(())
}

/// Eagerly descend the tree, printing one indented line per node.
///
/// Recursion over an async fn needs a boxed future; depth is bounded by the
/// configuration nesting, which is shallow in practice.
fn print_subtree<'a>(
    resolver: &'a Resolver,
    pass: &'a mut ResolvePass,
    node: &'a ResolvedNode,
    depth: usize,
) -> Pin<Box<dyn Future<Output = Result<(), NavError>> + 'a>> {
    Box::pin(async move {
        let indent = "  ".repeat(depth);
        match node.kind {
            NodeKind::File => println!("{indent}{}  [{}]", node.label, node.tooltip),
            _ => println!("{indent}{}/", node.label),
        }

        if !node.kind.is_container() {
            return Ok(());
        }
        let children = resolver.resolve_children(pass, node).await?;
        for child in &children {
            print_subtree(resolver, pass, child, depth + 1).await?;
        }
        Ok(())
    })
}

fn run_groups_add(config_path: &Path, name: &str) -> Result<(), NavError> {
    let mut store = SettingsStore::load(config_path)?;
    store.add_group(name);
    store.save()?;
    println!("added navigation group: {name}");
    Ok(())
}

fn run_groups_list(config_path: &Path) -> Result<(), NavError> {
    let store = SettingsStore::load(config_path)?;
    let groups = store.groups();
    if groups.is_empty() {
        println!("no navigation groups configured");
        return Ok(());
    }
    for group in groups {
        println!("{}", group.name);
    }
    Ok(())
}
