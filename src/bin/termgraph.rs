//! termgraph CLI: vocabulary contexts and snapshots over a SQLite quad store.
//!
//! Usage:
//!   termgraph context <vocabulary> [--workspace iri] [--db path] [--config path]
//!   termgraph snapshot <subcommand> [--db path]

use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use termgraph::{Config, Iri, OpenStore, RelationSet, SkosRelation, SqliteStore, TermGraphApi, TermGraphResult};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "termgraph",
    version,
    about = "SKOS vocabulary contexts and cascading snapshots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to SQLite database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Path to YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the graph holding a vocabulary
    Context {
        vocabulary: String,
        /// Resolve inside this workspace
        #[arg(long)]
        workspace: Option<String>,
    },
    /// Find the vocabulary declared in a graph
    VocabularyIn { context: String },
    /// List vocabularies related to a vocabulary
    Related {
        vocabulary: String,
        /// SKOS relation to follow (repeatable); defaults to the configured set
        #[arg(long = "relation")]
        relations: Vec<SkosRelation>,
    },
    /// Manage snapshots
    Snapshot {
        #[command(subcommand)]
        action: SnapshotAction,
    },
    /// Inspect workspaces
    Workspace {
        #[command(subcommand)]
        action: WorkspaceAction,
    },
    /// Drop graphs through the deferred drop queue
    DropGraph {
        #[arg(required = true)]
        graphs: Vec<String>,
    },
}

#[derive(Subcommand)]
enum SnapshotAction {
    /// Snapshot a vocabulary and its related vocabularies
    Create { vocabulary: String },
    /// Remove a snapshot and the rest of its cascade
    Remove { snapshot: String },
    /// List snapshots of a vocabulary or term, newest first
    List {
        asset: String,
        /// Only the snapshot valid at this RFC 3339 instant
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
}

#[derive(Subcommand)]
enum WorkspaceAction {
    /// Show the vocabularies a workspace references
    Show { workspace: String },
}

/// Get the default database path (~/.local/share/termgraph/termgraph.db)
fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    let termgraph_dir = data_dir.join("termgraph");
    std::fs::create_dir_all(&termgraph_dir).ok();
    termgraph_dir.join("termgraph.db")
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn open_api(db: Option<PathBuf>, config: Option<PathBuf>) -> Result<TermGraphApi, String> {
    let config = match config {
        Some(path) => Config::load(&path).map_err(|e| format!("Failed to load config: {}", e))?,
        None => Config::default(),
    };
    let db_path = db.unwrap_or_else(default_db_path);
    let store = SqliteStore::open(&db_path).map_err(|e| format!("Failed to open database: {}", e))?;
    TermGraphApi::new(Arc::new(store), config).map_err(|e| format!("Failed to initialise: {}", e))
}

/// Print a result as pretty JSON, mapping errors to exit code 1
fn emit<T: Serialize>(result: TermGraphResult<T>) -> i32 {
    match result {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(json) => {
                println!("{}", json);
                0
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_context(api: &TermGraphApi, vocabulary: &str, workspace: Option<String>) -> i32 {
    let vocabulary = Iri::from(vocabulary);
    match workspace {
        Some(workspace) => emit(api.get_vocabulary_context_in(Iri::from(workspace), vocabulary)),
        None => emit(api.get_vocabulary_context(vocabulary)),
    }
}

fn cmd_related(api: &TermGraphApi, vocabulary: &str, relations: Vec<SkosRelation>) -> i32 {
    let relations: Option<RelationSet> = if relations.is_empty() {
        None
    } else {
        Some(relations.into_iter().collect())
    };
    emit(api.get_related_vocabularies(Iri::from(vocabulary), relations.as_ref()))
}

fn cmd_snapshot(api: &TermGraphApi, action: SnapshotAction) -> i32 {
    match action {
        SnapshotAction::Create { vocabulary } => emit(api.create_snapshot(Iri::from(vocabulary))),
        SnapshotAction::Remove { snapshot } => emit(api.remove_snapshot(Iri::from(snapshot))),
        SnapshotAction::List { asset, at: Some(at) } => emit(api.snapshot_valid_at(Iri::from(asset), at)),
        SnapshotAction::List { asset, at: None } => emit(api.snapshots_of(Iri::from(asset))),
    }
}

fn cmd_drop_graph(api: &TermGraphApi, graphs: Vec<String>) -> i32 {
    for graph in graphs {
        api.enqueue_graph_drop(Iri::from(graph));
    }
    match api.drop_queue().flush() {
        Ok(count) => {
            println!("Dropped {} graph(s)", count);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let api = match open_api(cli.db, cli.config) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Context { vocabulary, workspace } => cmd_context(&api, &vocabulary, workspace),
        Commands::VocabularyIn { context } => emit(api.get_vocabulary_in_context(Iri::from(context))),
        Commands::Related { vocabulary, relations } => cmd_related(&api, &vocabulary, relations),
        Commands::Snapshot { action } => cmd_snapshot(&api, action),
        Commands::Workspace {
            action: WorkspaceAction::Show { workspace },
        } => emit(api.workspace_metadata(Iri::from(workspace)).map(|m| (*m).clone())),
        Commands::DropGraph { graphs } => cmd_drop_graph(&api, graphs),
    };
    std::process::exit(code);
}
