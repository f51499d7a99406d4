//! histview CLI - text rendering of a repository's lanes view.

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use histview_core::HistError;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "histview")]
#[command(about = "Commit history as a lanes graph", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the lanes graph of a captured log
    Graph {
        /// Log text (git log --boundary --parents --format='%m%H %P%x09%an%x09%at%x09%s')
        log: PathBuf,
        /// Parent of the working-directory commit (usually HEAD)
        #[arg(long)]
        wip_parent: Option<String>,
        /// Raw diff of the working tree (git diff-index --raw HEAD)
        #[arg(long, requires = "wip_parent")]
        diff: Option<PathBuf>,
        /// Raw diff of the index (git diff-index --raw --cached HEAD)
        #[arg(long, requires = "wip_parent")]
        cached: Option<PathBuf>,
        /// Untracked paths, one per line (git ls-files --others --exclude-standard)
        #[arg(long, requires = "wip_parent")]
        untracked: Option<PathBuf>,
        /// References (git show-ref --dereference)
        #[arg(long)]
        refs: Option<PathBuf>,
        /// Maximum number of rows to print
        #[arg(short, long)]
        limit: Option<usize>,
        /// Directory holding histview.toml
        #[arg(long, default_value = ".")]
        config: PathBuf,
    },
    /// Parse raw diff output into a change set
    Diff {
        /// Raw diff text (git diff-tree --raw -r -M -C)
        file: PathBuf,
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one commit of a captured log
    Show {
        /// Log text, same format as for `graph`
        log: PathBuf,
        /// Full or abbreviated commit id
        id: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Respects RUST_LOG environment variable (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Graph {
            log,
            wip_parent,
            diff,
            cached,
            untracked,
            refs,
            limit,
            config,
        } => {
            let wip = wip_parent.map(|parent| commands::graph::WorkingDir {
                parent,
                diff,
                cached,
                untracked,
            });
            commands::graph::run(&log, wip, refs.as_deref(), limit, &config)
        }
        Commands::Diff { file, format } => commands::diff::run(&file, &format),
        Commands::Show { log, id } => commands::show::run(&log, &id),
    };

    if let Err(err) = &result {
        let hint = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<HistError>())
            .and_then(HistError::recovery_suggestion);
        if let Some(hint) = hint {
            eprintln!("{} {}", style("hint:").cyan(), hint);
        }
    }
    result
}
