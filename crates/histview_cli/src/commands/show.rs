//! Show command - print one commit of a captured log as JSON.

use super::graph::load_commits;
use super::read_input;
use anyhow::{Context, Result};
use histview_core::{parse_log, HistoryStore, WORKING_DIR_ROW};
use std::path::Path;

pub fn run(log: &Path, id: &str) -> Result<()> {
    let commits = parse_log(&read_input(log)?, WORKING_DIR_ROW + 1)
        .with_context(|| format!("Failed to parse {}", log.display()))?;

    let mut store = HistoryStore::new();
    store.configure(commits.len());
    load_commits(&mut store, commits, false);

    let commit = store
        .get(id)
        .with_context(|| format!("No commit matches '{}'", id))?;
    println!("{}", commit.to_json()?);
    Ok(())
}
