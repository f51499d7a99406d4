//! Graph command - render the lanes view of a captured log.

use super::read_input;
use anyhow::{Context, Result};
use console::style;
use histview_core::{
    parse_log, CommitInfo, Config, HistoryStore, LaneType, References, Sha, WORKING_DIR_ROW,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Inputs for the synthetic working-directory row.
pub struct WorkingDir {
    pub parent: String,
    pub diff: Option<PathBuf>,
    pub cached: Option<PathBuf>,
    pub untracked: Option<PathBuf>,
}

pub fn run(
    log: &Path,
    wip: Option<WorkingDir>,
    refs: Option<&Path>,
    limit: Option<usize>,
    config_dir: &Path,
) -> Result<()> {
    let config = Config::load(config_dir).context("Failed to load configuration")?;
    let commits = parse_log(&read_input(log)?, WORKING_DIR_ROW + 1)
        .with_context(|| format!("Failed to parse {}", log.display()))?;

    let mut store = HistoryStore::with_config(config.cache.clone());
    store.configure(config.cache.capacity.max(commits.len()));

    if let Some(refs) = refs {
        for (sha, reference) in References::from_show_ref(&read_input(refs)?).iter() {
            store.insert_reference(sha.clone(), reference.clone());
        }
    }

    // the working directory row has to exist before its parent is laid out
    if let Some(wip) = &wip {
        load_working_dir(&mut store, wip)?;
    }

    load_commits(&mut store, commits, true);

    let limit = limit.unwrap_or(usize::MAX);
    for commit in store.iter().take(limit) {
        println!("{}", render_row(&store, commit));
    }

    if wip.is_some() && store.pending_local_changes() {
        eprintln!("{}", style("working directory has uncommitted changes").dim());
    }

    Ok(())
}

/// Insert every commit, showing progress on large inputs.
pub(crate) fn load_commits(store: &mut HistoryStore, commits: Vec<CommitInfo>, progress: bool) {
    let pb = if progress && commits.len() > 1000 {
        let pb = ProgressBar::new(commits.len() as u64);
        if let Ok(bar_style) = ProgressStyle::default_bar()
            .template("{spinner:.green} {msg:20} [{bar:40.cyan/blue}] {pos}/{len}")
        {
            pb.set_style(bar_style.progress_chars("█▓▒░  "));
        }
        pb.set_message("Laying out lanes");
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut skipped = 0usize;
    for commit in commits {
        if !store.insert(commit, None) {
            skipped += 1;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if skipped > 0 {
        debug!(skipped, "duplicate commits ignored");
    }
}

fn load_working_dir(store: &mut HistoryStore, wip: &WorkingDir) -> Result<()> {
    let parent = Sha::from_hex(&wip.parent)
        .with_context(|| format!("Invalid working directory parent {:?}", wip.parent))?;
    let diff = optional_input(wip.diff.as_deref())?;
    let cached = optional_input(wip.cached.as_deref())?;
    let untracked: Vec<String> = optional_input(wip.untracked.as_deref())?
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();

    store.update_working_directory(&parent, &diff, &cached, &untracked);
    Ok(())
}

fn optional_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => read_input(path),
        None => Ok(String::new()),
    }
}

fn render_row(store: &HistoryStore, commit: &CommitInfo) -> String {
    let graph: String = commit
        .lanes
        .iter()
        .map(|lane| lane_glyph(*lane).to_string())
        .collect();

    let id = if commit.is_working_dir {
        style("working dir".to_string()).yellow().to_string()
    } else {
        style(commit.sha.short().to_string()).yellow().to_string()
    };

    let mut line = format!("{} {}", graph, id);
    if let Some(reference) = store.reference(commit.sha.as_str()) {
        if !reference.is_empty() {
            line.push_str(&format!(" {}", style(format!("({})", reference.label())).green()));
        }
    }
    line.push(' ');
    if commit.boundary {
        line.push_str(&style(commit.short_log.as_str()).dim().to_string());
    } else {
        line.push_str(&commit.short_log);
    }
    line
}

/// Two columns per lane: the marker and the connector to its right.
fn lane_glyph(lane: LaneType) -> String {
    let (marker, connector) = match lane {
        LaneType::Empty => (' ', ' '),
        LaneType::Active => ('│', ' '),
        LaneType::NotActive => ('┊', ' '),
        LaneType::MergeFork => ('●', '─'),
        LaneType::MergeForkR => ('●', ' '),
        LaneType::MergeForkL => ('●', '─'),
        LaneType::Join => ('┼', '─'),
        LaneType::JoinR => ('┤', ' '),
        LaneType::JoinL => ('├', '─'),
        LaneType::Head => ('┬', '─'),
        LaneType::HeadR => ('┐', ' '),
        LaneType::HeadL => ('┌', '─'),
        LaneType::Tail => ('┴', '─'),
        LaneType::TailR => ('┘', ' '),
        LaneType::TailL => ('└', '─'),
        LaneType::Cross => ('┼', '─'),
        LaneType::CrossEmpty => ('─', '─'),
        LaneType::Initial | LaneType::Branch => ('●', ' '),
        LaneType::Boundary => ('○', ' '),
        LaneType::BoundaryC => ('○', '─'),
        LaneType::BoundaryR => ('○', ' '),
        LaneType::BoundaryL => ('○', '─'),
    };

    let glyph = format!("{}{}", marker, connector);
    if lane.is_node() {
        style(glyph).bold().to_string()
    } else {
        glyph
    }
}
