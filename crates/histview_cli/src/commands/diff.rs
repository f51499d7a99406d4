//! Diff command - parse raw diff output into a change set.

use super::read_input;
use anyhow::{bail, Result};
use console::style;
use histview_core::{DiffParser, FileChangeSet, FileStatus, NameInterner};
use std::path::Path;

pub fn run(file: &Path, format: &str) -> Result<()> {
    let text = read_input(file)?;
    let mut names = NameInterner::new();
    let set = DiffParser::new(&mut names).parse(&text);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&set)?),
        "text" => print_text(&set),
        other => bail!("Unknown format '{}', expected text or json", other),
    }
    Ok(())
}

fn print_text(set: &FileChangeSet) {
    for (idx, change) in set.iter().enumerate() {
        let code = change.status.code();
        let code = if change.status.contains(FileStatus::DELETED) {
            style(code).red()
        } else if change.status.contains(FileStatus::NEW) {
            style(code).green()
        } else {
            style(code).yellow()
        };

        match set.ext_status(idx) {
            Some(ext) => println!("{} {}  {}", code, change.path, style(ext).dim()),
            None => println!("{} {}", code, change.path),
        }
    }

    println!(
        "{} files, {} new, {} deleted",
        set.len(),
        set.count_with(FileStatus::NEW),
        set.count_with(FileStatus::DELETED)
    );
}
