//! CLI commands.

pub mod diff;
pub mod graph;
pub mod show;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read a whole input file.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
