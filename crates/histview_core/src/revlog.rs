//! Pre-captured history text.
//!
//! One commit per line, as produced by
//! `git log --boundary --parents --format='%m%H %P%x09%an%x09%at%x09%s'`:
//!
//! ```text
//! >c3c3...c3 b2b2...b2<TAB>Jane<TAB>1700000000<TAB>Fix parser
//! -a1a1...a1<TAB>John<TAB>1690000000<TAB>Initial import
//! ```
//!
//! A leading `-` marks a boundary commit, `<` and `>` are ignored. The
//! descriptive fields after the first tab are optional.

use crate::commit::CommitInfo;
use crate::error::{HistError, Result};
use crate::sha::Sha;

/// Parse log text into commits with consecutive rows starting at `first_row`.
///
/// # Errors
///
/// Returns `HistError::MalformedLogRecord` for a line whose identifiers or
/// timestamp cannot be parsed.
///
/// # Examples
///
/// ```
/// use histview_core::parse_log;
///
/// let a = "a".repeat(40);
/// let b = "b".repeat(40);
/// let text = format!("{b} {a}\tdev\t100\tsecond\n-{a}\n");
///
/// let commits = parse_log(&text, 1).unwrap();
/// assert_eq!(commits.len(), 2);
/// assert_eq!(commits[0].row, 1);
/// assert!(commits[1].boundary);
/// ```
pub fn parse_log(text: &str, first_row: usize) -> Result<Vec<CommitInfo>> {
    let mut commits = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = first_row + commits.len();
        commits.push(parse_record(line, row).map_err(|reason| HistError::MalformedLogRecord {
            line: i + 1,
            reason,
        })?);
    }

    Ok(commits)
}

fn parse_record(line: &str, row: usize) -> std::result::Result<CommitInfo, String> {
    let mut fields = line.splitn(4, '\t');
    let ids = fields.next().unwrap_or("");

    let (boundary, ids) = match ids.chars().next() {
        Some('-') => (true, &ids[1..]),
        Some('<') | Some('>') => (false, &ids[1..]),
        _ => (false, ids),
    };

    let mut ids = ids.split_whitespace();
    let sha = ids
        .next()
        .ok_or_else(|| "missing commit id".to_string())
        .and_then(|s| Sha::from_hex(s).map_err(|e| e.to_string()))?;
    let parents = ids
        .map(|p| Sha::from_hex(p).map_err(|e| e.to_string()))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let author = fields.next().unwrap_or("").trim();
    let timestamp = match fields.next().map(str::trim) {
        None | Some("") => 0,
        Some(ts) => ts
            .parse::<i64>()
            .map_err(|e| format!("invalid timestamp {:?}: {}", ts, e))?,
    };
    let subject = fields.next().unwrap_or("").trim_end();

    Ok(CommitInfo::new(sha, parents, row)
        .with_boundary(boundary)
        .with_log(author, timestamp, subject))
}
