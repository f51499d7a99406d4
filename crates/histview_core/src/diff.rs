//! Raw diff-summary parsing.
//!
//! Input is the `--raw` output of `git diff-tree`/`git diff-index`/`git log`,
//! one record per changed path:
//!
//! ```text
//! :100644 100644 <old-id> <new-id> M	src/lib.rs
//! :100644 100644 <old-id> <new-id> R086	old/name.rs	new/name.rs
//! ::100644 100644 100644 <id> <id> <id> MM	merged.rs
//! ```
//!
//! Lines that do not start with `:` open a new parent section.

use crate::names::NameInterner;
use crate::revision_file::{FileChange, FileChangeSet, FileStatus};
use tracing::trace;

/// Byte offset of the status character in a SHA-1 simple record.
const FAST_STATUS_POS: usize = 97;
/// Byte offset of the tab that precedes the path in a SHA-1 simple record.
const FAST_TAB_POS: usize = 98;

/// Parses raw diff text into [`FileChangeSet`]s, interning path components
/// into the borrowed tables.
///
/// Each call writes into an explicit target set, so several raw blocks can be
/// merged into one set by calling [`DiffParser::parse_into`] repeatedly.
pub struct DiffParser<'a> {
    names: &'a mut NameInterner,
}

impl<'a> DiffParser<'a> {
    pub fn new(names: &'a mut NameInterner) -> Self {
        Self { names }
    }

    /// Parse `text` into a fresh set.
    pub fn parse(&mut self, text: &str) -> FileChangeSet {
        let mut set = FileChangeSet::new();
        self.parse_into(&mut set, text);
        set
    }

    /// Parse `text`, appending its records to `set`.
    pub fn parse_into(&mut self, set: &mut FileChangeSet, text: &str) {
        let mut parent = 1;

        for line in text.lines().filter(|l| !l.is_empty()) {
            if !line.starts_with(':') {
                // header line of the next parent section (e.g. a commit sha)
                parent += 1;
                continue;
            }

            let colons = line.bytes().take_while(|&b| b == b':').count();
            if colons > 1 {
                self.parse_combined(set, line, parent, colons);
            } else if let Some((code, path)) = fast_path(line) {
                self.append(set, path, FileStatus::from_code(code), parent, 1, None);
            } else {
                self.parse_slow(set, line, parent);
            }
        }
    }

    /// Append every untracked path with status `UNKNOWN`.
    pub fn append_untracked<S: AsRef<str>>(&mut self, set: &mut FileChangeSet, paths: &[S]) {
        for path in paths {
            self.append(set, path.as_ref(), FileStatus::UNKNOWN, 1, 1, None);
        }
    }

    /// Combined merges carry no rename or similarity data, so the path is
    /// always recorded as modified against every parent it was listed for.
    fn parse_combined(&mut self, set: &mut FileChangeSet, line: &str, parent: usize, colons: usize) {
        match line.rsplit_once('\t') {
            Some((_, path)) if !path.is_empty() => {
                self.append(set, path, FileStatus::MODIFIED, parent, colons, None);
            }
            _ => trace!(line, "dropping combined diff record without a path"),
        }
    }

    fn parse_slow(&mut self, set: &mut FileChangeSet, line: &str, parent: usize) {
        let Some((head, rest)) = line.split_once('\t') else {
            trace!(line, "dropping diff record without a path");
            return;
        };

        let token = head
            .split_whitespace()
            .last()
            .unwrap_or("")
            .trim_start_matches(':');

        match token.chars().next() {
            Some(kind @ ('R' | 'C')) => {
                let fields: Vec<&str> = std::iter::once(token)
                    .chain(rest.split('\t').filter(|f| !f.is_empty()))
                    .collect();
                if fields.len() != 3 {
                    trace!(line, "dropping rename/copy record with {} fields", fields.len());
                    return;
                }
                self.append_rename(set, kind, &token[1..], fields[1], fields[2], parent);
            }
            Some(code) if !rest.is_empty() => {
                self.append(set, rest, FileStatus::from_code(code), parent, 1, None);
            }
            _ => trace!(line, "dropping diff record without status"),
        }
    }

    /// A rename shows up as the destination being created and the origin being
    /// deleted; a copy only creates the destination.
    fn append_rename(
        &mut self,
        set: &mut FileChangeSet,
        kind: char,
        similarity: &str,
        orig: &str,
        dest: &str,
        parent: usize,
    ) {
        let similarity: u32 = similarity.parse().unwrap_or(0);
        let ext = format!("{} --> {} ({}%)", orig, dest, similarity);

        self.append(set, dest, FileStatus::NEW, parent, 1, Some(ext.clone()));
        if kind == 'R' {
            self.append(set, orig, FileStatus::DELETED, parent, 1, Some(ext));
        }
        set.set_only_modified(false);
    }

    fn append(
        &mut self,
        set: &mut FileChangeSet,
        path: &str,
        status: FileStatus,
        merge_parent: usize,
        parent_count: usize,
        ext_status: Option<String>,
    ) {
        let (dir, name) = self.names.intern_path(path);
        set.push(FileChange {
            dir,
            name,
            path: path.to_string(),
            status,
            parents: (merge_parent..merge_parent + parent_count).collect(),
            ext_status,
        });
    }
}

/// Fixed-offset shortcut for the common SHA-1 simple record.
fn fast_path(line: &str) -> Option<(char, &str)> {
    let bytes = line.as_bytes();
    if bytes.get(FAST_TAB_POS) != Some(&b'\t') {
        return None;
    }

    let code = bytes[FAST_STATUS_POS];
    let simple = (code.is_ascii_alphabetic() || code == b'?') && code != b'R' && code != b'C';
    if !simple {
        return None;
    }

    let path = &line[FAST_TAB_POS + 1..];
    if path.is_empty() || path.contains('\t') {
        return None;
    }
    Some((code as char, path))
}
