//! Path-component interning.
//!
//! Changed paths repeat across thousands of commits while the set of distinct
//! directories and file names stays small, so every change record stores two
//! small indices instead of its own copy of the path.

use indexmap::IndexSet;

/// Index into the directory table.
pub type DirIdx = usize;

/// Index into the file-name table.
pub type NameIdx = usize;

/// Append-only tables of directory and file-name components.
///
/// An index handed out stays valid until [`NameInterner::clear`]; the same
/// text always yields the same index.
#[derive(Debug, Default, Clone)]
pub struct NameInterner {
    dirs: IndexSet<String>,
    names: IndexSet<String>,
}

impl NameInterner {
    /// Create an empty interner
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a directory component (including its trailing `/`).
    pub fn intern_dir(&mut self, dir: &str) -> DirIdx {
        intern(&mut self.dirs, dir)
    }

    /// Intern a file-name component.
    pub fn intern_name(&mut self, name: &str) -> NameIdx {
        intern(&mut self.names, name)
    }

    /// Split `path` at its last `/` and intern both halves.
    pub fn intern_path(&mut self, path: &str) -> (DirIdx, NameIdx) {
        let (dir, name) = split_path(path);
        (self.intern_dir(dir), self.intern_name(name))
    }

    /// Look up a directory without interning it.
    pub fn dir_index(&self, dir: &str) -> Option<DirIdx> {
        self.dirs.get_index_of(dir)
    }

    /// Look up a file name without interning it.
    pub fn name_index(&self, name: &str) -> Option<NameIdx> {
        self.names.get_index_of(name)
    }

    /// Directory text for an index.
    pub fn dir(&self, idx: DirIdx) -> Option<&str> {
        self.dirs.get_index(idx).map(String::as_str)
    }

    /// File-name text for an index.
    pub fn name(&self, idx: NameIdx) -> Option<&str> {
        self.names.get_index(idx).map(String::as_str)
    }

    /// Rebuild the full path from a component pair.
    pub fn resolve(&self, dir: DirIdx, name: NameIdx) -> Option<String> {
        Some(format!("{}{}", self.dir(dir)?, self.name(name)?))
    }

    /// Number of distinct directories.
    pub fn dir_count(&self) -> usize {
        self.dirs.len()
    }

    /// Number of distinct file names.
    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    /// Drop both tables. Every previously returned index becomes invalid.
    pub fn clear(&mut self) {
        self.dirs.clear();
        self.names.clear();
    }
}

fn intern(table: &mut IndexSet<String>, text: &str) -> usize {
    if let Some(idx) = table.get_index_of(text) {
        return idx;
    }
    table.insert_full(text.to_string()).0
}

/// Split a path into `(directory with trailing '/', file name)`.
///
/// A path without a separator has an empty directory.
pub fn split_path(path: &str) -> (&str, &str) {
    let at = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    path.split_at(at)
}
