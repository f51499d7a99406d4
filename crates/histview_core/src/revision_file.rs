//! Per-commit file change records.

use crate::names::{DirIdx, NameIdx};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// How a file changed in a commit. Several flags can be set at once,
    /// e.g. an untracked file that is also staged with a conflict.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct FileStatus: u16 {
        const MODIFIED = 1;
        const DELETED = 1 << 1;
        const NEW = 1 << 2;
        const RENAMED = 1 << 3;
        const COPIED = 1 << 4;
        const UNKNOWN = 1 << 5;
        const IN_INDEX = 1 << 6;
        const CONFLICT = 1 << 7;
    }
}

impl FileStatus {
    /// Maps a raw diff status character.
    ///
    /// Unrecognized characters (including `T`, type change) are treated as
    /// modifications.
    pub fn from_code(code: char) -> Self {
        match code {
            'A' => Self::NEW,
            'D' => Self::DELETED,
            'U' => Self::CONFLICT,
            '?' => Self::UNKNOWN,
            'R' => Self::RENAMED,
            'C' => Self::COPIED,
            _ => Self::MODIFIED,
        }
    }

    /// Single-letter code for display.
    pub fn code(&self) -> char {
        if self.contains(Self::CONFLICT) {
            'U'
        } else if self.contains(Self::NEW) {
            'A'
        } else if self.contains(Self::DELETED) {
            'D'
        } else if self.contains(Self::UNKNOWN) {
            '?'
        } else if self.intersects(Self::RENAMED | Self::COPIED) {
            'R'
        } else {
            'M'
        }
    }
}

/// One changed path within a [`FileChangeSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Directory component, as an index into the store's name tables.
    pub dir: DirIdx,
    /// File-name component, as an index into the store's name tables.
    pub name: NameIdx,
    /// Full path, kept for direct equality lookups.
    pub path: String,
    pub status: FileStatus,
    /// Parents (1-based, ascending) this change is relative to. Several for
    /// combined-merge records or a path listed under more than one parent
    /// section.
    pub parents: Vec<usize>,
    /// `"orig --> dest (NN%)"` for renames and copies.
    pub ext_status: Option<String>,
}

impl FileChange {
    /// Parents this change is relative to.
    pub fn contributing_parents(&self) -> &[usize] {
        &self.parents
    }

    /// First parent this change is relative to.
    pub fn merge_parent(&self) -> Option<usize> {
        self.parents.first().copied()
    }

    fn add_parents(&mut self, parents: &[usize]) {
        for &p in parents {
            if let Err(at) = self.parents.binary_search(&p) {
                self.parents.insert(at, p);
            }
        }
    }
}

/// The parsed record of which files changed, and how, for one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChangeSet {
    files: Vec<FileChange>,
    only_modified: bool,
}

impl Default for FileChangeSet {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            only_modified: true,
        }
    }
}

impl FileChangeSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a change. A path already in the set keeps its slot and gains
    /// the new status flags.
    pub fn push(&mut self, change: FileChange) {
        if change.status != FileStatus::MODIFIED {
            self.only_modified = false;
        }

        match self.find(&change.path) {
            Some(i) => {
                let existing = &mut self.files[i];
                existing.status |= change.status;
                existing.add_parents(&change.parents);
                if existing.ext_status.is_none() {
                    existing.ext_status = change.ext_status;
                }
            }
            None => self.files.push(change),
        }
    }

    /// OR `status` into the entry at `idx`.
    pub fn append_status(&mut self, idx: usize, status: FileStatus) {
        if let Some(file) = self.files.get_mut(idx) {
            file.status |= status;
            self.only_modified = false;
        }
    }

    /// True iff every change is a plain modification.
    pub fn only_modified(&self) -> bool {
        self.only_modified
    }

    pub fn set_only_modified(&mut self, only_modified: bool) {
        self.only_modified = only_modified;
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileChange> {
        self.files.iter()
    }

    pub fn file(&self, idx: usize) -> Option<&FileChange> {
        self.files.get(idx)
    }

    /// Position of `path` in the set.
    pub fn find(&self, path: &str) -> Option<usize> {
        if path.is_empty() {
            return None;
        }
        self.files.iter().position(|f| f.path == path)
    }

    /// Position of the entry with the given interned components.
    pub fn find_by_index(&self, dir: DirIdx, name: NameIdx) -> Option<usize> {
        self.files
            .iter()
            .position(|f| f.dir == dir && f.name == name)
    }

    /// True if the entry at `idx` has `status` set.
    pub fn status_cmp(&self, idx: usize, status: FileStatus) -> bool {
        self.files
            .get(idx)
            .map(|f| f.status.contains(status))
            .unwrap_or(false)
    }

    pub fn ext_status(&self, idx: usize) -> Option<&str> {
        self.files.get(idx).and_then(|f| f.ext_status.as_deref())
    }

    /// Number of entries carrying `status`.
    pub fn count_with(&self, status: FileStatus) -> usize {
        self.files
            .iter()
            .filter(|f| f.status.contains(status))
            .count()
    }
}

impl<'a> IntoIterator for &'a FileChangeSet {
    type Item = &'a FileChange;
    type IntoIter = std::slice::Iter<'a, FileChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
