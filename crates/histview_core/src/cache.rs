//! The history cache: commits by row and by identifier, with lanes attached.

use crate::commit::CommitInfo;
use crate::config::CacheConfig;
use crate::diff::DiffParser;
use crate::lanes::LaneTracker;
use crate::names::NameInterner;
use crate::refs::{Reference, References};
use crate::revision_file::{FileChangeSet, FileStatus};
use crate::sha::Sha;
use crate::TimeProvider;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, trace};

/// Row reserved for the working-directory commit.
pub const WORKING_DIR_ROW: usize = 0;

/// Summary shown for the working-directory commit.
const NO_LOCAL_CHANGES: &str = "No local changes";
const LOCAL_CHANGES: &str = "Local changes";

/// Incremental cache of one repository's history as shown in the lanes view.
///
/// Commits must be inserted in the VCS tool's emission order; the lane layout
/// of every row depends on the rows inserted before it. Nothing here fails:
/// duplicate inserts, inserts while the cache is being cleared, malformed diff
/// records and lookups that miss are all absorbed.
///
/// # Examples
///
/// ```
/// use histview_core::{CommitInfo, HistoryStore, Sha};
///
/// let mut store = HistoryStore::new();
/// store.configure(10);
///
/// store.insert(CommitInfo::new("abcdef123", vec![Sha::new("0123")], 1), None);
/// store.insert(CommitInfo::new("0123", vec![], 2), None);
///
/// assert_eq!(store.lookup_by_identifier("abcdef").row, 1);
/// assert!(!store.lookup_by_row(99).is_valid());
/// ```
pub struct HistoryStore {
    /// Row → commit. Slots are `None` until a commit lands there.
    rows: Vec<Option<CommitInfo>>,
    /// Identifier → row, in insertion order.
    index: IndexMap<Sha, usize>,
    lanes: LaneTracker,
    names: NameInterner,
    revision_files: HashMap<Sha, FileChangeSet>,
    references: References,
    untracked: Vec<String>,
    /// Set by `clear()`, lifted by `configure()`.
    locked: bool,
    config: CacheConfig,
    time_provider: Option<Box<dyn TimeProvider>>,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryStore")
            .field("rows", &self.rows.len())
            .field("commits", &self.index.len())
            .field("lanes", &self.lanes.lane_count())
            .field("locked", &self.locked)
            .finish()
    }
}

impl HistoryStore {
    /// Create an empty cache with default configuration.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            rows: Vec::new(),
            index: IndexMap::new(),
            lanes: LaneTracker::new(),
            names: NameInterner::new(),
            revision_files: HashMap::new(),
            references: References::new(),
            untracked: Vec::new(),
            locked: false,
            config,
            time_provider: None,
        }
    }

    /// Use `provider` instead of the system clock for the working-directory
    /// commit's timestamp.
    pub fn with_time_provider(mut self, provider: impl TimeProvider + 'static) -> Self {
        self.time_provider = Some(Box::new(provider));
        self
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Preallocate `capacity` rows plus one for the working-directory commit
    /// and unlock the cache.
    ///
    /// Allocation only happens on an empty row table, so calling this again
    /// mid-session never resizes.
    pub fn configure(&mut self, capacity: usize) {
        if self.rows.is_empty() {
            self.rows.resize_with(capacity + 1, || None);
            self.index.reserve(capacity + 1);
            debug!(capacity, "history cache configured");
        }

        self.locked = false;
    }

    /// True between `clear()` and the next `configure()`.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Insert a commit at its row, computing its lanes.
    ///
    /// `diff` is optional raw diff text for the commit; when given it is parsed
    /// and stored as the commit's change set.
    ///
    /// Returns `false` without touching anything if the cache is locked or the
    /// identifier is already present.
    pub fn insert(&mut self, mut commit: CommitInfo, diff: Option<&str>) -> bool {
        if self.locked {
            debug!(sha = %commit.sha, "cache locked, dropping insert");
            return false;
        }
        if self.index.contains_key(&commit.sha) {
            trace!(sha = %commit.sha, "commit already cached");
            return false;
        }

        commit.lanes = self
            .lanes
            .process(&commit.sha, &commit.parents, commit.boundary);

        if let Some(diff) = diff {
            let set = DiffParser::new(&mut self.names).parse(diff);
            self.revision_files.insert(commit.sha.clone(), set);
        }

        let sha = commit.sha.clone();
        let row = commit.row;
        let first_parent = commit.parent(0).cloned();

        self.store_row(commit);
        self.index.insert(sha, row);

        if self.config.compact_parent_index {
            if let Some(parent) = first_parent {
                if self.index.shift_remove(&parent).is_some() {
                    trace!(%parent, "dropped parent index entry");
                }
            }
        }

        true
    }

    /// Put `commit` at its row, growing the table if needed. An identical
    /// record already at that row is left in place.
    fn store_row(&mut self, commit: CommitInfo) {
        let row = commit.row;
        if row >= self.rows.len() {
            self.rows.resize_with(row + 1, || None);
        }

        let slot = &mut self.rows[row];
        if slot.as_ref() != Some(&commit) {
            *slot = Some(commit);
        }
    }

    /// Commit at `row`, if any.
    pub fn get_by_row(&self, row: usize) -> Option<&CommitInfo> {
        self.rows.get(row).and_then(Option::as_ref)
    }

    /// Commit at `row`, or the empty record.
    pub fn lookup_by_row(&self, row: usize) -> CommitInfo {
        self.get_by_row(row).cloned().unwrap_or_default()
    }

    /// Commit by full identifier, falling back to the first cached identifier
    /// (in insertion order) that starts with `id`.
    pub fn get(&self, id: &str) -> Option<&CommitInfo> {
        if id.is_empty() {
            return None;
        }

        let row = match self.index.get(id) {
            Some(&row) => row,
            None => {
                let (_, &row) = self.index.iter().find(|(sha, _)| sha.starts_with(id))?;
                row
            }
        };

        self.get_by_row(row)
    }

    /// Commit by full or abbreviated identifier, or the empty record.
    pub fn lookup_by_identifier(&self, id: &str) -> CommitInfo {
        self.get(id).cloned().unwrap_or_default()
    }

    pub fn contains(&self, sha: &str) -> bool {
        self.index.contains_key(sha)
    }

    /// Number of indexed commits.
    pub fn commit_count(&self) -> usize {
        self.index.len()
    }

    /// Size of the row table, occupied or not.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Occupied rows in display order.
    pub fn iter(&self) -> impl Iterator<Item = &CommitInfo> {
        self.rows.iter().flatten()
    }

    pub fn insert_reference(&mut self, sha: Sha, reference: Reference) {
        self.references.insert(sha, reference);
    }

    pub fn reference(&self, sha: &str) -> Option<&Reference> {
        self.references.get(sha)
    }

    pub fn insert_revision_file(&mut self, sha: Sha, set: FileChangeSet) {
        self.revision_files.insert(sha, set);
    }

    pub fn revision_file(&self, sha: &str) -> Option<&FileChangeSet> {
        self.revision_files.get(sha)
    }

    pub fn contains_revision_file(&self, sha: &str) -> bool {
        self.revision_files.contains_key(sha)
    }

    /// Parse `diff` and store it as the change set of `sha`.
    pub fn parse_diff(&mut self, sha: Sha, diff: &str) -> &FileChangeSet {
        let set = DiffParser::new(&mut self.names).parse(diff);
        self.revision_files.insert(sha.clone(), set);
        &self.revision_files[&sha]
    }

    /// Interned path components shared by every stored change set.
    pub fn names(&self) -> &NameInterner {
        &self.names
    }

    pub fn set_untracked_files(&mut self, files: Vec<String>) {
        self.untracked = files;
    }

    pub fn untracked_files(&self) -> &[String] {
        &self.untracked
    }

    /// True if the working directory has changes beyond untracked files.
    pub fn pending_local_changes(&self) -> bool {
        self.revision_files
            .get(crate::sha::ZERO_SHA)
            .map(|set| set.len() != self.untracked.len())
            .unwrap_or(false)
    }

    /// Rebuild the working-directory commit at [`WORKING_DIR_ROW`].
    ///
    /// `diff_index` is the raw diff of the working tree against `parent`,
    /// `diff_index_cached` the raw diff of the index against `parent`, and
    /// `untracked` the untracked paths. The previous working-directory record
    /// is replaced wholesale.
    pub fn update_working_directory(
        &mut self,
        parent: &Sha,
        diff_index: &str,
        diff_index_cached: &str,
        untracked: &[String],
    ) {
        if self.locked {
            debug!("cache locked, dropping working directory update");
            return;
        }

        self.untracked = untracked.to_vec();
        let set = self.working_dir_change_set(diff_index, diff_index_cached);

        // cheap approximation: only untracked files means nothing to commit
        let summary = if set.len() == self.untracked.len() {
            NO_LOCAL_CHANGES
        } else {
            LOCAL_CHANGES
        };
        self.revision_files.insert(Sha::zero(), set);

        let mut commit = CommitInfo::new(Sha::zero(), vec![parent.clone()], WORKING_DIR_ROW)
            .with_log("-", self.now(), summary);
        commit.is_working_dir = true;

        // The first update of a session seeds the layout; later ones keep the
        // lanes already drawn for the row.
        let previous = self
            .get_by_row(WORKING_DIR_ROW)
            .filter(|_| !self.lanes.is_empty())
            .map(|c| c.lanes.clone());
        commit.lanes = match previous {
            Some(lanes) => lanes,
            None => self
                .lanes
                .process(&commit.sha, &commit.parents, commit.boundary),
        };

        let sha = commit.sha.clone();
        if WORKING_DIR_ROW >= self.rows.len() {
            self.rows.resize_with(WORKING_DIR_ROW + 1, || None);
        }
        self.rows[WORKING_DIR_ROW] = Some(commit);
        self.index.insert(sha, WORKING_DIR_ROW);
    }

    /// Tracked changes, then untracked files, each flagged `IN_INDEX` (and
    /// `CONFLICT`) when the index reports it too.
    fn working_dir_change_set(&mut self, diff_index: &str, diff_index_cached: &str) -> FileChangeSet {
        let mut parser = DiffParser::new(&mut self.names);

        let mut set = FileChangeSet::new();
        parser.parse_into(&mut set, diff_index);
        parser.append_untracked(&mut set, &self.untracked);
        let cached = parser.parse(diff_index_cached);

        set.set_only_modified(false);

        let staged: Vec<(usize, bool)> = set
            .iter()
            .enumerate()
            .filter_map(|(i, file)| {
                cached
                    .find(&file.path)
                    .map(|j| (i, cached.status_cmp(j, FileStatus::CONFLICT)))
            })
            .collect();

        for (i, conflict) in staged {
            if conflict {
                set.append_status(i, FileStatus::CONFLICT);
            }
            set.append_status(i, FileStatus::IN_INDEX);
        }

        set
    }

    /// Reset for a fresh load.
    ///
    /// Locks the cache until the next [`HistoryStore::configure`], and empties
    /// the name tables, identifier index, lane state and change sets. The row
    /// table is kept unless `clear_rows_on_reset` is configured. References
    /// are kept.
    pub fn clear(&mut self) {
        self.locked = true;

        self.names.clear();
        self.index.clear();
        self.lanes.clear();
        self.revision_files.clear();

        if self.config.clear_rows_on_reset {
            self.rows.clear();
        }

        debug!(rows_kept = self.rows.len(), "history cache cleared");
    }

    fn now(&self) -> i64 {
        match &self.time_provider {
            Some(provider) => provider.now(),
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs() as i64)
                .unwrap_or(0),
        }
    }
}
