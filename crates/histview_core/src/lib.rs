//! histview core library
//!
//! The incremental history cache behind a graphical "lanes" view of a
//! repository's commit history:
//! - Per-commit lane layout computed while commits stream in
//! - Raw diff-summary parsing into per-commit change sets
//! - Interned path components shared by every change set
//! - A synthetic working-directory commit for uncommitted changes
//!
//! # Quick Start
//!
//! ```
//! use histview_core::{parse_log, HistoryStore, LaneType};
//!
//! let a = "a".repeat(40);
//! let b = "b".repeat(40);
//! let log = format!("{b} {a}\tdev\t1700000000\tsecond\n{a}\tdev\t1690000000\tfirst\n");
//!
//! let mut store = HistoryStore::new();
//! store.configure(16);
//! for commit in parse_log(&log, 1).unwrap() {
//!     store.insert(commit, None);
//! }
//!
//! assert_eq!(store.lookup_by_row(2).lanes, vec![LaneType::Initial]);
//! assert_eq!(store.lookup_by_identifier(&b[..7]).short_log, "second");
//! ```
//!
//! # Features
//!
//! ## Change Sets
//!
//! Raw diff text is parsed into a [`FileChangeSet`]; renames expand into a
//! created destination and a deleted origin:
//!
//! ```
//! use histview_core::{DiffParser, FileStatus, NameInterner};
//!
//! let mut names = NameInterner::new();
//! let set = DiffParser::new(&mut names).parse(":R90\told/a.txt\tnew/a.txt");
//!
//! assert_eq!(set.len(), 2);
//! assert_eq!(set.file(0).unwrap().status, FileStatus::NEW);
//! assert_eq!(set.ext_status(0), Some("old/a.txt --> new/a.txt (90%)"));
//! ```

mod cache;
mod commit;
mod config;
mod diff;
mod error;
mod lanes;
mod names;
mod refresh;
mod refs;
mod revision_file;
mod revlog;
mod sha;

pub use cache::{HistoryStore, WORKING_DIR_ROW};
pub use commit::CommitInfo;
pub use config::{CacheConfig, Config, RefreshConfig, CONFIG_FILE};
pub use diff::DiffParser;
pub use error::{HistError, Result};
pub use lanes::{LaneTracker, LaneType};
pub use names::{split_path, DirIdx, NameIdx, NameInterner};
pub use refresh::{RefreshController, RefreshHandler, RefreshRequest, RefreshSender};
pub use refs::{RefKind, Reference, References};
pub use revision_file::{FileChange, FileChangeSet, FileStatus};
pub use revlog::parse_log;
pub use sha::{Sha, ZERO_SHA};

/// Time provider trait for testing.
///
/// Allows injecting a controlled clock for the working-directory commit's
/// timestamp via `HistoryStore::with_time_provider()`.
pub trait TimeProvider: Send + Sync {
    /// Returns the current Unix timestamp in seconds.
    fn now(&self) -> i64;
}

impl<F> TimeProvider for F
where
    F: Fn() -> i64 + Send + Sync,
{
    fn now(&self) -> i64 {
        self()
    }
}
