//! Commit records held by the history cache.

use crate::error::{HistError, Result};
use crate::lanes::LaneType;
use crate::sha::Sha;
use serde::{Deserialize, Serialize};

/// One commit as displayed in the lanes view.
///
/// The default value is the "empty" record returned by lookups that miss;
/// [`CommitInfo::is_valid`] tells the two apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub sha: Sha,
    pub parents: Vec<Sha>,
    /// Display position, assigned by the caller.
    pub row: usize,
    /// History traversal stopped here; ancestors are not loaded.
    pub boundary: bool,
    pub author: String,
    /// Unix timestamp in seconds.
    pub timestamp: i64,
    pub short_log: String,
    pub long_log: String,
    /// Lane markers for this row, filled in on insertion.
    pub lanes: Vec<LaneType>,
    /// Synthetic commit standing for uncommitted local changes.
    pub is_working_dir: bool,
}

impl CommitInfo {
    /// Create a commit with identity and topology only.
    pub fn new(sha: impl Into<Sha>, parents: Vec<Sha>, row: usize) -> Self {
        Self {
            sha: sha.into(),
            parents,
            row,
            ..Default::default()
        }
    }

    /// Builder-style setter for the descriptive fields.
    pub fn with_log(mut self, author: &str, timestamp: i64, short_log: &str) -> Self {
        self.author = author.to_string();
        self.timestamp = timestamp;
        self.short_log = short_log.to_string();
        self
    }

    pub fn with_boundary(mut self, boundary: bool) -> Self {
        self.boundary = boundary;
        self
    }

    /// False for the empty record.
    pub fn is_valid(&self) -> bool {
        !self.sha.is_empty()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn parents_count(&self) -> usize {
        self.parents.len()
    }

    pub fn parent(&self, idx: usize) -> Option<&Sha> {
        self.parents.get(idx)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| HistError::Serialization(e.to_string()))
    }
}
