//! Branch and tag labels attached to commits.

use crate::sha::Sha;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Kind of a named reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RefKind {
    LocalBranch,
    RemoteBranch,
    Tag,
}

/// All names pointing at one commit, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    names: BTreeMap<RefKind, Vec<String>>,
}

impl Reference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name. Adding the same name twice is a no-op.
    pub fn add(&mut self, kind: RefKind, name: impl Into<String>) {
        let name = name.into();
        let names = self.names.entry(kind).or_default();
        if !names.contains(&name) {
            names.push(name);
        }
    }

    /// Names of the given kind, in insertion order.
    pub fn names(&self, kind: RefKind) -> &[String] {
        self.names.get(&kind).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.names.values().all(Vec::is_empty)
    }

    /// Every name, local branches first, comma-separated.
    pub fn label(&self) -> String {
        self.names
            .values()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Identifier → labels map. Inserting for an identifier replaces whatever
/// was stored for it before.
#[derive(Debug, Clone, Default)]
pub struct References {
    map: HashMap<Sha, Reference>,
}

impl References {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sha: Sha, reference: Reference) {
        self.map.insert(sha, reference);
    }

    pub fn get(&self, sha: &str) -> Option<&Reference> {
        self.map.get(sha)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Parse `show-ref` style text: `<sha> refs/heads/<name>` per line.
    ///
    /// Lines that are not recognized are skipped. Peeled tag lines
    /// (`refs/tags/<name>^{}`) attach the tag to the tagged commit.
    pub fn from_show_ref(text: &str) -> Self {
        let mut grouped: HashMap<Sha, Reference> = HashMap::new();

        for line in text.lines() {
            let Some((sha, full)) = line.trim().split_once(' ') else {
                continue;
            };
            let full = full.trim();

            let (kind, name) = if let Some(name) = full.strip_prefix("refs/heads/") {
                (RefKind::LocalBranch, name)
            } else if let Some(name) = full.strip_prefix("refs/remotes/") {
                (RefKind::RemoteBranch, name)
            } else if let Some(name) = full.strip_prefix("refs/tags/") {
                (RefKind::Tag, name.trim_end_matches("^{}"))
            } else {
                continue;
            };

            grouped.entry(Sha::new(sha)).or_default().add(kind, name);
        }

        Self { map: grouped }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Sha, &Reference)> {
        self.map.iter()
    }
}
