//! Lane layout for the history graph.
//!
//! Commits are fed one at a time in the order the VCS tool emits them
//! (children before parents). The tracker keeps one slot per visual column,
//! each remembering which identifier the line of descent drawn in that column
//! is waiting for. For every commit it decides whether the commit opens a
//! fork (several columns were waiting for it), closes a merge (it has several
//! parents) or terminates a line (it has none), and returns the markers for
//! the commit's row.
//!
//! The tracker does not validate ordering: feeding commits out of topological
//! order silently produces a wrong layout.

use crate::sha::Sha;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Marker drawn in one column of one row.
#[repr(u8)]
#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneType {
    Empty = 0,
    Active = 1,
    NotActive = 2,
    MergeFork = 3,
    MergeForkR = 4,
    MergeForkL = 5,
    Join = 6,
    JoinR = 7,
    JoinL = 8,
    Head = 9,
    HeadR = 10,
    HeadL = 11,
    Tail = 12,
    TailR = 13,
    TailL = 14,
    Cross = 15,
    CrossEmpty = 16,
    Initial = 17,
    Branch = 18,
    Boundary = 19,
    BoundaryC = 20,
    BoundaryR = 21,
    BoundaryL = 22,
}

impl LaneType {
    pub fn is_head(self) -> bool {
        matches!(self, Self::Head | Self::HeadR | Self::HeadL)
    }

    pub fn is_tail(self) -> bool {
        matches!(self, Self::Tail | Self::TailR | Self::TailL)
    }

    pub fn is_join(self) -> bool {
        matches!(self, Self::Join | Self::JoinR | Self::JoinL)
    }

    /// Column that passes through the row without touching the commit.
    pub fn is_free(self) -> bool {
        matches!(self, Self::NotActive | Self::Cross) || self.is_join()
    }

    pub fn is_boundary(self) -> bool {
        matches!(
            self,
            Self::Boundary | Self::BoundaryC | Self::BoundaryR | Self::BoundaryL
        )
    }

    /// The commit's own dot, regular or boundary.
    pub fn is_node(self) -> bool {
        matches!(
            self,
            Self::MergeFork
                | Self::MergeForkR
                | Self::MergeForkL
                | Self::BoundaryC
                | Self::BoundaryR
                | Self::BoundaryL
        )
    }

    pub fn is_merge(self) -> bool {
        matches!(self, Self::MergeFork | Self::MergeForkR | Self::MergeForkL) || self.is_boundary()
    }

    pub fn is_active(self) -> bool {
        self == Self::Active || self.is_merge()
    }
}

/// Node markers for the current row; boundary commits get their own set.
#[derive(Debug, Clone, Copy)]
struct NodeSet {
    center: LaneType,
    right: LaneType,
    left: LaneType,
}

impl NodeSet {
    fn for_boundary(boundary: bool) -> Self {
        if boundary {
            Self {
                center: LaneType::BoundaryC,
                right: LaneType::BoundaryR,
                left: LaneType::BoundaryL,
            }
        } else {
            Self {
                center: LaneType::MergeFork,
                right: LaneType::MergeForkR,
                left: LaneType::MergeForkL,
            }
        }
    }

    fn contains(&self, t: LaneType) -> bool {
        t == self.center || t == self.right || t == self.left
    }
}

/// Streaming lane-layout state machine.
#[derive(Debug, Clone)]
pub struct LaneTracker {
    types: Vec<LaneType>,
    /// Identifier each column is waiting for; empty once the line ended.
    next_sha: Vec<Sha>,
    active: usize,
    boundary: bool,
    node: NodeSet,
}

impl Default for LaneTracker {
    fn default() -> Self {
        Self {
            types: Vec::new(),
            next_sha: Vec::new(),
            active: 0,
            boundary: false,
            node: NodeSet::for_boundary(false),
        }
    }
}

impl LaneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True before the first commit of a session.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of open columns.
    pub fn lane_count(&self) -> usize {
        self.types.len()
    }

    /// Forget every column.
    pub fn clear(&mut self) {
        self.types.clear();
        self.next_sha.clear();
    }

    /// Lay out the row for one commit and advance the state to its parents.
    ///
    /// Returns the row's markers. The returned vector is an independent copy;
    /// later calls never alter it.
    pub fn process(&mut self, sha: &Sha, parents: &[Sha], is_boundary: bool) -> Vec<LaneType> {
        if self.is_empty() {
            self.init(sha);
        }

        let (is_fork, is_discontinuity) = self.is_fork(sha);
        let is_merge = parents.len() > 1;
        let is_initial = parents.is_empty();

        if is_discontinuity {
            // decided on the previous row's boundary state
            self.change_active_lane(sha);
        }

        self.set_boundary(is_boundary);

        if is_fork {
            self.set_fork(sha);
        }
        if is_merge {
            self.set_merge(parents);
        }
        if is_initial {
            self.set_initial();
        }

        let snapshot = self.types.clone();

        let next = parents.first().cloned().unwrap_or_default();
        self.next_parent(next);

        if is_merge {
            self.after_merge();
        }
        if is_fork {
            self.after_fork();
        }
        if self.is_branch() {
            self.after_branch();
        }

        snapshot
    }

    fn init(&mut self, expected: &Sha) {
        self.clear();
        self.active = 0;
        self.set_boundary(false);
        self.add(LaneType::Branch, expected.clone(), 0);
    }

    fn set_boundary(&mut self, boundary: bool) {
        self.node = NodeSet::for_boundary(boundary);
        self.boundary = boundary;

        if boundary {
            self.types[self.active] = LaneType::Boundary;
        }
    }

    /// Returns `(is_fork, is_discontinuity)`.
    ///
    /// A fork is a commit several columns were waiting for. A discontinuity is
    /// a commit that is not the one the active column expected next.
    fn is_fork(&self, sha: &Sha) -> (bool, bool) {
        match self.find_next_sha(sha, 0) {
            None => (false, true),
            Some(pos) => (
                self.find_next_sha(sha, pos + 1).is_some(),
                pos != self.active,
            ),
        }
    }

    fn change_active_lane(&mut self, sha: &Sha) {
        // a line that ended (root or boundary commit) frees its column
        let ended = self.next_sha[self.active].is_empty();
        let t = &mut self.types[self.active];
        *t = if ended || *t == LaneType::Initial || t.is_boundary() {
            LaneType::Empty
        } else {
            LaneType::NotActive
        };

        let idx = match self.find_next_sha(sha, 0) {
            Some(idx) => {
                self.types[idx] = LaneType::Active;
                idx
            }
            None => self.add(LaneType::Branch, sha.clone(), self.active),
        };

        self.active = idx;
    }

    fn set_fork(&mut self, sha: &Sha) {
        let Some(first) = self.find_next_sha(sha, 0) else {
            return;
        };

        let range_start = first;
        let mut range_end = first;
        let mut idx = Some(first);
        while let Some(i) = idx {
            range_end = i;
            self.types[i] = LaneType::Tail;
            idx = self.find_next_sha(sha, i + 1);
        }
        self.types[self.active] = self.node.center;

        if self.types[range_start] == self.node.center {
            self.types[range_start] = self.node.left;
        }
        if self.types[range_end] == self.node.center {
            self.types[range_end] = self.node.right;
        }
        if self.types[range_start] == LaneType::Tail {
            self.types[range_start] = LaneType::TailL;
        }
        if self.types[range_end] == LaneType::Tail {
            self.types[range_end] = LaneType::TailR;
        }

        for t in &mut self.types[range_start + 1..range_end] {
            match *t {
                LaneType::NotActive => *t = LaneType::Cross,
                LaneType::Empty => *t = LaneType::CrossEmpty,
                _ => {}
            }
        }
    }

    /// Must run after `set_fork`.
    fn set_merge(&mut self, parents: &[Sha]) {
        if self.boundary {
            // drawn as a plain active line
            return;
        }

        let t = self.types[self.active];
        let was_fork = t == self.node.center;
        let was_fork_l = t == self.node.left;
        let was_fork_r = t == self.node.right;
        let mut start_join_was_cross = false;
        let mut end_join_was_cross = false;

        self.types[self.active] = self.node.center;

        let mut range_start = self.active;
        let mut range_end = self.active;
        for parent in parents.iter().skip(1) {
            match self.find_next_sha(parent, 0) {
                Some(idx) => {
                    if idx > range_end {
                        range_end = idx;
                        end_join_was_cross = self.types[idx] == LaneType::Cross;
                    }
                    if idx < range_start {
                        range_start = idx;
                        start_join_was_cross = self.types[idx] == LaneType::Cross;
                    }
                    self.types[idx] = LaneType::Join;
                }
                None => range_end = self.add(LaneType::Head, parent.clone(), range_end + 1),
            }
        }

        if self.types[range_start] == self.node.center && !was_fork && !was_fork_r {
            self.types[range_start] = self.node.left;
        }
        if self.types[range_end] == self.node.center && !was_fork && !was_fork_l {
            self.types[range_end] = self.node.right;
        }
        if self.types[range_start] == LaneType::Join && !start_join_was_cross {
            self.types[range_start] = LaneType::JoinL;
        }
        if self.types[range_end] == LaneType::Join && !end_join_was_cross {
            self.types[range_end] = LaneType::JoinR;
        }
        if self.types[range_start] == LaneType::Head {
            self.types[range_start] = LaneType::HeadL;
        }
        if self.types[range_end] == LaneType::Head {
            self.types[range_end] = LaneType::HeadR;
        }

        for t in &mut self.types[range_start + 1..range_end] {
            match *t {
                LaneType::NotActive => *t = LaneType::Cross,
                LaneType::Empty => *t = LaneType::CrossEmpty,
                LaneType::TailR | LaneType::TailL => *t = LaneType::Tail,
                _ => {}
            }
        }
    }

    fn set_initial(&mut self) {
        let boundary = self.boundary;
        let node = self.node;
        let t = &mut self.types[self.active];
        if !node.contains(*t) {
            *t = if boundary {
                LaneType::Boundary
            } else {
                LaneType::Initial
            };
        }
    }

    fn next_parent(&mut self, sha: Sha) {
        self.next_sha[self.active] = if self.boundary { Sha::default() } else { sha };
    }

    fn after_merge(&mut self) {
        if self.boundary {
            // reset by the next change_active_lane
            return;
        }

        let node = self.node;
        for t in &mut self.types {
            if t.is_head() || t.is_join() || *t == LaneType::Cross {
                *t = LaneType::NotActive;
            } else if *t == LaneType::CrossEmpty {
                *t = LaneType::Empty;
            } else if node.contains(*t) {
                *t = LaneType::Active;
            }
        }
    }

    fn after_fork(&mut self) {
        let node = self.node;
        let boundary = self.boundary;
        for t in &mut self.types {
            if *t == LaneType::Cross {
                *t = LaneType::NotActive;
            } else if t.is_tail() || *t == LaneType::CrossEmpty {
                *t = LaneType::Empty;
            }
            if !boundary && node.contains(*t) {
                *t = LaneType::Active;
            }
        }

        while self.types.last() == Some(&LaneType::Empty) {
            self.types.pop();
            self.next_sha.pop();
        }
    }

    fn is_branch(&self) -> bool {
        self.types.get(self.active) == Some(&LaneType::Branch)
    }

    fn after_branch(&mut self) {
        self.types[self.active] = LaneType::Active;
    }

    fn find_next_sha(&self, sha: &Sha, pos: usize) -> Option<usize> {
        self.next_sha
            .iter()
            .skip(pos)
            .position(|next| next == sha)
            .map(|i| i + pos)
    }

    /// Reuse the first empty column at or after `pos`, or open a new one.
    fn add(&mut self, t: LaneType, next: Sha, pos: usize) -> usize {
        if pos < self.types.len() {
            if let Some(free) = self.types[pos..].iter().position(|&x| x == LaneType::Empty) {
                let idx = pos + free;
                self.types[idx] = t;
                self.next_sha[idx] = next;
                return idx;
            }
        }

        self.types.push(t);
        self.next_sha.push(next);
        self.types.len() - 1
    }
}
