use super::assertions::Assertion;
use super::runner::ScenarioRunner;
use super::steps::ScenarioStep;
use histview_core::{FileStatus, LaneType};
use std::time::Duration;

/// Fluent DSL for building test scenarios
pub struct Scenario {
    name: String,
    config: Option<String>,
    steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Create a new scenario with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            config: None,
            steps: Vec::new(),
        }
    }

    // ===== Initial setup =====

    /// Contents of `histview.toml` for this scenario
    pub fn with_config(mut self, toml: &str) -> Self {
        self.config = Some(toml.to_string());
        self
    }

    // ===== Loading =====

    /// Parse and insert log text after the rows loaded so far
    pub fn load_log(mut self, text: &str) -> Self {
        self.steps.push(ScenarioStep::LoadLog {
            text: text.to_string(),
        });
        self
    }

    /// Parse and insert a log file from `tests/fixtures`
    pub fn load_fixture(mut self, name: &str) -> Self {
        self.steps.push(ScenarioStep::LoadFixture {
            name: name.to_string(),
        });
        self
    }

    /// Insert one commit at the next row
    pub fn commit(mut self, sha: &str, parents: &[&str]) -> Self {
        self.steps.push(ScenarioStep::InsertCommit {
            sha: sha.to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            diff: None,
        });
        self
    }

    /// Insert one commit together with its raw diff
    pub fn commit_with_diff(mut self, sha: &str, parents: &[&str], diff: &str) -> Self {
        self.steps.push(ScenarioStep::InsertCommit {
            sha: sha.to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            diff: Some(diff.to_string()),
        });
        self
    }

    /// Attach labels from `show-ref` text
    pub fn load_refs(mut self, text: &str) -> Self {
        self.steps.push(ScenarioStep::LoadReferences {
            text: text.to_string(),
        });
        self
    }

    // ===== Working directory =====

    /// Rebuild the working-directory commit
    pub fn update_working_dir(
        mut self,
        parent: &str,
        diff: &str,
        cached: &str,
        untracked: &[&str],
    ) -> Self {
        self.steps.push(ScenarioStep::UpdateWorkingDir {
            parent: parent.to_string(),
            diff: diff.to_string(),
            cached: cached.to_string(),
            untracked: untracked.iter().map(|u| u.to_string()).collect(),
        });
        self
    }

    // ===== Lifecycle =====

    /// Reset the cache for a fresh load
    pub fn clear(mut self) -> Self {
        self.steps.push(ScenarioStep::Clear);
        self
    }

    /// Size the cache and unlock it
    pub fn configure(mut self, capacity: usize) -> Self {
        self.steps.push(ScenarioStep::Configure { capacity });
        self
    }

    // ===== Time control =====

    /// Wait for a duration
    pub fn wait(mut self, duration: Duration) -> Self {
        self.steps.push(ScenarioStep::Wait { duration });
        self
    }

    // ===== Assertions =====

    /// Add a general assertion
    pub fn assert(mut self, assertion: Assertion) -> Self {
        self.steps.push(ScenarioStep::Assert { assertion });
        self
    }

    /// Assert number of indexed commits
    pub fn assert_commit_count(self, count: usize) -> Self {
        self.assert(Assertion::CommitCount(count))
    }

    /// Assert the lanes of a commit
    pub fn assert_lanes(self, id: &str, lanes: &[LaneType]) -> Self {
        self.assert(Assertion::Lanes {
            id: id.to_string(),
            lanes: lanes.to_vec(),
        })
    }

    /// Assert the subject line of a commit
    pub fn assert_short_log(self, id: &str, text: &str) -> Self {
        self.assert(Assertion::ShortLog {
            id: id.to_string(),
            text: text.to_string(),
        })
    }

    /// Assert the timestamp of a commit
    pub fn assert_timestamp(self, id: &str, timestamp: i64) -> Self {
        self.assert(Assertion::Timestamp {
            id: id.to_string(),
            timestamp,
        })
    }

    /// Assert `prefix` resolves to `sha`
    pub fn assert_resolves(self, prefix: &str, sha: &str) -> Self {
        self.assert(Assertion::Resolves {
            prefix: prefix.to_string(),
            sha: sha.to_string(),
        })
    }

    /// Assert nothing matches `id`
    pub fn assert_not_found(self, id: &str) -> Self {
        self.assert(Assertion::NotFound(id.to_string()))
    }

    /// Assert the exact status of one path in a commit's change set
    pub fn assert_file_status(self, id: &str, path: &str, status: FileStatus) -> Self {
        self.assert(Assertion::FileStatus {
            id: id.to_string(),
            path: path.to_string(),
            status,
        })
    }

    /// Assert the number of entries in a commit's change set
    pub fn assert_change_count(self, id: &str, count: usize) -> Self {
        self.assert(Assertion::ChangeCount {
            id: id.to_string(),
            count,
        })
    }

    /// Assert the pending local changes flag
    pub fn assert_pending_changes(self, pending: bool) -> Self {
        self.assert(Assertion::PendingLocalChanges(pending))
    }

    /// Assert the label drawn next to a commit
    pub fn assert_ref_label(self, id: &str, label: &str) -> Self {
        self.assert(Assertion::RefLabel {
            id: id.to_string(),
            label: label.to_string(),
        })
    }

    /// Assert the cache lock state
    pub fn assert_locked(self, locked: bool) -> Self {
        self.assert(Assertion::Locked(locked))
    }

    // ===== Execution =====

    /// Execute the scenario and return results
    pub fn run(self) -> ScenarioResult {
        let mut runner = match ScenarioRunner::new(self.config.as_deref()) {
            Ok(r) => r,
            Err(e) => {
                return ScenarioResult {
                    name: self.name.clone(),
                    success: false,
                    steps_executed: 0,
                    failure_step: Some(0),
                    error: Some(format!("Failed to create runner: {}", e)),
                }
            }
        };

        match runner.execute(&self.steps) {
            Ok(()) => ScenarioResult {
                name: self.name,
                success: true,
                steps_executed: self.steps.len(),
                failure_step: None,
                error: None,
            },
            Err(e) => {
                let failure_step = runner.current_step();
                ScenarioResult {
                    name: self.name,
                    success: false,
                    steps_executed: failure_step,
                    failure_step: Some(failure_step),
                    error: Some(format!("{:?}", e)),
                }
            }
        }
    }
}

/// Result of running a scenario
#[derive(Debug)]
pub struct ScenarioResult {
    pub name: String,
    pub success: bool,
    pub steps_executed: usize,
    pub failure_step: Option<usize>,
    pub error: Option<String>,
}

impl ScenarioResult {
    /// Unwrap the result, panicking if it failed
    pub fn unwrap(self) {
        if !self.success {
            panic!(
                "Scenario '{}' failed at step {}: {}",
                self.name,
                self.failure_step.unwrap_or(0),
                self.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }
    }

    /// Expect the result to be successful
    pub fn expect(self, msg: &str) {
        if !self.success {
            panic!(
                "{}: Scenario '{}' failed at step {}: {}",
                msg,
                self.name,
                self.failure_step.unwrap_or(0),
                self.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }
    }
}
