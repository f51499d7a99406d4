use super::fixtures_and_helpers::{MERGE, MERGE_LOG, PARSER, ROOT};
use crate::harness::{Assertion, Scenario};
use histview_core::HistoryStore;
use histview_core::LaneType::*;

#[test]
fn test_clear_locks_until_configured() {
    Scenario::new("clear_locks_until_configured")
        .load_fixture(MERGE_LOG)
        .clear()
        .assert_locked(true)
        .assert_commit_count(0)
        .commit("x", &[])
        .assert_commit_count(0)
        .configure(10)
        .assert_locked(false)
        .run()
        .unwrap();
}

#[test]
fn test_reload_matches_fresh_load() {
    Scenario::new("reload_matches_fresh_load")
        .load_fixture(MERGE_LOG)
        .clear()
        .configure(10)
        .load_fixture(MERGE_LOG)
        .assert_commit_count(5)
        .assert_lanes(MERGE, &[MergeForkL, HeadR])
        .assert_lanes(PARSER, &[MergeForkL, TailR])
        .assert_lanes(ROOT, &[Initial])
        .run()
        .unwrap();
}

#[test]
fn test_rows_kept_by_default() {
    Scenario::new("rows_kept_by_default")
        .load_fixture(MERGE_LOG)
        .clear()
        .assert(Assertion::Custom(Box::new(|store: &mut HistoryStore| {
            anyhow::ensure!(store.get_by_row(1).is_some(), "row 1 was dropped");
            Ok(())
        })))
        .run()
        .unwrap();
}

#[test]
fn test_rows_dropped_when_configured() {
    Scenario::new("rows_dropped_when_configured")
        .with_config("[cache]\nclear_rows_on_reset = true\n")
        .load_fixture(MERGE_LOG)
        .clear()
        .assert(Assertion::Custom(Box::new(|store: &mut HistoryStore| {
            anyhow::ensure!(store.row_count() == 0, "rows kept: {}", store.row_count());
            Ok(())
        })))
        .configure(4)
        .load_fixture(MERGE_LOG)
        .assert_commit_count(5)
        .run()
        .unwrap();
}

#[test]
fn test_compacted_index_forgets_parents() {
    Scenario::new("compacted_index_forgets_parents")
        .with_config("[cache]\ncompact_parent_index = true\n")
        .commit("p", &[])
        .commit("c", &["p"])
        .assert_not_found("p")
        .assert_commit_count(1)
        .run()
        .unwrap();
}
