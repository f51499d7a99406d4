use super::fixtures_and_helpers::{diff, raw, raw_move};
use crate::harness::Scenario;
use histview_core::{FileStatus, LaneType};

#[test]
fn test_linear_history_lanes() {
    Scenario::new("linear_history_lanes")
        .commit("c", &["b"])
        .commit("b", &["a"])
        .commit("a", &[])
        .assert_commit_count(3)
        .assert_lanes("c", &[LaneType::Branch])
        .assert_lanes("b", &[LaneType::Active])
        .assert_lanes("a", &[LaneType::Initial])
        .run()
        .expect("scenario should pass");
}

#[test]
fn test_commit_change_sets() {
    let changes = diff(&[
        raw("M", "src/lib.rs"),
        raw("A", "src/new.rs"),
        raw_move("R087", "docs/old.md", "docs/new.md"),
    ]);

    Scenario::new("commit_change_sets")
        .commit_with_diff("c", &["b"], &changes)
        .commit_with_diff("b", &[], &raw("A", "src/lib.rs"))
        .assert_change_count("c", 4)
        .assert_file_status("c", "src/lib.rs", FileStatus::MODIFIED)
        .assert_file_status("c", "src/new.rs", FileStatus::NEW)
        .assert_file_status("c", "docs/new.md", FileStatus::NEW)
        .assert_file_status("c", "docs/old.md", FileStatus::DELETED)
        .assert_file_status("b", "src/lib.rs", FileStatus::NEW)
        .run()
        .unwrap();
}

#[test]
fn test_duplicate_commit_ignored() {
    Scenario::new("duplicate_commit_ignored")
        .load_log(&format!("{}\tdev\t10\tfirst\n", "a".repeat(40)))
        .load_log(&format!("{}\tdev\t20\tagain\n", "a".repeat(40)))
        .assert_commit_count(1)
        .assert_short_log("aaaaaaa", "first")
        .run()
        .unwrap();
}

#[test]
fn test_unknown_identifier() {
    Scenario::new("unknown_identifier")
        .commit("c", &["b"])
        .assert_not_found("d")
        .assert_not_found("")
        .run()
        .unwrap();
}
