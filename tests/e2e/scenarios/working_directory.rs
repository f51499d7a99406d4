use super::fixtures_and_helpers::{diff, raw, MERGE, MERGE_LOG};
use crate::harness::Scenario;
use histview_core::{FileStatus, LaneType, ZERO_SHA};
use std::time::Duration;

#[test]
fn test_working_dir_before_history() {
    let tracked = diff(&[raw("M", "src/lib.rs"), raw("D", "old.rs")]);

    Scenario::new("working_dir_before_history")
        .update_working_dir(MERGE, &tracked, &raw("M", "src/lib.rs"), &["notes.txt"])
        .load_fixture(MERGE_LOG)
        .assert_commit_count(6)
        .assert_lanes(ZERO_SHA, &[LaneType::Branch])
        .assert_short_log(ZERO_SHA, "Local changes")
        .assert_timestamp(ZERO_SHA, 1_700_000_000)
        .assert_change_count(ZERO_SHA, 3)
        .assert_file_status(ZERO_SHA, "src/lib.rs", FileStatus::MODIFIED | FileStatus::IN_INDEX)
        .assert_file_status(ZERO_SHA, "old.rs", FileStatus::DELETED)
        .assert_file_status(ZERO_SHA, "notes.txt", FileStatus::UNKNOWN)
        .assert_pending_changes(true)
        .run()
        .expect("scenario should pass");
}

#[test]
fn test_working_dir_refresh_keeps_lanes() {
    Scenario::new("working_dir_refresh_keeps_lanes")
        .update_working_dir(MERGE, &raw("M", "a.rs"), "", &[])
        .load_fixture(MERGE_LOG)
        .wait(Duration::from_secs(60))
        .update_working_dir(MERGE, "", "", &["scratch.txt"])
        .assert_lanes(ZERO_SHA, &[LaneType::Branch])
        .assert_short_log(ZERO_SHA, "No local changes")
        .assert_timestamp(ZERO_SHA, 1_700_000_060)
        .assert_change_count(ZERO_SHA, 1)
        .assert_pending_changes(false)
        .assert_commit_count(6)
        .run()
        .unwrap();
}

#[test]
fn test_staged_conflict() {
    Scenario::new("staged_conflict")
        .update_working_dir(MERGE, "", &raw("U", "merge.txt"), &["merge.txt"])
        .assert_file_status(
            ZERO_SHA,
            "merge.txt",
            FileStatus::UNKNOWN | FileStatus::CONFLICT | FileStatus::IN_INDEX,
        )
        .run()
        .unwrap();
}
