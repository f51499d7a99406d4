use super::fixtures_and_helpers::{FEATURE, MERGE, MERGE_LOG, PARSER, ROOT, TYPO};
use crate::harness::Scenario;
use histview_core::HistoryStore;
use histview_core::LaneType::*;

#[test]
fn test_merge_fixture_lanes() {
    Scenario::new("merge_fixture_lanes")
        .load_fixture(MERGE_LOG)
        .assert_commit_count(5)
        .assert_lanes(MERGE, &[MergeForkL, HeadR])
        .assert_lanes(FEATURE, &[NotActive, Active])
        .assert_lanes(TYPO, &[Active, NotActive])
        .assert_lanes(PARSER, &[MergeForkL, TailR])
        .assert_lanes(ROOT, &[Initial])
        .run()
        .expect("scenario should pass");
}

#[test]
fn test_prefix_lookup() {
    Scenario::new("prefix_lookup")
        .load_fixture(MERGE_LOG)
        .assert_resolves("1111111", MERGE)
        .assert_resolves(ROOT, ROOT)
        .assert_short_log("3333", "Add feature flag")
        .assert_not_found("6666")
        .run()
        .unwrap();
}

#[test]
fn test_octopus_closes_columns() {
    Scenario::new("octopus_closes_columns")
        .commit("o", &["a", "b", "c"])
        .commit("c", &["base"])
        .commit("b", &["base"])
        .commit("a", &["base"])
        .commit("base", &[])
        .assert_commit_count(5)
        .assert(crate::harness::Assertion::Custom(Box::new(|store: &mut HistoryStore| {
            let widths: Vec<usize> = store.iter().map(|c| c.lanes.len()).collect();
            anyhow::ensure!(widths == vec![3, 3, 3, 3, 3], "widths {:?}", widths);
            Ok(())
        })))
        .run()
        .unwrap();
}
