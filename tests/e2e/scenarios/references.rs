use super::fixtures_and_helpers::{MERGE, MERGE_LOG, PARSER};
use crate::harness::Scenario;

#[test]
fn test_labels_attach_to_commits() {
    let refs = format!(
        "{MERGE} refs/heads/main\n{MERGE} refs/remotes/origin/main\n{PARSER} refs/tags/v0.1^{{}}\n"
    );

    Scenario::new("labels_attach_to_commits")
        .load_fixture(MERGE_LOG)
        .load_refs(&refs)
        .assert_ref_label(MERGE, "main, origin/main")
        .assert_ref_label(PARSER, "v0.1")
        .run()
        .unwrap();
}

#[test]
fn test_labels_survive_clear() {
    Scenario::new("labels_survive_clear")
        .load_fixture(MERGE_LOG)
        .load_refs(&format!("{MERGE} refs/heads/main\n"))
        .clear()
        .configure(10)
        .load_fixture(MERGE_LOG)
        .assert_ref_label(MERGE, "main")
        .run()
        .unwrap();
}
