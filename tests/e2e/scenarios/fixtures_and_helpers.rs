//! Shared identifiers and raw diff builders for scenarios.

/// Commits of `fixtures/merge.log`, newest first.
pub const MERGE: &str = "1111111111111111111111111111111111111111";
pub const FEATURE: &str = "3333333333333333333333333333333333333333";
pub const TYPO: &str = "2222222222222222222222222222222222222222";
pub const PARSER: &str = "4444444444444444444444444444444444444444";
pub const ROOT: &str = "5555555555555555555555555555555555555555";

pub const MERGE_LOG: &str = "merge.log";

/// One raw diff record in the fixed-width layout.
pub fn raw(status: &str, path: &str) -> String {
    format!(
        ":100644 100644 {} {} {}\t{}",
        "a".repeat(40),
        "b".repeat(40),
        status,
        path
    )
}

/// A rename or copy record.
pub fn raw_move(status: &str, from: &str, to: &str) -> String {
    format!(
        ":100644 100644 {} {} {}\t{}\t{}",
        "a".repeat(40),
        "b".repeat(40),
        status,
        from,
        to
    )
}

/// Join records into diff text.
pub fn diff(records: &[String]) -> String {
    records.join("\n")
}

#[test]
fn test_raw_record_uses_fixed_layout() {
    let record = raw("M", "src/lib.rs");
    assert_eq!(record.as_bytes()[97], b'M');
    assert_eq!(record.as_bytes()[98], b'\t');
}
