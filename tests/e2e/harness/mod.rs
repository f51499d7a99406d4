//! E2E test harness for histview.
//!
//! Builders, variants and helpers here are shared by all scenarios; not every
//! scenario uses every one of them.

#![allow(dead_code)]

pub mod clock;
pub mod scenario;

// Re-export commonly used types
pub use assertions::Assertion;
pub use scenario::Scenario;
