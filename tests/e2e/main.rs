//! End-to-end scenarios for the history cache.

mod harness;
