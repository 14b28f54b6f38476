//! Shared test helpers for the recency workspace.
//!
//! Keeping these in a microcrate avoids copy-paste between unit tests,
//! property tests and the fuzz harness.

mod eviction_log;
pub mod model;
pub mod ops;
pub mod proptest;

pub use eviction_log::EvictionLog;
pub use model::ReferenceLru;
pub use ops::{CacheOp, decode_ops};
