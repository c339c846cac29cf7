//! Index Module
//!
//! In-memory key-value state rebuilt from the log.
//!
//! ## Responsibilities
//! - Replay the log on construction (last write wins)
//! - Validate mutations before they reach the log
//! - Apply a mutation in memory only after its append succeeded
//!
//! ## Data Structure Choice
//! A plain HashMap owned by the index. Iteration order is irrelevant to
//! correctness; only log order matters for reconstruction. `snapshot()`
//! returns a sorted copy for reporting.

mod recovery;
mod shared;
mod table;

pub use recovery::RecoveryResult;
pub use shared::SharedIndex;
pub use table::KeyValueIndex;
