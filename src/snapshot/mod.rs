//! Snapshot loading.
//!
//! The engine itself never fetches anything; this module materializes the
//! full project and task collections from exported JSON before analytics
//! run.

mod loader;

pub use loader::{Snapshot, SnapshotError};
