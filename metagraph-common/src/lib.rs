pub mod data;
pub mod ranking;

pub use data::{DataError, DataResult, Metric, Snapshot, SnapshotCache};
