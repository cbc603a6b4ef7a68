pub mod cache;
pub mod types;

pub use cache::SnapshotCache;
pub use types::{
    DataError, DataResult, Heatmap, MatrixKind, Metric, MetricVectors, NetworkSummary,
    ParticipantRow, RankedEntry, Ranking, Snapshot,
};
