use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =================================================================
// Error Types
// =================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Shape mismatch in {field}: expected {expected}, got {actual}")]
    ShapeMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DataError {
    pub(crate) fn shape(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        DataError::ShapeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }
}

pub type DataResult<T> = Result<T, DataError>;

// =================================================================
// Metrics
// =================================================================

/// Per-participant numeric vectors carried by a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Active,
    Stake,
    Rank,
    Trust,
    Consensus,
    Incentive,
    Dividends,
    Emission,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::Active,
        Metric::Stake,
        Metric::Rank,
        Metric::Trust,
        Metric::Consensus,
        Metric::Incentive,
        Metric::Dividends,
        Metric::Emission,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Active => "active",
            Metric::Stake => "stake",
            Metric::Rank => "rank",
            Metric::Trust => "trust",
            Metric::Consensus => "consensus",
            Metric::Incentive => "incentive",
            Metric::Dividends => "dividends",
            Metric::Emission => "emission",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == name)
            .ok_or_else(|| DataError::InvalidArgument(format!("Unknown metric: {}", s)))
    }
}

/// The two pairwise matrices of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixKind {
    Weight,
    Bond,
}

impl MatrixKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatrixKind::Weight => "weight",
            MatrixKind::Bond => "bond",
        }
    }
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatrixKind {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weight" | "weights" => Ok(MatrixKind::Weight),
            "bond" | "bonds" => Ok(MatrixKind::Bond),
            _ => Err(DataError::InvalidArgument(format!("Unknown matrix: {}", s))),
        }
    }
}

// =================================================================
// Snapshot
// =================================================================

/// Aligned per-participant vectors, one entry per index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricVectors {
    pub active: Vec<f64>,
    pub stake: Vec<f64>,
    pub rank: Vec<f64>,
    pub trust: Vec<f64>,
    pub consensus: Vec<f64>,
    pub incentive: Vec<f64>,
    pub dividends: Vec<f64>,
    pub emission: Vec<f64>,
}

impl MetricVectors {
    pub fn get(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::Active => &self.active,
            Metric::Stake => &self.stake,
            Metric::Rank => &self.rank,
            Metric::Trust => &self.trust,
            Metric::Consensus => &self.consensus,
            Metric::Incentive => &self.incentive,
            Metric::Dividends => &self.dividends,
            Metric::Emission => &self.emission,
        }
    }
}

/// Point-in-time capture of the network state.
///
/// Every vector and both matrices are indexed by the same participant
/// index `0..len()`. Built once by a provider and never mutated.
/// Deserialization goes through [`Snapshot::new`], so a decoded snapshot
/// is always shape-checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotRecord")]
pub struct Snapshot {
    pub network: String,
    pub block: u64,
    pub fetched_at: DateTime<Utc>,
    identity_keys: Vec<String>,
    metrics: MetricVectors,
    weight: Vec<Vec<f64>>,
    bond: Vec<Vec<f64>>,
}

/// Unchecked serde form of [`Snapshot`]
#[derive(Deserialize)]
struct SnapshotRecord {
    network: String,
    block: u64,
    fetched_at: DateTime<Utc>,
    identity_keys: Vec<String>,
    metrics: MetricVectors,
    weight: Vec<Vec<f64>>,
    bond: Vec<Vec<f64>>,
}

impl TryFrom<SnapshotRecord> for Snapshot {
    type Error = DataError;

    fn try_from(record: SnapshotRecord) -> DataResult<Self> {
        Snapshot::new(
            record.network,
            record.block,
            record.identity_keys,
            record.metrics,
            record.weight,
            record.bond,
        )
        .map(|snapshot| snapshot.with_fetched_at(record.fetched_at))
    }
}

impl Snapshot {
    /// Build a snapshot, rejecting any vector or matrix whose length
    /// disagrees with the number of identity keys.
    pub fn new(
        network: impl Into<String>,
        block: u64,
        identity_keys: Vec<String>,
        metrics: MetricVectors,
        weight: Vec<Vec<f64>>,
        bond: Vec<Vec<f64>>,
    ) -> DataResult<Self> {
        let snapshot = Self {
            network: network.into(),
            block,
            fetched_at: Utc::now(),
            identity_keys,
            metrics,
            weight,
            bond,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Skips validation; lets tests feed malformed shapes to the ranking functions
    #[cfg(test)]
    pub(crate) fn unchecked(
        identity_keys: Vec<String>,
        metrics: MetricVectors,
        weight: Vec<Vec<f64>>,
        bond: Vec<Vec<f64>>,
    ) -> Self {
        Self {
            network: "test".to_string(),
            block: 0,
            fetched_at: Utc::now(),
            identity_keys,
            metrics,
            weight,
            bond,
        }
    }

    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = fetched_at;
        self
    }

    pub fn validate(&self) -> DataResult<()> {
        let n = self.identity_keys.len();

        for metric in Metric::ALL {
            let len = self.metrics.get(metric).len();
            if len != n {
                return Err(DataError::shape(metric.as_str(), n, len));
            }
        }

        for (kind, matrix) in [(MatrixKind::Weight, &self.weight), (MatrixKind::Bond, &self.bond)] {
            if matrix.len() != n {
                return Err(DataError::shape(kind.as_str(), n, matrix.len()));
            }
            for (i, row) in matrix.iter().enumerate() {
                if row.len() != n {
                    return Err(DataError::shape(format!("{}[{}]", kind, i), n, row.len()));
                }
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.identity_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identity_keys.is_empty()
    }

    pub fn identity_keys(&self) -> &[String] {
        &self.identity_keys
    }

    pub fn metrics(&self) -> &MetricVectors {
        &self.metrics
    }

    pub fn values(&self, metric: Metric) -> &[f64] {
        self.metrics.get(metric)
    }

    pub fn matrix(&self, kind: MatrixKind) -> &[Vec<f64>] {
        match kind {
            MatrixKind::Weight => &self.weight,
            MatrixKind::Bond => &self.bond,
        }
    }
}

// =================================================================
// Derived Records
// =================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub identity_key: String,
    pub index: usize,
    pub value: f64,
}

/// Top-N table for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub metric: Metric,
    pub entries: Vec<RankedEntry>,
}

impl Ranking {
    pub fn indices(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.index).collect()
    }
}

/// One participant with every metric joined on its index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRow {
    pub index: usize,
    pub identity_key: String,
    pub active: f64,
    pub stake: f64,
    pub rank: f64,
    pub trust: f64,
    pub consensus: f64,
    pub incentive: f64,
    pub dividends: f64,
    pub emission: f64,
}

impl ParticipantRow {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Active => self.active,
            Metric::Stake => self.stake,
            Metric::Rank => self.rank,
            Metric::Trust => self.trust,
            Metric::Consensus => self.consensus,
            Metric::Incentive => self.incentive,
            Metric::Dividends => self.dividends,
            Metric::Emission => self.emission,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active > 0.0
    }
}

/// Square window of the weight or bond matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    pub kind: MatrixKind,
    pub labels: Vec<String>,
    pub indices: Vec<usize>,
    pub cells: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub network: String,
    pub block: u64,
    pub participants: usize,
    pub active_count: usize,
    pub total_stake: f64,
    pub total_emission: f64,
}

impl NetworkSummary {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let metrics = snapshot.metrics();
        Self {
            network: snapshot.network.clone(),
            block: snapshot.block,
            participants: snapshot.len(),
            active_count: metrics.active.iter().filter(|a| **a > 0.0).count(),
            total_stake: metrics.stake.iter().sum(),
            total_emission: metrics.emission.iter().sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectors(n: usize) -> MetricVectors {
        MetricVectors {
            active: vec![1.0; n],
            stake: vec![2.0; n],
            rank: vec![0.0; n],
            trust: vec![0.0; n],
            consensus: vec![0.0; n],
            incentive: vec![0.0; n],
            dividends: vec![0.0; n],
            emission: vec![0.5; n],
        }
    }

    fn keys(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("5Hk{}", i)).collect()
    }

    #[test]
    fn test_snapshot_accepts_aligned_vectors() {
        let snapshot =
            Snapshot::new("nakamoto", 7, keys(3), vectors(3), vec![vec![0.0; 3]; 3], vec![vec![0.0; 3]; 3])
                .unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.values(Metric::Stake), &[2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_snapshot_rejects_short_vector() {
        let mut v = vectors(3);
        v.trust.pop();
        let err = Snapshot::new("nakamoto", 1, keys(3), v, vec![vec![0.0; 3]; 3], vec![vec![0.0; 3]; 3])
            .unwrap_err();
        assert_eq!(err, DataError::shape("trust", 3, 2));
    }

    #[test]
    fn test_snapshot_rejects_ragged_matrix() {
        let mut bond = vec![vec![0.0; 3]; 3];
        bond[1].push(1.0);
        let err = Snapshot::new("nakamoto", 1, keys(3), vectors(3), vec![vec![0.0; 3]; 3], bond).unwrap_err();
        assert!(matches!(err, DataError::ShapeMismatch { ref field, .. } if field == "bond[1]"));
    }

    #[test]
    fn test_deserialize_rejects_misaligned_snapshot() {
        let json = r#"{
            "network": "nakamoto",
            "block": 1,
            "fetched_at": "2024-01-01T00:00:00Z",
            "identity_keys": ["a", "b"],
            "metrics": {
                "active": [1.0], "stake": [0.0, 0.0], "rank": [0.0, 0.0], "trust": [0.0, 0.0],
                "consensus": [0.0, 0.0], "incentive": [0.0, 0.0], "dividends": [0.0, 0.0],
                "emission": [0.0, 0.0]
            },
            "weight": [[0.0]],
            "bond": [[0.0, 0.0], [0.0, 0.0]]
        }"#;

        let err = serde_json::from_str::<Snapshot>(json).unwrap_err();
        assert!(err.to_string().contains("Shape mismatch in active"));
    }

    #[test]
    fn test_serialized_snapshot_decodes_back() {
        let snapshot =
            Snapshot::new("nakamoto", 7, keys(2), vectors(2), vec![vec![0.5; 2]; 2], vec![vec![0.0; 2]; 2])
                .unwrap();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(serde_json::from_str::<Snapshot>(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_metric_names_round_trip_through_from_str() {
        for metric in Metric::ALL {
            assert_eq!(metric.as_str().parse::<Metric>().unwrap(), metric);
        }
        assert_eq!(" Stake ".parse::<Metric>().unwrap(), Metric::Stake);
        assert!("uptime".parse::<Metric>().is_err());
    }

    #[test]
    fn test_summary_counts_active_and_sums() {
        let mut v = vectors(4);
        v.active = vec![1.0, 0.0, 1.0, 0.0];
        let snapshot =
            Snapshot::new("nakamoto", 42, keys(4), v, vec![vec![0.0; 4]; 4], vec![vec![0.0; 4]; 4]).unwrap();

        let summary = NetworkSummary::from_snapshot(&snapshot);
        assert_eq!(summary.participants, 4);
        assert_eq!(summary.active_count, 2);
        assert_eq!(summary.total_stake, 8.0);
        assert_eq!(summary.total_emission, 2.0);
        assert_eq!(summary.block, 42);
    }
}
