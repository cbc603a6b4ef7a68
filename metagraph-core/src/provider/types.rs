// provider/types.rs

use metagraph_common::data::{MetricVectors, Snapshot};
use metagraph_common::DataResult;
use serde::{Deserialize, Serialize};

/// JSON wire form of a metagraph snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotPayload {
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub block: u64,
    pub hotkeys: Vec<String>,
    pub active: Vec<f64>,
    pub stake: Vec<f64>,
    pub ranks: Vec<f64>,
    pub trust: Vec<f64>,
    pub consensus: Vec<f64>,
    pub incentive: Vec<f64>,
    pub dividends: Vec<f64>,
    pub emission: Vec<f64>,
    #[serde(default)]
    pub weights: Vec<Vec<f64>>,
    #[serde(default)]
    pub bonds: Vec<Vec<f64>>,
}

impl SnapshotPayload {
    /// Validate and convert; a payload without a network name takes `fallback_network`
    pub fn into_snapshot(self, fallback_network: &str) -> DataResult<Snapshot> {
        let network = if self.network.is_empty() {
            fallback_network.to_string()
        } else {
            self.network
        };

        let metrics = MetricVectors {
            active: self.active,
            stake: self.stake,
            rank: self.ranks,
            trust: self.trust,
            consensus: self.consensus,
            incentive: self.incentive,
            dividends: self.dividends,
            emission: self.emission,
        };

        Snapshot::new(network, self.block, self.hotkeys, metrics, self.weights, self.bonds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metagraph_common::{DataError, Metric};

    const PAYLOAD: &str = r#"{
        "block": 812,
        "hotkeys": ["5Ca", "5Cb"],
        "active": [1, 0],
        "stake": [100.5, 20.0],
        "ranks": [0.6, 0.4],
        "trust": [0.9, 0.1],
        "consensus": [0.5, 0.5],
        "incentive": [0.7, 0.3],
        "dividends": [0.2, 0.8],
        "emission": [1.5, 0.5],
        "weights": [[0.0, 1.0], [1.0, 0.0]],
        "bonds": [[0.0, 0.3], [0.7, 0.0]]
    }"#;

    #[test]
    fn test_payload_converts_to_snapshot() {
        let payload: SnapshotPayload = serde_json::from_str(PAYLOAD).unwrap();
        let snapshot = payload.into_snapshot("nakamoto").unwrap();

        assert_eq!(snapshot.network, "nakamoto");
        assert_eq!(snapshot.block, 812);
        assert_eq!(snapshot.values(Metric::Rank), &[0.6, 0.4]);
        assert_eq!(snapshot.values(Metric::Active), &[1.0, 0.0]);
    }

    #[test]
    fn test_missing_matrices_are_a_shape_error() {
        let mut payload: SnapshotPayload = serde_json::from_str(PAYLOAD).unwrap();
        payload.bonds.clear();
        let err = payload.into_snapshot("nakamoto").unwrap_err();
        assert!(matches!(err, DataError::ShapeMismatch { ref field, .. } if field == "bond"));
    }
}
