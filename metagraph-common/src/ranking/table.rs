use crate::data::types::{DataError, DataResult, Metric, ParticipantRow, Snapshot};

/// One row per participant, in index order
pub fn join_rows(snapshot: &Snapshot) -> DataResult<Vec<ParticipantRow>> {
    let n = snapshot.len();
    let metrics = snapshot.metrics();

    for metric in Metric::ALL {
        let len = metrics.get(metric).len();
        if len != n {
            return Err(DataError::ShapeMismatch {
                field: metric.to_string(),
                expected: n,
                actual: len,
            });
        }
    }

    Ok(snapshot
        .identity_keys()
        .iter()
        .enumerate()
        .map(|(index, key)| ParticipantRow {
            index,
            identity_key: key.clone(),
            active: metrics.active[index],
            stake: metrics.stake[index],
            rank: metrics.rank[index],
            trust: metrics.trust[index],
            consensus: metrics.consensus[index],
            incentive: metrics.incentive[index],
            dividends: metrics.dividends[index],
            emission: metrics.emission[index],
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::MetricVectors;

    #[test]
    fn test_rows_follow_index_order() {
        let metrics = MetricVectors {
            active: vec![1.0, 0.0, 1.0],
            stake: vec![10.0, 20.0, 30.0],
            rank: vec![0.1, 0.2, 0.3],
            trust: vec![0.4, 0.5, 0.6],
            consensus: vec![0.7, 0.8, 0.9],
            incentive: vec![1.1, 1.2, 1.3],
            dividends: vec![2.1, 2.2, 2.3],
            emission: vec![3.1, 3.2, 3.3],
        };
        let keys = vec!["5Fa".to_string(), "5Fb".to_string(), "5Fc".to_string()];
        let snapshot =
            Snapshot::new("nakamoto", 1, keys, metrics, vec![vec![0.0; 3]; 3], vec![vec![0.0; 3]; 3])
                .unwrap();

        let rows = join_rows(&snapshot).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.iter().map(|r| r.index).collect::<Vec<_>>(), vec![0, 1, 2]);

        let middle = &rows[1];
        assert_eq!(middle.identity_key, "5Fb");
        assert!(!middle.is_active());
        assert_eq!(middle.get(Metric::Stake), 20.0);
        assert_eq!(middle.get(Metric::Consensus), 0.8);
        assert_eq!(middle.get(Metric::Emission), 3.2);
    }

    #[test]
    fn test_short_metric_vector_is_a_shape_error() {
        let mut metrics = MetricVectors {
            active: vec![1.0; 2],
            stake: vec![0.0; 2],
            rank: vec![0.0; 2],
            trust: vec![0.0; 2],
            consensus: vec![0.0; 2],
            incentive: vec![0.0; 2],
            dividends: vec![0.0; 2],
            emission: vec![0.0; 2],
        };
        metrics.dividends.pop();
        let keys = vec!["a".to_string(), "b".to_string()];
        let broken = Snapshot::unchecked(keys, metrics, vec![vec![0.0; 2]; 2], vec![vec![0.0; 2]; 2]);

        let err = join_rows(&broken).unwrap_err();
        assert_eq!(
            err,
            DataError::ShapeMismatch {
                field: "dividends".to_string(),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_empty_snapshot_yields_no_rows() {
        let snapshot =
            Snapshot::new("nakamoto", 0, Vec::new(), MetricVectors::default(), Vec::new(), Vec::new())
                .unwrap();
        assert!(join_rows(&snapshot).unwrap().is_empty());
    }
}
