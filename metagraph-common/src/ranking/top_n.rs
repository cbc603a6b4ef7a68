use std::cmp::Ordering;

use crate::data::types::{
    DataError, DataResult, Metric, ParticipantRow, RankedEntry, Ranking, Snapshot,
};

/// Descending order, NaN sinks to the end
fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

fn validate_count(n: i64) -> DataResult<usize> {
    if n < 0 {
        return Err(DataError::InvalidArgument(format!(
            "Count must be non-negative, got {}",
            n
        )));
    }
    // Auf 32-Bit-Zielen größer als usize: heißt ohnehin "alle"
    Ok(usize::try_from(n).unwrap_or(usize::MAX))
}

/// Top `n` entries of `values` by descending value, joined with identity keys.
///
/// Equal values keep their original index order. `n` larger than the
/// vector returns every entry.
pub fn top_n(values: &[f64], n: i64, identity_keys: &[String]) -> DataResult<Vec<RankedEntry>> {
    if values.len() != identity_keys.len() {
        return Err(DataError::ShapeMismatch {
            field: "values".to_string(),
            expected: identity_keys.len(),
            actual: values.len(),
        });
    }
    let n = validate_count(n)?;

    let mut order: Vec<usize> = (0..values.len()).collect();
    // sort_by ist stabil
    order.sort_by(|&a, &b| descending(values[a], values[b]));

    Ok(order
        .into_iter()
        .take(n)
        .map(|index| RankedEntry {
            identity_key: identity_keys[index].clone(),
            index,
            value: values[index],
        })
        .collect())
}

/// Rank one metric vector of a snapshot
pub fn rank_metric(snapshot: &Snapshot, metric: Metric, n: i64) -> DataResult<Ranking> {
    let entries = top_n(snapshot.values(metric), n, snapshot.identity_keys())?;
    Ok(Ranking { metric, entries })
}

/// Rank already joined rows by one field, same ordering as [`top_n`]
pub fn rank_rows(rows: &[ParticipantRow], metric: Metric, n: i64) -> DataResult<Ranking> {
    let n = validate_count(n)?;

    let mut order: Vec<&ParticipantRow> = rows.iter().collect();
    order.sort_by(|a, b| descending(a.get(metric), b.get(metric)));

    let entries = order
        .into_iter()
        .take(n)
        .map(|row| RankedEntry {
            identity_key: row.identity_key.clone(),
            index: row.index,
            value: row.get(metric),
        })
        .collect();

    Ok(Ranking { metric, entries })
}
