use crate::data::types::{DataError, DataResult, Heatmap, MatrixKind, Snapshot};

/// Square window of a pairwise matrix for the given participants.
///
/// Rows and columns follow the order of `indices`, so passing the indices
/// of a ranking lays the heatmap out by rank.
pub fn heatmap(snapshot: &Snapshot, kind: MatrixKind, indices: &[usize]) -> DataResult<Heatmap> {
    snapshot.validate()?;

    let n = snapshot.len();
    if let Some(bad) = indices.iter().find(|&&i| i >= n) {
        return Err(DataError::InvalidArgument(format!(
            "Participant index {} out of range for {} participants",
            bad, n
        )));
    }

    let matrix = snapshot.matrix(kind);
    let cells = indices
        .iter()
        .map(|&i| indices.iter().map(|&j| matrix[i][j]).collect())
        .collect();
    let labels = indices
        .iter()
        .map(|&i| snapshot.identity_keys()[i].clone())
        .collect();

    Ok(Heatmap {
        kind,
        labels,
        indices: indices.to_vec(),
        cells,
    })
}
