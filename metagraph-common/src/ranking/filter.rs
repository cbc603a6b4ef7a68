use crate::data::types::{DataError, DataResult, Metric, ParticipantRow};

/// Rows whose `field` lies in `[min_value, max_value]`, original order kept.
///
/// `min_value > max_value` is an empty selection rather than an error;
/// a slider handle dragged past the other one lands here.
pub fn filter_by_range(
    rows: &[ParticipantRow],
    field: Metric,
    min_value: f64,
    max_value: f64,
) -> DataResult<Vec<ParticipantRow>> {
    if min_value.is_nan() || max_value.is_nan() {
        return Err(DataError::InvalidArgument(format!(
            "Range bounds for {} must be numbers, got [{}, {}]",
            field, min_value, max_value
        )));
    }

    if min_value > max_value {
        return Ok(Vec::new());
    }

    Ok(rows
        .iter()
        .filter(|row| {
            let value = row.get(field);
            min_value <= value && value <= max_value
        })
        .cloned()
        .collect())
}
