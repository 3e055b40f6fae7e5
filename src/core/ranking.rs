use crate::core::{merge_sort::sorted_order, CoreError};
use crate::models::{RankedRecord, SortDirection};

/// Sort `records` by `key` and assign leaderboard positions
///
/// Ties share a position and the next distinct key takes its 1-based index,
/// so three records scoring `9.0, 9.0, 7.5` get positions `1, 1, 3`.
///
/// # Errors
/// `CoreError::InvalidRecord` if any key is NaN. Nothing is returned in that case.
pub fn rank_by<T, F>(records: Vec<T>, key: F, direction: SortDirection) -> Result<Vec<RankedRecord<T>>, CoreError>
where
    F: Fn(&T) -> f64,
{
    try_rank_by(records, |record| Some(key(record)), direction)
}

/// Like [`rank_by`] for key extractors that may find no value on a record
pub fn try_rank_by<T, F>(records: Vec<T>, key: F, direction: SortDirection) -> Result<Vec<RankedRecord<T>>, CoreError>
where
    F: Fn(&T) -> Option<f64>,
{
    let keys = extract_keys(&records, key)?;
    let order = sorted_order(&keys, direction);

    let sorted_keys: Vec<f64> = order.iter().map(|&i| keys[i]).collect();
    let positions = assign_positions(&sorted_keys);

    let mut slots: Vec<Option<T>> = records.into_iter().map(Some).collect();
    let ranked: Vec<RankedRecord<T>> = order
        .iter()
        .zip(positions)
        .filter_map(|(&i, position)| slots[i].take().map(|record| RankedRecord { position, record }))
        .collect();

    tracing::trace!("Ranked {} records ({})", ranked.len(), direction.as_str());

    Ok(ranked)
}

/// Positions for keys that are already in sorted order
///
/// Single pass: whenever the key changes, the position jumps to the current
/// 1-based index; otherwise it repeats the previous one.
pub fn assign_positions(sorted_keys: &[f64]) -> Vec<usize> {
    let mut positions = Vec::with_capacity(sorted_keys.len());
    let mut last_key: Option<f64> = None;
    let mut current = 0;

    for (i, &key) in sorted_keys.iter().enumerate() {
        if last_key != Some(key) {
            current = i + 1;
            last_key = Some(key);
        }
        positions.push(current);
    }

    positions
}

fn extract_keys<T, F>(records: &[T], key: F) -> Result<Vec<f64>, CoreError>
where
    F: Fn(&T) -> Option<f64>,
{
    records
        .iter()
        .enumerate()
        .map(|(index, record)| match key(record) {
            Some(value) if value.is_nan() => Err(CoreError::InvalidRecord {
                index,
                reason: "sort key is not a number".to_string(),
            }),
            Some(value) => Ok(value),
            None => Err(CoreError::InvalidRecord {
                index,
                reason: "sort key is missing".to_string(),
            }),
        })
        .collect()
}
