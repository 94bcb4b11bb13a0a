//! Minimum-on-ties percentile ranks

/// Percentile rank of each value within `values`, ties sharing the minimum rank.
///
/// The rank of a value is one plus the number of values strictly smaller
/// than it, so every member of a tie group gets the lowest rank of the group.
/// Ranks are divided by `values.len()`, giving fractions in `(0, 1]`.
///
/// The returned vector is aligned with the input order.
///
/// # Examples
///
/// ```
/// use resourcecode_stats::rank::min_rank_pct;
///
/// let ranks = min_rank_pct(&[3.0, 1.0, 3.0, 2.0]);
/// assert_eq!(ranks, [0.75, 0.25, 0.75, 0.5]);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn min_rank_pct(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = values.len() as f64;

    values
        .iter()
        .map(|value| {
            let smaller = sorted.partition_point(|x| x.total_cmp(value).is_lt());
            (smaller + 1) as f64 / n
        })
        .collect()
}
