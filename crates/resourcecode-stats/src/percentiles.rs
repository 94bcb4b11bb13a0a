//! Linear-interpolation percentiles of sorted data

/// Computes a single percentile value from sorted data.
///
/// Uses linear interpolation between the two closest ranks: the `k`-th
/// percentile of `n` values sits at fractional position `k / 100 * (n - 1)`.
/// This is the definition behind the quartile columns of the monthly and
/// yearly statistics tables.
///
/// Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use resourcecode_stats::percentiles::compute_percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(compute_percentile(&values, 50.0), 2.5);
/// assert_eq!(compute_percentile(&values, 25.0), 1.75);
/// assert_eq!(compute_percentile(&values, 100.0), 4.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let last = sorted_values.len() - 1;
    let position = (percentile / 100.0).clamp(0.0, 1.0) * last as f64;
    let lower = (position.floor() as usize).min(last);
    let upper = (lower + 1).min(last);
    let fraction = position - lower as f64;

    let a = sorted_values[lower];
    let b = sorted_values[upper];
    let diff = b - a;
    // Interpolate from the nearer endpoint.
    if fraction >= 0.5 {
        b - diff * (1.0 - fraction)
    } else {
        a + diff * fraction
    }
}
