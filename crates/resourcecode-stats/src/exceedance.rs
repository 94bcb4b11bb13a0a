//! Exceedance curves
//!
//! Values are ranked in descending order and each rank receives the
//! probability that a random draw from the series exceeds it.

/// A series sorted in descending order with its exceedance probabilities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExceedanceCurve {
    /// Input values sorted in descending order.
    pub values: Vec<f64>,
    /// `probabilities[i] = (n - 1 - i) / n`, in `[0, 1)`.
    pub probabilities: Vec<f64>,
}

impl ExceedanceCurve {
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns an iterator over (value, probability) pairs, largest value first.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values
            .iter()
            .copied()
            .zip(self.probabilities.iter().copied())
    }

    /// Splits the curve into its sorted values and probabilities.
    #[must_use]
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.values, self.probabilities)
    }
}

/// Sorts `values` in descending order and assigns exceedance probabilities.
///
/// For `n` values sorted as `v_0 >= v_1 >= ... >= v_{n-1}`, `v_i` gets the
/// probability `(n - 1 - i) / n`. Equal values keep the order of the (stable)
/// sort and receive consecutive, distinct probabilities.
///
/// # Examples
///
/// ```
/// use resourcecode_stats::exceedance::rank_exceedance;
///
/// let (values, probabilities) = rank_exceedance(&[2.0, 5.0, 1.0]).into_parts();
/// assert_eq!(values, [5.0, 2.0, 1.0]);
/// assert_eq!(probabilities[0], 2.0 / 3.0);
/// assert_eq!(probabilities[2], 0.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn rank_exceedance(values: &[f64]) -> ExceedanceCurve {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let n = sorted.len();
    let probabilities = (0..n)
        .map(|i| (n - 1 - i) as f64 / n as f64)
        .collect();

    ExceedanceCurve {
        values: sorted,
        probabilities,
    }
}
