use crate::percentiles::compute_percentile;

/// Descriptive statistics summarizing a group of values.
///
/// Mirrors the columns of a `describe()`-style summary: count, mean,
/// sample standard deviation, min, quartiles and max. The population
/// standard deviation is carried alongside for callers that need it.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// Number of values in the group.
    pub count: usize,
    /// The arithmetic mean of the group.
    pub mean: f64,
    /// Sample standard deviation (divisor `count - 1`).
    ///
    /// `None` when the group holds a single value.
    pub std_dev: Option<f64>,
    /// Population standard deviation (divisor `count`).
    pub population_std_dev: f64,
    /// The minimum value.
    pub min: f64,
    /// 25th percentile (linear interpolation).
    pub p25: f64,
    /// 50th percentile (linear interpolation).
    pub median: f64,
    /// 75th percentile (linear interpolation).
    pub p75: f64,
    /// The maximum value.
    pub max: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// This method will sort the values internally before computing statistics.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty or holds NaN or infinity
    ///
    /// # Examples
    ///
    /// ```
    /// # use resourcecode_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.count, 5);
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.p25, 2.0);
    /// assert_eq!(stats.std_dev, Some(2.5_f64.sqrt()));
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// Returns `None` if the slice is empty or holds a non-finite value.
    ///
    /// # Panics
    ///
    /// Panics if the finite `sorted_values` are not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        if sorted_values.iter().any(|v| !v.is_finite()) {
            return None;
        }
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let squared_deviation = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>();
        let std_dev = (count > 1).then(|| (squared_deviation / (n - 1.0)).sqrt());
        let population_std_dev = (squared_deviation / n).sqrt();

        Some(Self {
            count,
            mean,
            std_dev,
            population_std_dev,
            min,
            p25: compute_percentile(sorted_values, 25.0),
            median: compute_percentile(sorted_values, 50.0),
            p75: compute_percentile(sorted_values, 75.0),
            max,
        })
    }
}
