//! Fixed-step binning over half-open intervals
//!
//! Continuous variables are discretized into contiguous bins of equal width.
//! Each bin is the half-open interval `(low, low + step]`: a value belongs to
//! a bin when it is strictly greater than `low` and less than or equal to the
//! upper edge.
//!
//! A [`BinSet`] starts at `floor(min)` of the data and keeps adding bins until
//! the upper edge of the last one is strictly greater than the data maximum.
//! A value equal to the starting edge therefore belongs to no bin at all: when
//! the minimum of the data is a whole number, the rows holding that minimum
//! are left out of every bin.
//!
//! # Examples
//!
//! ```
//! use resourcecode_stats::binning::BinSet;
//!
//! let bins = BinSet::covering(&[1.0, 1.7, 2.0], 0.5).unwrap();
//! let labels: Vec<_> = bins.bins().iter().map(ToString::to_string).collect();
//! assert_eq!(labels, ["(1.0, 1.5]", "(1.5, 2.0]", "(2.0, 2.5]"]);
//!
//! assert_eq!(bins.locate(1.0), None); // equal to the lowest edge
//! assert_eq!(bins.locate(1.7), Some(1));
//! assert_eq!(bins.locate(2.0), Some(1)); // upper edge is inclusive
//! ```

use std::fmt;

/// Error raised while building a [`BinSet`].
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum BinningError {
    #[display("bin step must be finite and positive, got {step}")]
    InvalidStep { step: f64 },
    #[display("cannot bin non-finite value {value}")]
    NonFiniteValue { value: f64 },
    #[display("bin step {step} is too small for the data range: more than {limit} bins needed")]
    TooManyBins { step: f64, limit: usize },
}

/// A half-open interval `(low, high]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Exclusive lower edge.
    pub low: f64,
    /// Inclusive upper edge.
    pub high: f64,
}

impl Interval {
    /// Returns `true` if `low < value <= high`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value > self.low && value <= self.high
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}]", EdgeDisplay(self.low), EdgeDisplay(self.high))
    }
}

/// Shortest round-trip text for an edge, always with a fractional part.
struct EdgeDisplay(f64);

impl fmt::Display for EdgeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.fract() == 0.0 && value.abs() < 1e16 {
            write!(f, "{value:.1}")
        } else {
            write!(f, "{value}")
        }
    }
}

/// An ordered sequence of contiguous, equal-width bins.
#[derive(Debug, Clone, PartialEq)]
pub struct BinSet {
    start: f64,
    step: f64,
    bins: Vec<Interval>,
}

impl BinSet {
    /// Upper bound on the number of bins of a single set.
    pub const MAX_BINS: usize = 100_000;

    /// Builds the bins covering `values` with the given `step`.
    ///
    /// The first bin starts at `floor(min(values))`; bins are appended until
    /// the last upper edge is strictly greater than `max(values)`. Empty input
    /// yields an empty bin set.
    ///
    /// # Errors
    ///
    /// Returns [`BinningError::InvalidStep`] if `step` is not finite and
    /// positive, [`BinningError::NonFiniteValue`] if any value is NaN or
    /// infinite, and [`BinningError::TooManyBins`] if covering the data would
    /// take more than [`BinSet::MAX_BINS`] bins.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn covering(values: &[f64], step: f64) -> Result<Self, BinningError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(BinningError::InvalidStep { step });
        }
        if let Some(&value) = values.iter().find(|v| !v.is_finite()) {
            return Err(BinningError::NonFiniteValue { value });
        }

        let Some((min, max)) = min_max(values) else {
            return Ok(Self {
                start: 0.0,
                step,
                bins: vec![],
            });
        };

        let start = min.floor();
        let edge = |i: usize| start + i as f64 * step;

        let span = ((max - start) / step).floor();
        if !span.is_finite() || span >= Self::MAX_BINS as f64 {
            return Err(BinningError::TooManyBins {
                step,
                limit: Self::MAX_BINS,
            });
        }
        let mut num_bins = span as usize + 1;
        while edge(num_bins) <= max {
            num_bins += 1;
        }
        while num_bins > 1 && edge(num_bins - 1) > max {
            num_bins -= 1;
        }

        let bins = (0..num_bins)
            .map(|i| Interval {
                low: edge(i),
                high: edge(i + 1),
            })
            .collect();

        Ok(Self { start, step, bins })
    }

    /// Returns the index of the bin containing `value`, if any.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn locate(&self, value: f64) -> Option<usize> {
        if self.bins.is_empty() || value.is_nan() || value <= self.start {
            return None;
        }
        let guess = ((value - self.start) / self.step).ceil() as i64 - 1;
        [guess, guess - 1, guess + 1]
            .into_iter()
            .filter_map(|idx| usize::try_from(idx).ok())
            .find(|&idx| self.bins.get(idx).is_some_and(|bin| bin.contains(value)))
    }

    /// The bins, ascending by lower edge.
    #[must_use]
    pub fn bins(&self) -> &[Interval] {
        &self.bins
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(min, max), &v| (min.min(v), max.max(v))),
    )
}
