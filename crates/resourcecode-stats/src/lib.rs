//! Statistical building blocks for metocean resource assessment.
//!
//! This crate provides the numeric primitives used by the resource
//! assessment engine:
//!
//! - **Descriptive statistics**: count, mean, sample/population standard deviation, quartiles
//! - **Percentiles**: Linear-interpolation percentiles
//! - **Binning**: Half-open `(low, high]` intervals and fixed-step bin sets
//! - **Exceedance**: Descending ranking with exceedance probabilities
//! - **Ranking**: Minimum-on-ties percentile ranks
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing a group of values
//! - [`percentiles`]: Percentile computation
//! - [`binning`]: Interval and bin-set construction for cross-tabulation
//! - [`exceedance`]: Exceedance curves
//! - [`rank`]: Percentile ranks with minimum-rank tie handling
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use resourcecode_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.median, 3.0);
//! ```
//!
//! ## Ranking for exceedance
//!
//! ```
//! use resourcecode_stats::exceedance::rank_exceedance;
//!
//! let curve = rank_exceedance(&[1.0, 2.0, 3.0, 4.0]);
//! assert_eq!(curve.values, [4.0, 3.0, 2.0, 1.0]);
//! assert_eq!(curve.probabilities, [0.75, 0.5, 0.25, 0.0]);
//! ```
//!
//! ## Building bins
//!
//! ```
//! use resourcecode_stats::binning::BinSet;
//!
//! let bins = BinSet::covering(&[0.3, 1.2, 1.4], 0.5).unwrap();
//! assert_eq!(bins.len(), 3);
//! assert_eq!(bins.locate(1.2), Some(2));
//! assert_eq!(bins.bins()[0].to_string(), "(0.0, 0.5]");
//! ```

pub mod binning;
pub mod descriptive;
pub mod exceedance;
pub mod percentiles;
pub mod rank;
