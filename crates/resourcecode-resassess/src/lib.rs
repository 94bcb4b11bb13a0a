//! Resource assessment deliverables from metocean time series
//!
//! This crate turns a time-indexed table of sea-state parameters into the
//! standard resource-assessment deliverables of IEC 62600-101: exceedance
//! curves, monthly and yearly descriptive statistics, and bivariate tables
//! of the energy flux binned over significant wave height and energy period.
//!
//! # Overview
//!
//! 1. **Load a table** ([`table::TimeIndexedTable`]): from a CSV file or from
//!    the `[timestamp_ms, value]` arrays returned by the time-series service
//! 2. **Rank for exceedance** ([`exceedance::exceedance_curve`])
//! 3. **Univariate statistics** ([`univariate::univariate_monthly_yearly`]):
//!    count, mean, standard deviation, quartiles per calendar month and year
//! 4. **Bivariate statistics** ([`bivariate::bivariate_statistics`]):
//!    occurrence, count, mean and standard deviation of a third variable per
//!    pair of half-open bins
//! 5. **Reports** ([`report::produce_reports`]): the bivariate tables for the
//!    whole series and for every calendar month, written as CSV files
//!
//! Every operation is a pure function of its input table and parameters; only
//! the report driver touches the filesystem.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use resourcecode_resassess::{
//!     bivariate::{BivariateParams, bivariate_statistics},
//!     table::TimeIndexedTable,
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let t0 = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let index = (0..4).map(|h| t0 + chrono::Duration::hours(h)).collect();
//! let table = TimeIndexedTable::new(index)
//!     .with_column("hs", vec![0.7, 1.2, 1.3, 2.6])?
//!     .with_column("t0m1", vec![5.5, 6.2, 6.4, 8.1])?
//!     .with_column("cge", vec![1.4, 4.3, 5.2, 27.0])?;
//!
//! let stats = bivariate_statistics(&table, &BivariateParams::default())?;
//! assert_eq!(stats.count.row_labels()[0].to_string(), "(0.0, 0.5]");
//! assert_eq!(stats.count.total(), 4);
//! # Ok(())
//! # }
//! ```

pub mod bivariate;
pub mod display;
pub mod error;
pub mod exceedance;
pub mod report;
pub mod table;
pub mod univariate;
