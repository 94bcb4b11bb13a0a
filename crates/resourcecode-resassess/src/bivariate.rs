//! Bivariate binned statistics
//!
//! Two continuous variables (by default significant wave height `hs` and
//! energy period `t0m1`) are discretized into half-open bins, and a third
//! variable (by default the energy flux `cge`) is summarized for every pair
//! of bins:
//!
//! - **count**: number of rows falling in the bin pair
//! - **percentage**: `100 * count / total rows of the input table`
//! - **mean**: mean of the third variable, `0` for empty pairs
//! - **stdev**: population standard deviation (divisor `count`), `0` for
//!   empty pairs
//!
//! All four tables share the same row (X bins) and column (Y bins) labels,
//! both ascending. Bin construction follows [`BinSet::covering`]: a row whose
//! X or Y value equals the whole-number floor of that variable's minimum
//! falls in no bin and is absent from every table, although it still counts
//! in the percentage denominator.

use resourcecode_stats::binning::{BinSet, BinningError, Interval};
use serde::{Deserialize, Serialize};

use crate::{
    display::{Cell, Tabular},
    error::{self, ResassessError},
    table::TimeIndexedTable,
};

/// Upper bound on the number of cells of one cross table.
pub const MAX_CELLS: usize = 10_000_000;

/// Column names and bin widths of a bivariate analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BivariateParams {
    /// Variable binned along the rows.
    pub var_x: String,
    /// Variable binned along the columns.
    pub var_y: String,
    /// Variable summarized in each bin pair.
    pub var_z: String,
    /// Bin width along X.
    pub step_x: f64,
    /// Bin width along Y.
    pub step_y: f64,
    /// Header of the row-label column in rendered tables.
    pub index_label: String,
}

impl Default for BivariateParams {
    fn default() -> Self {
        Self {
            var_x: "hs".to_owned(),
            var_y: "t0m1".to_owned(),
            var_z: "cge".to_owned(),
            step_x: 0.5,
            step_y: 1.0,
            index_label: "Hs/Te".to_owned(),
        }
    }
}

/// A table cross-tabulated over X bins (rows) and Y bins (columns).
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab<T> {
    index_label: String,
    row_labels: Vec<Interval>,
    column_labels: Vec<Interval>,
    /// Row-major cells.
    cells: Vec<T>,
}

impl<T> CrossTab<T>
where
    T: Copy,
{
    fn from_cells(
        index_label: &str,
        row_labels: &[Interval],
        column_labels: &[Interval],
        cells: Vec<T>,
    ) -> Self {
        debug_assert_eq!(cells.len(), row_labels.len() * column_labels.len());
        Self {
            index_label: index_label.to_owned(),
            row_labels: row_labels.to_vec(),
            column_labels: column_labels.to_vec(),
            cells,
        }
    }

    #[must_use]
    pub fn row_labels(&self) -> &[Interval] {
        &self.row_labels
    }

    #[must_use]
    pub fn column_labels(&self) -> &[Interval] {
        &self.column_labels
    }

    /// (rows, columns).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.row_labels.len(), self.column_labels.len())
    }

    /// Cell at (`row`, `column`).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> T {
        assert!(column < self.column_labels.len(), "column out of range");
        self.cells[row * self.column_labels.len() + column]
    }

    /// Cells of row `row`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[T] {
        let width = self.column_labels.len();
        &self.cells[row * width..(row + 1) * width]
    }

    /// Iterates over every cell, row by row.
    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.cells.iter().copied()
    }
}

impl CrossTab<usize> {
    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.cells.iter().sum()
    }
}

/// Conversion of a cross-tab cell into a rendered [`Cell`].
pub trait CrossTabValue: Copy {
    fn to_cell(self) -> Cell;
}

impl CrossTabValue for f64 {
    fn to_cell(self) -> Cell {
        Cell::Float(self)
    }
}

impl CrossTabValue for usize {
    #[expect(clippy::cast_precision_loss)]
    fn to_cell(self) -> Cell {
        // Counts are rendered like every other statistic cell.
        Cell::Float(self as f64)
    }
}

impl<T> Tabular for CrossTab<T>
where
    T: CrossTabValue,
{
    fn index_label(&self) -> &str {
        &self.index_label
    }

    fn column_headers(&self) -> Vec<String> {
        self.column_labels.iter().map(ToString::to_string).collect()
    }

    fn rows(&self) -> Vec<(String, Vec<Cell>)> {
        self.row_labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let cells = self.row(i).iter().map(|v| v.to_cell()).collect();
                (label.to_string(), cells)
            })
            .collect()
    }
}

/// The four bivariate tables.
#[derive(Debug, Clone, PartialEq)]
pub struct BivariateStats {
    pub percentage: CrossTab<f64>,
    pub count: CrossTab<usize>,
    pub mean: CrossTab<f64>,
    pub stdev: CrossTab<f64>,
}

/// Computes the bivariate tables of `params.var_z` over `var_x` × `var_y` bins.
///
/// # Errors
///
/// - [`ResassessError::MissingColumns`] naming every absent column among
///   `var_x`, `var_y` and `var_z`, sorted
/// - [`ResassessError::InvalidBinning`] if a step is not finite and positive,
///   or so small that the tables would exceed [`MAX_CELLS`] cells
/// - [`ResassessError::NonFiniteValue`] if any of the three columns holds NaN
///   or infinity
///
/// # Examples
///
/// ```
/// use resourcecode_resassess::{
///     bivariate::{BivariateParams, bivariate_statistics},
///     table::TimeIndexedTable,
/// };
///
/// let err = bivariate_statistics(&TimeIndexedTable::default(), &BivariateParams::default())
///     .unwrap_err();
/// assert_eq!(err.to_string(), "Crucial parameter missing: cge, hs, t0m1");
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn bivariate_statistics(
    table: &TimeIndexedTable,
    params: &BivariateParams,
) -> Result<BivariateStats, ResassessError> {
    error::require_columns(table, &[&params.var_x, &params.var_y, &params.var_z])?;

    let xs = finite_column(table, &params.var_x)?;
    let ys = finite_column(table, &params.var_y)?;
    let zs = finite_column(table, &params.var_z)?;

    let bins = |name: &str, values: &[f64], step: f64| {
        BinSet::covering(values, step).map_err(|error| ResassessError::InvalidBinning {
            column: name.to_owned(),
            error,
        })
    };
    let x_bins = bins(&params.var_x, xs, params.step_x)?;
    let y_bins = bins(&params.var_y, ys, params.step_y)?;

    let width = y_bins.len();
    let num_cells = x_bins
        .len()
        .checked_mul(width)
        .filter(|&cells| cells <= MAX_CELLS)
        .ok_or_else(|| ResassessError::InvalidBinning {
            column: format!("{}/{}", params.var_x, params.var_y),
            error: BinningError::TooManyBins {
                step: params.step_y,
                limit: MAX_CELLS,
            },
        })?;
    let cell_of_row = xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| Some(x_bins.locate(x)? * width + y_bins.locate(y)?))
        .collect::<Vec<_>>();

    let mut counts = vec![0_usize; num_cells];
    let mut sums = vec![0.0_f64; num_cells];
    for (cell, &z) in cell_of_row.iter().zip(zs) {
        if let Some(cell) = *cell {
            counts[cell] += 1;
            sums[cell] += z;
        }
    }
    let means = counts
        .iter()
        .zip(&sums)
        .map(|(&count, &sum)| if count == 0 { 0.0 } else { sum / count as f64 })
        .collect::<Vec<_>>();

    let mut squared_deviations = vec![0.0_f64; num_cells];
    for (cell, &z) in cell_of_row.iter().zip(zs) {
        if let Some(cell) = *cell {
            squared_deviations[cell] += (z - means[cell]).powi(2);
        }
    }
    let stdevs = counts
        .iter()
        .zip(&squared_deviations)
        .map(|(&count, &ss)| if count == 0 { 0.0 } else { (ss / count as f64).sqrt() })
        .collect::<Vec<_>>();

    let total_rows = table.len() as f64;
    let percentages = counts
        .iter()
        .map(|&count| 100.0 * count as f64 / total_rows)
        .collect::<Vec<_>>();

    tracing::debug!(
        rows = table.len(),
        binned = counts.iter().sum::<usize>(),
        x_bins = x_bins.len(),
        y_bins = y_bins.len(),
        "computed bivariate statistics"
    );

    let tab = |cells: Vec<f64>| {
        CrossTab::from_cells(&params.index_label, x_bins.bins(), y_bins.bins(), cells)
    };
    Ok(BivariateStats {
        percentage: tab(percentages),
        count: CrossTab::from_cells(&params.index_label, x_bins.bins(), y_bins.bins(), counts),
        mean: tab(means),
        stdev: tab(stdevs),
    })
}

fn finite_column<'a>(
    table: &'a TimeIndexedTable,
    name: &str,
) -> Result<&'a [f64], ResassessError> {
    let values = error::require_variable(table, name)?;
    error::ensure_finite(name, values)?;
    Ok(values)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    fn hourly(n: usize) -> Vec<NaiveDateTime> {
        let t0 = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..n)
            .map(|h| t0 + chrono::Duration::hours(i64::try_from(h).unwrap()))
            .collect()
    }

    fn table(hs: &[f64], t0m1: &[f64], cge: &[f64]) -> TimeIndexedTable {
        TimeIndexedTable::new(hourly(hs.len()))
            .with_column("hs", hs.to_vec())
            .unwrap()
            .with_column("t0m1", t0m1.to_vec())
            .unwrap()
            .with_column("cge", cge.to_vec())
            .unwrap()
    }

    #[test]
    fn test_all_columns_missing() {
        let err = bivariate_statistics(&TimeIndexedTable::default(), &BivariateParams::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Crucial parameter missing: cge, hs, t0m1");
    }

    #[test]
    fn test_only_missing_columns_are_named() {
        let table = TimeIndexedTable::new(vec![])
            .with_column("hs", vec![])
            .unwrap()
            .with_column("cge", vec![])
            .unwrap()
            .with_column("loutre", vec![])
            .unwrap();
        let err = bivariate_statistics(&table, &BivariateParams::default()).unwrap_err();
        assert_eq!(err.to_string(), "Crucial parameter missing: t0m1");
    }

    #[test]
    fn test_empty_table_yields_empty_tables() {
        let stats = bivariate_statistics(&table(&[], &[], &[]), &BivariateParams::default()).unwrap();
        assert_eq!(stats.count.shape(), (0, 0));
        assert_eq!(stats.mean.shape(), (0, 0));
        assert_eq!(stats.percentage.values().count(), 0);
    }

    #[test]
    fn test_known_cells() {
        let stats = bivariate_statistics(
            &table(
                &[0.7, 0.8, 1.2, 2.6],
                &[5.5, 5.9, 6.2, 8.1],
                &[2.0, 4.0, 5.0, 27.0],
            ),
            &BivariateParams::default(),
        )
        .unwrap();

        let rows = stats
            .count
            .row_labels()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(
            rows,
            [
                "(0.0, 0.5]",
                "(0.5, 1.0]",
                "(1.0, 1.5]",
                "(1.5, 2.0]",
                "(2.0, 2.5]",
                "(2.5, 3.0]"
            ]
        );
        let columns = stats
            .count
            .column_labels()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(columns, ["(5.0, 6.0]", "(6.0, 7.0]", "(7.0, 8.0]", "(8.0, 9.0]"]);

        // hs (0.5, 1.0] x t0m1 (5.0, 6.0] holds cge 2.0 and 4.0
        assert_eq!(stats.count.get(1, 0), 2);
        assert_eq!(stats.mean.get(1, 0), 3.0);
        assert_eq!(stats.stdev.get(1, 0), 1.0);
        assert_eq!(stats.percentage.get(1, 0), 50.0);

        assert_eq!(stats.count.get(2, 1), 1);
        assert_eq!(stats.stdev.get(2, 1), 0.0);
        assert_eq!(stats.count.get(5, 3), 1);
        assert_eq!(stats.mean.get(5, 3), 27.0);

        // empty pairs default to zero
        assert_eq!(stats.count.get(0, 0), 0);
        assert_eq!(stats.mean.get(0, 0), 0.0);
        assert_eq!(stats.stdev.get(4, 2), 0.0);
        assert!(stats.mean.values().all(f64::is_finite));
        assert!(stats.stdev.values().all(f64::is_finite));
    }

    #[test]
    fn test_whole_number_minimum_excluded_from_all_tables() {
        let stats = bivariate_statistics(
            &table(&[1.0, 1.2, 1.4], &[6.5, 6.5, 6.5], &[3.0, 4.0, 5.0]),
            &BivariateParams::default(),
        )
        .unwrap();
        assert_eq!(stats.count.total(), 2);
        assert_eq!(stats.mean.get(0, 0), 4.5);
        let percentage_sum = stats.percentage.values().sum::<f64>();
        assert!((percentage_sum - 200.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentages_sum_to_100_when_every_row_is_binned() {
        let hs = (0..50).map(|i| 0.05 + f64::from(i) * 0.13).collect::<Vec<_>>();
        let te = (0..50).map(|i| 4.3 + f64::from(i % 7) * 0.9).collect::<Vec<_>>();
        let cge = (0..50).map(f64::from).collect::<Vec<_>>();
        let stats = bivariate_statistics(&table(&hs, &te, &cge), &BivariateParams::default()).unwrap();

        assert_eq!(stats.count.total(), 50);
        let sum = stats.percentage.values().sum::<f64>();
        assert!((sum - 100.0).abs() < 1e-9);
        for (count, percentage) in stats.count.values().zip(stats.percentage.values()) {
            assert_eq!(percentage, 100.0 * f64::from(u32::try_from(count).unwrap()) / 50.0);
        }
    }

    #[test]
    fn test_population_stdev() {
        let stats = bivariate_statistics(
            &table(&[0.6; 4], &[5.5; 4], &[2.0, 4.0, 4.0, 6.0]),
            &BivariateParams::default(),
        )
        .unwrap();
        assert_eq!(stats.count.shape(), (2, 1));
        assert_eq!(stats.count.get(1, 0), 4);
        // population: sqrt(8 / 4), not sqrt(8 / 3)
        assert_eq!(stats.stdev.get(1, 0), 2.0_f64.sqrt());
    }

    #[test]
    fn test_single_whole_number_value_gives_one_empty_bin() {
        let stats = bivariate_statistics(
            &table(&[2.0; 3], &[6.5; 3], &[1.0, 2.0, 3.0]),
            &BivariateParams::default(),
        )
        .unwrap();
        assert_eq!(stats.count.shape(), (1, 1));
        assert_eq!(stats.count.row_labels()[0].to_string(), "(2.0, 2.5]");
        assert_eq!(stats.count.total(), 0);
        assert!(stats.mean.values().all(|v| v == 0.0));
        assert!(stats.stdev.values().all(|v| v == 0.0));
        assert!(stats.percentage.values().all(|v| v == 0.0));
    }

    #[test]
    fn test_custom_steps_and_columns() {
        let table = TimeIndexedTable::new(hourly(3))
            .with_column("tp", vec![3.5, 9.5, 12.5])
            .unwrap()
            .with_column("dir", vec![10.5, 100.0, 350.0])
            .unwrap()
            .with_column("cge", vec![1.0, 2.0, 3.0])
            .unwrap();
        let params = BivariateParams {
            var_x: "tp".into(),
            var_y: "dir".into(),
            step_x: 5.0,
            step_y: 90.0,
            index_label: "Tp/Dir".into(),
            ..BivariateParams::default()
        };
        let stats = bivariate_statistics(&table, &params).unwrap();
        assert_eq!(stats.count.shape(), (2, 4));
        assert_eq!(stats.count.total(), 3);
        assert_eq!(stats.count.index_label(), "Tp/Dir");
    }

    #[test]
    fn test_invalid_step() {
        let params = BivariateParams {
            step_y: 0.0,
            ..BivariateParams::default()
        };
        let err = bivariate_statistics(&table(&[1.0], &[1.0], &[1.0]), &params).unwrap_err();
        assert!(matches!(err, ResassessError::InvalidBinning { ref column, .. } if column == "t0m1"));
    }

    #[test]
    fn test_oversized_tables_are_rejected() {
        let params = BivariateParams {
            step_x: 0.1,
            step_y: 0.1,
            ..BivariateParams::default()
        };
        let err = bivariate_statistics(&table(&[0.5, 5000.0], &[0.5, 5000.0], &[1.0, 1.0]), &params)
            .unwrap_err();
        assert!(matches!(
            err,
            ResassessError::InvalidBinning {
                error: BinningError::TooManyBins { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let err = bivariate_statistics(
            &table(&[1.1, 1.2], &[6.5, 6.5], &[1.0, f64::NAN]),
            &BivariateParams::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ResassessError::NonFiniteValue { row: 1, .. }));
    }

    #[test]
    fn test_idempotent() {
        let t = table(&[0.7, 1.9, 2.2], &[6.1, 7.3, 9.9], &[3.0, 9.0, 14.0]);
        let params = BivariateParams::default();
        assert_eq!(
            bivariate_statistics(&t, &params).unwrap(),
            bivariate_statistics(&t, &params).unwrap()
        );
    }
}
