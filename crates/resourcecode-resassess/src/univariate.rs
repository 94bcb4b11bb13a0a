//! Monthly and yearly descriptive statistics of one variable
//!
//! Rows are grouped by calendar month (January to December, whatever the
//! year) and, independently, by year. Each group gets count, mean, sample
//! standard deviation, min, quartiles and max of the variable.
//!
//! [`monthly_exceedance`] complements the tables with the in-month percentile
//! rank of every row, the data behind monthly exceedance plots.

use std::{collections::BTreeMap, io};

use chrono::NaiveDateTime;
use resourcecode_stats::{descriptive::DescriptiveStats, rank::min_rank_pct};

use crate::{
    display::{self, Cell, FloatFormat, Tabular},
    error::{self, ResassessError},
    table::{self, TimeIndexedTable},
};

/// Key of a statistics group.
pub trait GroupKey: Copy + Ord {
    /// Header of the row-label column.
    const INDEX_LABEL: &'static str;
    /// Headers of the extra key columns following the row label.
    const KEY_HEADERS: &'static [&'static str];

    fn label(self) -> String;
    fn key_cells(self) -> Vec<Cell>;
}

/// Calendar month number (1-12), rendered with its English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey(pub u32);

impl GroupKey for MonthKey {
    const INDEX_LABEL: &'static str = "month_index";
    const KEY_HEADERS: &'static [&'static str] = &["month"];

    fn label(self) -> String {
        self.0.to_string()
    }

    fn key_cells(self) -> Vec<Cell> {
        vec![Cell::Text(table::month_name(self.0).to_owned())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearKey(pub i32);

impl GroupKey for YearKey {
    const INDEX_LABEL: &'static str = "year";
    const KEY_HEADERS: &'static [&'static str] = &[];

    fn label(self) -> String {
        self.0.to_string()
    }

    fn key_cells(self) -> Vec<Cell> {
        vec![]
    }
}

/// Descriptive statistics per group, ordered by key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedStats<K> {
    pub rows: Vec<(K, DescriptiveStats)>,
}

impl<K> GroupedStats<K>
where
    K: GroupKey,
{
    fn collect<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut groups = BTreeMap::<K, Vec<f64>>::new();
        for (key, value) in pairs {
            groups.entry(key).or_default().push(value);
        }
        let rows = groups
            .into_iter()
            .filter_map(|(key, values)| Some((key, DescriptiveStats::new(values)?)))
            .collect();
        Self { rows }
    }

    /// Statistics of group `key`, if present.
    #[must_use]
    pub fn get(&self, key: K) -> Option<&DescriptiveStats> {
        self.rows
            .iter()
            .find_map(|(k, stats)| (*k == key).then_some(stats))
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.rows.iter().map(|(key, _)| *key)
    }
}

const STAT_HEADERS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

impl<K> Tabular for GroupedStats<K>
where
    K: GroupKey,
{
    fn index_label(&self) -> &str {
        K::INDEX_LABEL
    }

    fn column_headers(&self) -> Vec<String> {
        K::KEY_HEADERS
            .iter()
            .chain(&STAT_HEADERS)
            .map(|header| (*header).to_owned())
            .collect()
    }

    #[expect(clippy::cast_precision_loss)]
    fn rows(&self) -> Vec<(String, Vec<Cell>)> {
        self.rows
            .iter()
            .map(|(key, stats)| {
                let mut cells = key.key_cells();
                cells.extend([
                    Cell::Float(stats.count as f64),
                    Cell::Float(stats.mean),
                    stats.std_dev.map_or(Cell::Missing, Cell::Float),
                    Cell::Float(stats.min),
                    Cell::Float(stats.p25),
                    Cell::Float(stats.median),
                    Cell::Float(stats.p75),
                    Cell::Float(stats.max),
                ]);
                (key.label(), cells)
            })
            .collect()
    }
}

/// Monthly and yearly statistics of one variable.
#[derive(Debug, Clone, PartialEq)]
pub struct UnivariateStats {
    pub monthly: GroupedStats<MonthKey>,
    pub yearly: GroupedStats<YearKey>,
}

/// Computes the monthly and yearly descriptive statistics of `variable`.
///
/// Only months and years present in the table appear, months ordered by
/// calendar index. A group of one value has no sample standard deviation.
///
/// # Errors
///
/// [`ResassessError::MissingVariable`] listing the available columns if
/// `variable` is absent, [`ResassessError::NonFiniteValue`] if the column
/// holds NaN or infinity.
///
/// # Examples
///
/// ```
/// use resourcecode_resassess::{table::TimeIndexedTable, univariate::univariate_monthly_yearly};
///
/// let table = TimeIndexedTable::new(vec![]).with_column("toto", vec![]).unwrap();
/// let err = univariate_monthly_yearly(&table, "hs").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "Parameter hs is not in the dataframe. Possible values are: toto"
/// );
/// ```
pub fn univariate_monthly_yearly(
    table: &TimeIndexedTable,
    variable: &str,
) -> Result<UnivariateStats, ResassessError> {
    let values = error::require_variable(table, variable)?;
    error::ensure_finite(variable, values)?;

    let monthly = GroupedStats::collect(
        values
            .iter()
            .enumerate()
            .map(|(row, &v)| (MonthKey(table.month_of(row)), v)),
    );
    let yearly = GroupedStats::collect(
        values
            .iter()
            .enumerate()
            .map(|(row, &v)| (YearKey(table.year_of(row)), v)),
    );
    tracing::debug!(
        variable,
        months = monthly.rows.len(),
        years = yearly.rows.len(),
        "computed univariate statistics"
    );

    Ok(UnivariateStats { monthly, yearly })
}

/// Writes a monthly or yearly statistics table as CSV, one decimal per cell.
///
/// Headers are `month_index,month,count,mean,std,min,25%,50%,75%,max` for
/// monthly tables and `year,count,...` for yearly ones. An undefined
/// standard deviation is left empty.
pub fn write_descriptive_csv<W, K>(writer: &mut W, stats: &GroupedStats<K>) -> io::Result<()>
where
    W: io::Write + ?Sized,
    K: GroupKey,
{
    display::write_csv(writer, stats, FloatFormat::CSV)
}

/// One row of the monthly exceedance curves.
#[derive(Debug, Clone, PartialEq)]
pub struct ExceedancePoint {
    pub timestamp: NaiveDateTime,
    pub month: u32,
    pub value: f64,
    /// Minimum-on-ties rank of `value` within its month, over the month's size.
    pub exceedance: f64,
}

/// Per-row in-month percentile ranks of one variable.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyExceedance {
    pub variable: String,
    /// Points ordered by ascending value; equal values keep row order.
    pub points: Vec<ExceedancePoint>,
}

impl Tabular for MonthlyExceedance {
    fn index_label(&self) -> &str {
        "time"
    }

    fn column_headers(&self) -> Vec<String> {
        vec![self.variable.clone(), "month".into(), "Exceedance".into()]
    }

    fn rows(&self) -> Vec<(String, Vec<Cell>)> {
        self.points
            .iter()
            .map(|point| {
                let cells = vec![
                    Cell::Float(point.value),
                    Cell::Text(table::month_name(point.month).to_owned()),
                    Cell::Float(point.exceedance),
                ];
                (point.timestamp.to_string(), cells)
            })
            .collect()
    }
}

/// Computes, for every row, the percentile rank of `variable` within its
/// calendar month, ties sharing the minimum rank.
///
/// # Errors
///
/// Same as [`univariate_monthly_yearly`].
pub fn monthly_exceedance(
    table: &TimeIndexedTable,
    variable: &str,
) -> Result<MonthlyExceedance, ResassessError> {
    let values = error::require_variable(table, variable)?;
    error::ensure_finite(variable, values)?;

    let mut rows_by_month = BTreeMap::<u32, Vec<usize>>::new();
    for row in 0..table.len() {
        rows_by_month.entry(table.month_of(row)).or_default().push(row);
    }

    let mut points = Vec::with_capacity(table.len());
    for (month, rows) in rows_by_month {
        let month_values = rows.iter().map(|&row| values[row]).collect::<Vec<_>>();
        let ranks = min_rank_pct(&month_values);
        points.extend(rows.iter().zip(ranks).map(|(&row, exceedance)| ExceedancePoint {
            timestamp: table.index()[row],
            month,
            value: values[row],
            exceedance,
        }));
    }
    points.sort_by(|a, b| a.value.total_cmp(&b.value));

    Ok(MonthlyExceedance {
        variable: variable.to_owned(),
        points,
    })
}
