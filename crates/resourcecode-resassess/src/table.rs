//! Time-indexed table of named numeric series
//!
//! [`TimeIndexedTable`] is the input contract of every statistics engine in
//! this crate. Rows are keyed by a naive UTC timestamp and every column holds
//! one `f64` per row. The calendar month and year of each row are derived
//! from its timestamp.
//!
//! Timestamps need not be unique or sorted; the engines only read them to
//! group rows by month and year.
//!
//! # Loading
//!
//! - [`TimeIndexedTable::from_csv_reader`]: a CSV file whose first column is
//!   the timestamp
//! - [`TimeIndexedTable::from_parameter_series`]: the `[timestamp_ms, value]`
//!   arrays returned by the time-series service, one per parameter

mod load;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Month, NaiveDateTime};

pub use self::load::{LoadError, ParameterSeries, parse_timeseries_response};

/// English name of calendar month `month` (1-12), e.g. `"January"`.
///
/// Returns an empty string outside `1..=12`.
#[must_use]
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|month| Month::try_from(month).ok())
        .map_or("", |month| month.name())
}

/// Three-letter abbreviation of calendar month `month` (1-12), e.g. `"Jan"`.
#[must_use]
pub fn month_abbreviation(month: u32) -> &'static str {
    let name = month_name(month);
    name.get(..3).unwrap_or(name)
}

/// Errors raised while assembling a table.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("column '{column}' has {actual} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[display("column '{column}' is defined twice")]
    DuplicateColumn { column: String },
}

/// Rows keyed by timestamp, columns of named `f64` series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeIndexedTable {
    index: Vec<NaiveDateTime>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl TimeIndexedTable {
    /// Creates a table with the given row index and no columns.
    #[must_use]
    pub fn new(index: Vec<NaiveDateTime>) -> Self {
        Self {
            index,
            columns: BTreeMap::new(),
        }
    }

    /// Adds a column, consuming and returning the table.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, TableError> {
        self.insert_column(name, values)?;
        Ok(self)
    }

    /// Adds a column of the same length as the index.
    pub fn insert_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), TableError> {
        let name = name.into();
        if values.len() != self.index.len() {
            return Err(TableError::LengthMismatch {
                column: name,
                expected: self.index.len(),
                actual: values.len(),
            });
        }
        if self.columns.contains_key(&name) {
            return Err(TableError::DuplicateColumn { column: name });
        }
        self.columns.insert(name, values);
        Ok(())
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[must_use]
    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names in ascending order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.keys().map(String::as_str)
    }

    /// Calendar month (1-12) of row `row`.
    #[must_use]
    pub fn month_of(&self, row: usize) -> u32 {
        self.index[row].month()
    }

    /// Calendar year of row `row`.
    #[must_use]
    pub fn year_of(&self, row: usize) -> i32 {
        self.index[row].year()
    }

    /// Distinct calendar months present, January first.
    #[must_use]
    pub fn months_present(&self) -> Vec<u32> {
        let months = self.index.iter().map(Datelike::month).collect::<BTreeSet<_>>();
        months.into_iter().collect()
    }

    /// Distinct years present, ascending.
    #[must_use]
    pub fn years_present(&self) -> Vec<i32> {
        let years = self.index.iter().map(Datelike::year).collect::<BTreeSet<_>>();
        years.into_iter().collect()
    }

    /// Returns a new table holding only the rows for which `keep` is true.
    #[must_use]
    pub fn filter_rows<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(usize) -> bool,
    {
        let rows = (0..self.len()).filter(|&row| keep(row)).collect::<Vec<_>>();
        let index = rows.iter().map(|&row| self.index[row]).collect();
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| {
                let values = rows.iter().map(|&row| values[row]).collect();
                (name.clone(), values)
            })
            .collect();
        Self { index, columns }
    }

    /// Rows falling in calendar month `month` (1-12), any year.
    #[must_use]
    pub fn select_month(&self, month: u32) -> Self {
        self.filter_rows(|row| self.month_of(row) == month)
    }
}
