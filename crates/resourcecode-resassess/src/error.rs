use std::io;

use resourcecode_stats::binning::BinningError;

use crate::table::TimeIndexedTable;

/// Errors raised by the statistics engines.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ResassessError {
    #[display(
        "Parameter {name} is not in the dataframe. Possible values are: {}",
        available.join(", ")
    )]
    MissingVariable {
        name: String,
        available: Vec<String>,
    },
    #[display("Crucial parameter missing: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },
    #[display("non-finite value {value} in column '{column}' at row {row}")]
    NonFiniteValue {
        column: String,
        row: usize,
        value: f64,
    },
    #[display("invalid bin step for '{column}': {error}")]
    InvalidBinning { column: String, error: BinningError },
}

/// Errors raised while producing report files.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ReportError {
    #[display("{_0}")]
    Stats(ResassessError),
    #[display("{_0}")]
    Io(io::Error),
}

/// Looks up a single column, naming every available column on failure.
pub(crate) fn require_variable<'a>(
    table: &'a TimeIndexedTable,
    name: &str,
) -> Result<&'a [f64], ResassessError> {
    table
        .column(name)
        .ok_or_else(|| ResassessError::MissingVariable {
            name: name.to_owned(),
            available: table.column_names().map(str::to_owned).collect(),
        })
}

/// Checks that all `names` are columns of `table`, naming exactly the missing ones.
pub(crate) fn require_columns(
    table: &TimeIndexedTable,
    names: &[&str],
) -> Result<(), ResassessError> {
    let mut missing = names
        .iter()
        .filter(|name| !table.has_column(name))
        .map(|name| (*name).to_owned())
        .collect::<Vec<_>>();
    if missing.is_empty() {
        return Ok(());
    }
    missing.sort();
    missing.dedup();
    Err(ResassessError::MissingColumns { missing })
}

pub(crate) fn ensure_finite(column: &str, values: &[f64]) -> Result<(), ResassessError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(row) => Err(ResassessError::NonFiniteValue {
            column: column.to_owned(),
            row,
            value: values[row],
        }),
        None => Ok(()),
    }
}
