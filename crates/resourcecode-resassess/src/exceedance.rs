//! Exceedance curve of one table column

use resourcecode_stats::exceedance::{ExceedanceCurve, rank_exceedance};

use crate::{
    error::{self, ResassessError},
    table::TimeIndexedTable,
};

/// Exceedance curve of one column of `table`.
///
/// See [`rank_exceedance`] for the ranking rule. Rows of the whole table
/// take part; restrict the table first (e.g. with
/// [`TimeIndexedTable::select_month`]) for a monthly or yearly curve.
///
/// # Errors
///
/// [`ResassessError::MissingVariable`] if `variable` is not a column, and
/// [`ResassessError::NonFiniteValue`] if the column holds NaN or infinity.
pub fn exceedance_curve(
    table: &TimeIndexedTable,
    variable: &str,
) -> Result<ExceedanceCurve, ResassessError> {
    let values = error::require_variable(table, variable)?;
    error::ensure_finite(variable, values)?;
    Ok(rank_exceedance(values))
}
