//! Table rendering for CSV files and console dumps
//!
//! Number formatting is an explicit [`FloatFormat`] argument of every
//! rendering call; nothing here reads or mutates process-wide state, so two
//! reports printed with different formats cannot affect each other.

use std::io::{self, Write};

/// Formatting applied to floating-point cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatFormat {
    /// Digits after the decimal point.
    pub decimals: usize,
    /// Group the integer part in thousands with `,`.
    pub thousands_separator: bool,
}

impl FloatFormat {
    /// One decimal, no grouping: the cell format of report files.
    pub const CSV: Self = Self {
        decimals: 1,
        thousands_separator: false,
    };

    /// Three decimals with thousands grouping: the console dump format.
    pub const CONSOLE: Self = Self {
        decimals: 3,
        thousands_separator: true,
    };

    /// Formats `value` with this format.
    ///
    /// # Examples
    ///
    /// ```
    /// use resourcecode_resassess::display::FloatFormat;
    ///
    /// assert_eq!(FloatFormat::CSV.format(2.26), "2.3");
    /// assert_eq!(FloatFormat::CSV.format(12.0), "12.0");
    /// assert_eq!(FloatFormat::CONSOLE.format(12345.6789), "12,345.679");
    /// assert_eq!(FloatFormat::CONSOLE.format(-0.5), "-0.500");
    /// ```
    #[must_use]
    pub fn format(self, value: f64) -> String {
        let text = format!("{value:.prec$}", prec = self.decimals);
        if !self.thousands_separator || !value.is_finite() {
            return text;
        }
        let (sign, unsigned) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text.as_str()),
        };
        let (integer, fraction) = match unsigned.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (unsigned, None),
        };
        let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
        grouped.push_str(sign);
        for (i, digit) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        if let Some(fraction) = fraction {
            grouped.push('.');
            grouped.push_str(fraction);
        }
        grouped
    }
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    /// Undefined value (e.g. the sample deviation of a single observation).
    Missing,
}

impl Cell {
    fn render(&self, format: FloatFormat, missing: &str) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Integer(value) => value.to_string(),
            Cell::Float(value) => format.format(*value),
            Cell::Missing => missing.to_owned(),
        }
    }
}

/// A labelled two-dimensional table that can be written as CSV or printed.
pub trait Tabular {
    /// Header of the row-label column.
    fn index_label(&self) -> &str;
    /// Headers of the data columns.
    fn column_headers(&self) -> Vec<String>;
    /// Rows as (row label, cells), aligned with [`Tabular::column_headers`].
    fn rows(&self) -> Vec<(String, Vec<Cell>)>;
}

/// Writes `table` as CSV with a header row.
///
/// Missing cells are left empty; fields containing `,` or `"` are quoted.
pub fn write_csv<W, T>(writer: &mut W, table: &T, format: FloatFormat) -> io::Result<()>
where
    W: Write + ?Sized,
    T: Tabular + ?Sized,
{
    let header = std::iter::once(table.index_label().to_owned())
        .chain(table.column_headers())
        .map(|field| escape_csv(&field))
        .collect::<Vec<_>>();
    writeln!(writer, "{}", header.join(","))?;

    for (label, cells) in table.rows() {
        let fields = std::iter::once(escape_csv(&label))
            .chain(cells.iter().map(|cell| escape_csv(&cell.render(format, ""))))
            .collect::<Vec<_>>();
        writeln!(writer, "{}", fields.join(","))?;
    }
    Ok(())
}

/// Prints `title` followed by the whole of `table`, columns aligned.
///
/// No row or column is elided, however large the table.
pub fn print_table<W, T>(writer: &mut W, title: &str, table: &T, format: FloatFormat) -> io::Result<()>
where
    W: Write + ?Sized,
    T: Tabular + ?Sized,
{
    let headers = table.column_headers();
    let rows = table
        .rows()
        .into_iter()
        .map(|(label, cells)| {
            let cells = cells
                .iter()
                .map(|cell| cell.render(format, "NaN"))
                .collect::<Vec<_>>();
            (label, cells)
        })
        .collect::<Vec<_>>();

    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .chain([table.index_label().chars().count()])
        .max()
        .unwrap_or(0);
    let column_widths = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .filter_map(|(_, cells)| cells.get(col))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();

    writeln!(writer, "{title}")?;
    writeln!(writer)?;
    write!(writer, "{:<label_width$}", table.index_label())?;
    for (header, width) in headers.iter().zip(&column_widths) {
        write!(writer, "  {header:>width$}")?;
    }
    writeln!(writer)?;
    for (label, cells) in &rows {
        write!(writer, "{label:<label_width$}")?;
        for (cell, width) in cells.iter().zip(&column_widths) {
            write!(writer, "  {cell:>width$}")?;
        }
        writeln!(writer)?;
    }
    writeln!(writer)?;
    Ok(())
}

fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}
