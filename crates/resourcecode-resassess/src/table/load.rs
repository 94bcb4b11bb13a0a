use std::io::Read;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::{TableError, TimeIndexedTable};

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Errors raised while loading a table from CSV or service responses.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LoadError {
    #[display("invalid CSV input: {_0}")]
    Reader(csv::Error),
    #[display("invalid time-series response: {_0}")]
    Json(serde_json::Error),
    #[display("{_0}")]
    Table(TableError),
    #[from(ignore)]
    #[display("line {line}: {message}")]
    Csv {
        line: u64,
        #[error(not(source))]
        message: String,
    },
    #[from(ignore)]
    #[display("invalid timestamp {value}")]
    Timestamp {
        #[error(not(source))]
        value: String,
    },
    #[from(ignore)]
    #[display("timestamps of parameter '{parameter}' do not match the first parameter")]
    MisalignedSeries {
        #[error(not(source))]
        parameter: String,
    },
    #[from(ignore)]
    #[display("no selection parameter found")]
    NoParameters,
}

/// The `[timestamp_ms, value]` history of one parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParameterSeries {
    pub name: String,
    pub data: Vec<(f64, f64)>,
}

#[derive(Debug, Deserialize)]
struct TimeseriesResponse {
    result: TimeseriesResult,
}

#[derive(Debug, Deserialize)]
struct TimeseriesResult {
    data: Vec<(f64, f64)>,
}

/// Parses the body of a time-series query into `[timestamp_ms, value]` pairs.
///
/// The body has the shape `{"result": {"data": [[ts, value], ...]}}`.
pub fn parse_timeseries_response<R>(reader: R) -> Result<Vec<(f64, f64)>, LoadError>
where
    R: Read,
{
    let response: TimeseriesResponse = serde_json::from_reader(reader)?;
    Ok(response.result.data)
}

impl TimeIndexedTable {
    /// Combines per-parameter time histories into one table.
    ///
    /// The index is taken from the first series; every other series must
    /// carry the same timestamps in the same order.
    pub fn from_parameter_series(series: &[ParameterSeries]) -> Result<Self, LoadError> {
        let (first, _) = series.split_first().ok_or(LoadError::NoParameters)?;
        let index = first
            .data
            .iter()
            .map(|&(ts, _)| timestamp_from_millis(ts))
            .collect::<Result<Vec<_>, _>>()?;

        let mut table = Self::new(index);
        for parameter in series {
            let aligned = parameter.data.len() == first.data.len()
                && parameter
                    .data
                    .iter()
                    .zip(&first.data)
                    .all(|((a, _), (b, _))| a == b);
            if !aligned {
                return Err(LoadError::MisalignedSeries {
                    parameter: parameter.name.clone(),
                });
            }
            let values = parameter.data.iter().map(|&(_, v)| v).collect();
            table.insert_column(parameter.name.clone(), values)?;
        }
        tracing::debug!(
            rows = table.len(),
            parameters = series.len(),
            "combined parameter series"
        );
        Ok(table)
    }

    /// Reads a CSV table whose first column is the timestamp.
    ///
    /// The header row names the columns; the name of the first (index)
    /// column is ignored. Fields may be quoted and surrounding whitespace is
    /// trimmed. Blank lines are skipped and empty cells are read as NaN.
    pub fn from_csv_reader<R>(reader: R) -> Result<Self, LoadError>
    where
        R: Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let names = reader
            .headers()?
            .iter()
            .skip(1)
            .map(str::to_owned)
            .collect::<Vec<_>>();

        let mut index = vec![];
        let mut columns = vec![vec![]; names.len()];
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, csv::Position::line);
            index.push(parse_timestamp(record.get(0).unwrap_or_default())?);

            let num_values = record.len().saturating_sub(1);
            if num_values != names.len() {
                return Err(LoadError::Csv {
                    line,
                    message: format!("expected {} values, found {num_values}", names.len()),
                });
            }
            for (column, field) in columns.iter_mut().zip(record.iter().skip(1)) {
                column.push(parse_value(field).ok_or_else(|| LoadError::Csv {
                    line,
                    message: format!("invalid number {field:?}"),
                })?);
            }
        }

        let mut table = Self::new(index);
        for (name, values) in names.into_iter().zip(columns) {
            table.insert_column(name, values)?;
        }
        tracing::debug!(rows = table.len(), "read CSV table");
        Ok(table)
    }
}

#[expect(clippy::cast_possible_truncation)]
fn timestamp_from_millis(ts: f64) -> Result<NaiveDateTime, LoadError> {
    let invalid = || LoadError::Timestamp {
        value: ts.to_string(),
    };
    if !ts.is_finite() {
        return Err(invalid());
    }
    DateTime::from_timestamp_millis(ts as i64)
        .map(|dt| dt.naive_utc())
        .ok_or_else(invalid)
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, LoadError> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| LoadError::Timestamp {
            value: value.to_owned(),
        })
}

fn parse_value(field: &str) -> Option<f64> {
    if field.is_empty() {
        return Some(f64::NAN);
    }
    field.parse().ok()
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_parse_response() {
        let body = r#"{"result": {"data": [[1262304000000, 1.5], [1262307600000, 1.75]]}}"#;
        let data = parse_timeseries_response(body.as_bytes()).unwrap();
        assert_eq!(data, [(1_262_304_000_000.0, 1.5), (1_262_307_600_000.0, 1.75)]);
    }

    #[test]
    fn test_parse_response_rejects_malformed_body() {
        let err = parse_timeseries_response(r#"{"data": []}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_parameter_series_combined() {
        let data = |values: [f64; 2]| {
            vec![
                (1_262_304_000_000.0, values[0]),
                (1_262_307_600_000.0, values[1]),
            ]
        };
        let series = [
            ParameterSeries {
                name: "hs".into(),
                data: data([1.0, 2.0]),
            },
            ParameterSeries {
                name: "t0m1".into(),
                data: data([6.0, 7.0]),
            },
        ];
        let table = TimeIndexedTable::from_parameter_series(&series).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column("t0m1").unwrap(), [6.0, 7.0]);
        let first = table.index()[0];
        assert_eq!((first.year(), first.month(), first.day()), (2010, 1, 1));
        assert_eq!(table.index()[1].hour(), 1);
    }

    #[test]
    fn test_parameter_series_misaligned() {
        let series = [
            ParameterSeries {
                name: "hs".into(),
                data: vec![(0.0, 1.0), (3_600_000.0, 1.0)],
            },
            ParameterSeries {
                name: "cge".into(),
                data: vec![(0.0, 1.0), (7_200_000.0, 1.0)],
            },
        ];
        let err = TimeIndexedTable::from_parameter_series(&series).unwrap_err();
        assert_eq!(
            err.to_string(),
            "timestamps of parameter 'cge' do not match the first parameter"
        );
    }

    #[test]
    fn test_no_parameters() {
        let err = TimeIndexedTable::from_parameter_series(&[]).unwrap_err();
        assert_eq!(err.to_string(), "no selection parameter found");
    }

    #[test]
    fn test_csv() {
        let csv = "time,hs,t0m1\n2017-01-01 00:00:00,1.25,6.5\n2017-02-01T03:00:00,,7\n\n";
        let table = TimeIndexedTable::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column_names().collect::<Vec<_>>(), ["hs", "t0m1"]);
        assert_eq!(table.column("t0m1").unwrap(), [6.5, 7.0]);
        assert!(table.column("hs").unwrap()[1].is_nan());
        assert_eq!(table.months_present(), [1, 2]);
    }

    #[test]
    fn test_csv_quoted_fields() {
        let csv = "\"time\",\"hs\",\"t0m1\"\n\"2017-01-01 00:00:00\",1.25,\"6.5\"\n";
        let table = TimeIndexedTable::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.column_names().collect::<Vec<_>>(), ["hs", "t0m1"]);
        assert_eq!(table.column("hs").unwrap(), [1.25]);
        assert_eq!(table.column("t0m1").unwrap(), [6.5]);
        assert_eq!(table.index()[0].year(), 2017);

        let table = TimeIndexedTable::from_csv_reader("time,\"hs\",t0m1\n2017-01-01,1,2\n".as_bytes())
            .unwrap();
        assert!(table.has_column("hs"));
    }

    #[test]
    fn test_csv_date_only_timestamp() {
        let table = TimeIndexedTable::from_csv_reader("t,hs\n2019-05-04,1\n".as_bytes()).unwrap();
        assert_eq!(table.month_of(0), 5);
    }

    #[test]
    fn test_csv_errors() {
        let err = TimeIndexedTable::from_csv_reader("t,hs\n2017-01-01,abc\n".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "line 2: invalid number \"abc\"");

        let err = TimeIndexedTable::from_csv_reader("t,hs\nyesterday,1\n".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "invalid timestamp yesterday");

        let err = TimeIndexedTable::from_csv_reader("t,hs\n2017-01-01,1,2\n".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "line 2: expected 1 values, found 2");
    }

    #[test]
    fn test_csv_empty_input() {
        let table = TimeIndexedTable::from_csv_reader("".as_bytes()).unwrap();
        assert!(table.is_empty());
    }
}
