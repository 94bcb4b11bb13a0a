//! Table input shared by every command

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;
use resourcecode_resassess::table::{ParameterSeries, TimeIndexedTable, parse_timeseries_response};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InputArg {
    /// CSV file whose first column is the timestamp
    #[arg(long, conflicts_with = "json", required_unless_present = "json")]
    input: Option<PathBuf>,
    /// Time-series service response of one parameter, as NAME=PATH (repeatable)
    #[arg(long, value_name = "NAME=PATH", value_parser = parse_named_path)]
    json: Vec<(String, PathBuf)>,
}

impl InputArg {
    pub(crate) fn load(&self) -> anyhow::Result<TimeIndexedTable> {
        let table = match &self.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open input file: {}", path.display()))?;
                TimeIndexedTable::from_csv_reader(BufReader::new(file))
                    .with_context(|| format!("Failed to read table from {}", path.display()))?
            }
            None => {
                let series = self
                    .json
                    .iter()
                    .map(|(name, path)| read_parameter_series(name, path))
                    .collect::<anyhow::Result<Vec<_>>>()?;
                TimeIndexedTable::from_parameter_series(&series)?
            }
        };
        tracing::info!(
            rows = table.len(),
            columns = table.column_names().count(),
            "loaded input table"
        );
        Ok(table)
    }
}

fn read_parameter_series(name: &str, path: &Path) -> anyhow::Result<ParameterSeries> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {name} response: {}", path.display()))?;
    let data = parse_timeseries_response(BufReader::new(file))
        .with_context(|| format!("Failed to parse {name} response: {}", path.display()))?;
    Ok(ParameterSeries {
        name: name.to_owned(),
        data,
    })
}

fn parse_named_path(arg: &str) -> Result<(String, PathBuf), String> {
    match arg.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_owned(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=PATH, got '{arg}'")),
    }
}
