use std::path::PathBuf;

use anyhow::Context;
use resourcecode_resassess::report::{ReportOptions, produce_reports};

use crate::{command::input::InputArg, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BivariateArg {
    #[clap(flatten)]
    input: InputArg,
    /// Prefix of the report files (any extension is dropped)
    #[arg(long)]
    output_prefix: PathBuf,
    /// JSON file with report options (column names, bin widths)
    #[arg(long)]
    options: Option<PathBuf>,
    /// Bin width of significant wave height [default: 0.5]
    #[arg(long)]
    step_hs: Option<f64>,
    /// Bin width of energy period [default: 1.0]
    #[arg(long)]
    step_te: Option<f64>,
    /// Do not print the tables to the console
    #[arg(long)]
    quiet: bool,
}

pub(crate) fn run(arg: &BivariateArg) -> anyhow::Result<()> {
    let table = arg.input.load()?;

    let mut options = match &arg.options {
        Some(path) => util::read_json_file::<ReportOptions, _>("report options", path)?,
        None => ReportOptions::default(),
    };
    if let Some(step) = arg.step_hs {
        options.bivariate.step_x = step;
    }
    if let Some(step) = arg.step_te {
        options.bivariate.step_y = step;
    }
    if arg.quiet {
        options.display = false;
    }

    let written = produce_reports(&table, &arg.output_prefix, &options)
        .context("Failed to produce bivariate reports")?;

    println!(
        "{} report files written with prefix {}",
        written.len(),
        arg.output_prefix.display()
    );
    Ok(())
}
