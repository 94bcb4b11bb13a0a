use std::{io::Write as _, path::PathBuf};

use anyhow::Context;
use resourcecode_resassess::{
    display::{self, FloatFormat},
    exceedance::exceedance_curve,
    univariate::monthly_exceedance,
};

use crate::{command::input::InputArg, util::Output};

const RANK_FORMAT: FloatFormat = FloatFormat {
    decimals: 6,
    thousands_separator: false,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExceedanceArg {
    #[clap(flatten)]
    input: InputArg,
    /// Variable to rank
    #[arg(long, default_value = "hs")]
    variable: String,
    /// Rank within each calendar month instead of the whole series
    #[arg(long)]
    monthly: bool,
    /// Output CSV file (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ExceedanceArg) -> anyhow::Result<()> {
    let table = arg.input.load()?;
    let mut output = Output::from_output_path(arg.output.as_deref())?;

    if arg.monthly {
        let ranks = monthly_exceedance(&table, &arg.variable)?;
        display::write_csv(&mut output, &ranks, RANK_FORMAT)
            .with_context(|| format!("Failed to write CSV to {}", output.display_path()))?;
    } else {
        let curve = exceedance_curve(&table, &arg.variable)?;
        writeln!(output, "{},exceedance", arg.variable)
            .with_context(|| format!("Failed to write CSV to {}", output.display_path()))?;
        for (value, probability) in curve.iter() {
            writeln!(output, "{value},{probability}")
                .with_context(|| format!("Failed to write CSV to {}", output.display_path()))?;
        }
    }
    output
        .flush()
        .with_context(|| format!("Failed to flush output to {}", output.display_path()))?;
    Ok(())
}
