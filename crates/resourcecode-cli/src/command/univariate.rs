use std::{
    ffi::OsString,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use resourcecode_resassess::{
    display::{self, FloatFormat},
    univariate::{GroupKey, GroupedStats, univariate_monthly_yearly, write_descriptive_csv},
};

use crate::{command::input::InputArg, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct UnivariateArg {
    #[clap(flatten)]
    input: InputArg,
    /// Variable to summarize
    #[arg(long, default_value = "hs")]
    variable: String,
    /// Also write `<PREFIX>_monthly.csv` and `<PREFIX>_yearly.csv`
    #[arg(long)]
    output_prefix: Option<PathBuf>,
    /// Do not print the tables to the console
    #[arg(long)]
    quiet: bool,
}

pub(crate) fn run(arg: &UnivariateArg) -> anyhow::Result<()> {
    let table = arg.input.load()?;
    let stats = univariate_monthly_yearly(&table, &arg.variable)?;

    if !arg.quiet {
        let mut stdout = io::stdout().lock();
        display::print_table(
            &mut stdout,
            &format!("Monthly statistics - {}", arg.variable),
            &stats.monthly,
            FloatFormat::CONSOLE,
        )?;
        display::print_table(
            &mut stdout,
            &format!("Yearly statistics - {}", arg.variable),
            &stats.yearly,
            FloatFormat::CONSOLE,
        )?;
    }

    if let Some(prefix) = &arg.output_prefix {
        save_stats(&suffixed_path(prefix, "monthly"), &stats.monthly)?;
        save_stats(&suffixed_path(prefix, "yearly"), &stats.yearly)?;
    }
    Ok(())
}

fn suffixed_path(prefix: &Path, suffix: &str) -> PathBuf {
    let mut path = OsString::from(prefix.with_extension(""));
    path.push(format!("_{suffix}.csv"));
    PathBuf::from(path)
}

fn save_stats<K>(path: &Path, stats: &GroupedStats<K>) -> anyhow::Result<()>
where
    K: GroupKey,
{
    let mut output = Output::open(path)?;
    write_descriptive_csv(&mut output, stats)
        .and_then(|()| output.flush())
        .with_context(|| format!("Failed to write statistics to {}", output.display_path()))?;
    println!("Statistics saved to: {}", path.display());
    Ok(())
}
