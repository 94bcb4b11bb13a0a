use clap::{Parser, Subcommand};

use self::{bivariate::BivariateArg, exceedance::ExceedanceArg, univariate::UnivariateArg};

mod bivariate;
mod exceedance;
mod input;
mod univariate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Write occurrence and energy flux tables binned over Hs and Te
    Bivariate(#[clap(flatten)] BivariateArg),
    /// Print monthly and yearly descriptive statistics of a variable
    Univariate(#[clap(flatten)] UnivariateArg),
    /// Write the exceedance curve of a variable
    Exceedance(#[clap(flatten)] ExceedanceArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Bivariate(arg) => bivariate::run(&arg)?,
        Mode::Univariate(arg) => univariate::run(&arg)?,
        Mode::Exceedance(arg) => exceedance::run(&arg)?,
    }
    Ok(())
}
