//! Bivariate report files for the whole series and every calendar month
//!
//! For each period (`All`, then every month present, January first) the four
//! bivariate tables are written to `{prefix}_{period}_{statistic}.csv`, where
//! `{period}` is `All` or the English month abbreviation (`Jan`, `Feb`, ...)
//! and `{statistic}` one of `perc_occur`, `count`, `av_energy_flux` and
//! `std_energy_flux`. Any extension on the prefix is dropped first.

use std::{
    ffi::OsString,
    fmt,
    fs::File,
    io::{self, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    bivariate::{BivariateParams, BivariateStats, bivariate_statistics},
    display::{self, FloatFormat, Tabular},
    error::ReportError,
    table::{self, TimeIndexedTable},
};

/// Options of [`produce_reports`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    #[serde(flatten)]
    pub bivariate: BivariateParams,
    /// Print every table to the console as it is written.
    pub display: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            bivariate: BivariateParams::default(),
            display: true,
        }
    }
}

/// Which bivariate table a report file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Percentage,
    Count,
    Mean,
    StdDev,
}

impl Statistic {
    /// All statistics, in the order their files are written.
    pub const ALL: [Self; 4] = [Self::Percentage, Self::Count, Self::Mean, Self::StdDev];

    /// File name suffix.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Percentage => "perc_occur",
            Self::Count => "count",
            Self::Mean => "av_energy_flux",
            Self::StdDev => "std_energy_flux",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Percentage => "Percentage Occurence",
            Self::Count => "Number Occurence",
            Self::Mean => "Average Energy Flux",
            Self::StdDev => "Energy Flux ST. Dev",
        }
    }

    fn table(self, stats: &BivariateStats) -> &dyn Tabular {
        match self {
            Self::Percentage => &stats.percentage,
            Self::Count => &stats.count,
            Self::Mean => &stats.mean,
            Self::StdDev => &stats.stdev,
        }
    }
}

/// Rows covered by one report pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    All,
    /// Calendar month (1-12), any year.
    Month(u32),
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Month(month) => f.write_str(table::month_abbreviation(*month)),
        }
    }
}

/// Path of the file holding `statistic` for `period`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use resourcecode_resassess::report::{Period, Statistic, report_path};
///
/// assert_eq!(
///     report_path(Path::new("out/site.csv"), Period::Month(1), Statistic::Count),
///     Path::new("out/site_Jan_count.csv")
/// );
/// assert_eq!(
///     report_path(Path::new("site"), Period::All, Statistic::Mean),
///     Path::new("site_All_av_energy_flux.csv")
/// );
/// ```
#[must_use]
pub fn report_path(prefix: &Path, period: Period, statistic: Statistic) -> PathBuf {
    let mut path = OsString::from(prefix.with_extension(""));
    path.push(format!("_{period}_{}.csv", statistic.suffix()));
    PathBuf::from(path)
}

/// Writes the bivariate report files for the whole table and every month
/// present, printing each table to stdout when `options.display` is set.
///
/// Returns the written paths in write order: the four `All` files, then four
/// files per month.
///
/// # Errors
///
/// [`ReportError::Stats`] if the bivariate computation fails (nothing is
/// written in that case), [`ReportError::Io`] if a file cannot be written.
pub fn produce_reports(
    table: &TimeIndexedTable,
    prefix: &Path,
    options: &ReportOptions,
) -> Result<Vec<PathBuf>, ReportError> {
    let stdout = io::stdout();
    produce_reports_to(table, prefix, options, &mut stdout.lock())
}

/// Same as [`produce_reports`], printing tables to `console` instead of stdout.
pub fn produce_reports_to<W>(
    table: &TimeIndexedTable,
    prefix: &Path,
    options: &ReportOptions,
    console: &mut W,
) -> Result<Vec<PathBuf>, ReportError>
where
    W: io::Write + ?Sized,
{
    let mut passes = vec![(Period::All, bivariate_statistics(table, &options.bivariate)?)];
    for month in table.months_present() {
        let stats = bivariate_statistics(&table.select_month(month), &options.bivariate)?;
        passes.push((Period::Month(month), stats));
    }

    let mut written = Vec::with_capacity(passes.len() * Statistic::ALL.len());
    for (period, stats) in &passes {
        tracing::debug!(%period, "writing report period");
        for statistic in Statistic::ALL {
            let tab = statistic.table(stats);
            let path = report_path(prefix, *period, statistic);
            write_table(&path, tab)?;
            tracing::info!(path = %path.display(), "wrote report table");
            if options.display {
                let title = format!("{} - {period}", statistic.title());
                display::print_table(console, &title, tab, FloatFormat::CONSOLE)?;
            }
            written.push(path);
        }
    }
    Ok(written)
}

fn write_table(path: &Path, tab: &dyn Tabular) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    display::write_csv(&mut writer, tab, FloatFormat::CSV)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::error::ResassessError;

    fn at(month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn sample() -> TimeIndexedTable {
        TimeIndexedTable::new(vec![at(1, 1), at(1, 2), at(3, 1)])
            .with_column("hs", vec![0.7, 1.2, 1.3])
            .unwrap()
            .with_column("t0m1", vec![5.5, 6.2, 6.4])
            .unwrap()
            .with_column("cge", vec![1.4, 4.3, 5.2])
            .unwrap()
    }

    #[test]
    fn test_period_tokens() {
        assert_eq!(Period::All.to_string(), "All");
        assert_eq!(Period::Month(2).to_string(), "Feb");
        assert_eq!(Period::Month(12).to_string(), "Dec");
    }

    #[test]
    fn test_prefix_extension_is_stripped() {
        let path = report_path(Path::new("dir/out.csv"), Period::All, Statistic::Percentage);
        assert_eq!(path, Path::new("dir/out_All_perc_occur.csv"));
        let path = report_path(Path::new("dir/out"), Period::Month(9), Statistic::StdDev);
        assert_eq!(path, Path::new("dir/out_Sep_std_energy_flux.csv"));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options = serde_json::from_str::<ReportOptions>(r#"{"step_x": 0.25, "display": false}"#)
            .unwrap();
        assert_eq!(options.bivariate.step_x, 0.25);
        assert_eq!(options.bivariate.step_y, 1.0);
        assert_eq!(options.bivariate.var_z, "cge");
        assert!(!options.display);
    }

    #[test]
    fn test_missing_columns_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let table = TimeIndexedTable::new(vec![at(1, 1)])
            .with_column("hs", vec![1.0])
            .unwrap();
        let mut console = Vec::new();
        let err = produce_reports_to(&table, &dir.path().join("x"), &ReportOptions::default(), &mut console)
            .unwrap_err();
        assert!(matches!(
            err,
            ReportError::Stats(ResassessError::MissingColumns { ref missing })
                if missing == &["cge", "t0m1"]
        ));
        assert!(console.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_console_titles_follow_write_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = Vec::new();
        let prefix = dir.path().join("site");
        let written =
            produce_reports_to(&sample(), &prefix, &ReportOptions::default(), &mut console).unwrap();
        assert_eq!(written.len(), 12);

        let console = String::from_utf8(console).unwrap();
        let titles = console
            .lines()
            .filter(|line| line.contains(" - "))
            .collect::<Vec<_>>();
        assert_eq!(titles[0], "Percentage Occurence - All");
        assert_eq!(titles[1], "Number Occurence - All");
        assert_eq!(titles[2], "Average Energy Flux - All");
        assert_eq!(titles[3], "Energy Flux ST. Dev - All");
        assert_eq!(titles[4], "Percentage Occurence - Jan");
        assert_eq!(titles[11], "Energy Flux ST. Dev - Mar");
    }

    #[test]
    fn test_quiet_reports_print_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let options = ReportOptions {
            display: false,
            ..ReportOptions::default()
        };
        let mut console = Vec::new();
        let written = produce_reports_to(&sample(), &dir.path().join("site"), &options, &mut console).unwrap();
        assert!(console.is_empty());
        assert!(written.iter().all(|path| path.exists()));
    }
}
