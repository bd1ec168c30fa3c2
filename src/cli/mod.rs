//! Command-line parsing for the sales forecasting tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pipeline and presentation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::DEFAULT_DATA_FILE;
use crate::domain::PlotMode;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sales", version, about = "Monthly sales report with a moving-average forecast")]
pub struct Cli {
    /// Log filter (e.g. `info`, `sales_forecast=debug`). Logs go to stderr.
    #[arg(long, global = true, env = "SALES_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the sample dataset, analyze it, print the report and show charts.
    Run(RunArgs),
    /// Only write the sample dataset.
    Generate(GenerateArgs),
    /// Analyze an existing dataset without rewriting it.
    Report(RunArgs),
    /// Show the charts stored in a summary JSON.
    Plot(PlotArgs),
}

/// Options shared by `run` and `report`.
#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Dataset CSV to write and/or read.
    #[arg(long, value_name = "CSV", env = "SALES_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    #[command(flatten)]
    pub chart: ChartArgs,

    /// Export monthly totals and forecast to CSV.
    #[arg(long, value_name = "CSV")]
    pub export_forecast: Option<PathBuf>,

    /// Export the run summary to JSON (readable by `sales plot`).
    #[arg(long, value_name = "JSON")]
    pub export_summary: Option<PathBuf>,
}

/// Chart rendering options.
#[derive(Debug, Args, Clone)]
pub struct ChartArgs {
    /// Where to render charts.
    #[arg(long, value_enum, default_value_t = PlotMode::Auto)]
    pub plot: PlotMode,

    /// ASCII chart width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// ASCII chart height (rows).
    #[arg(long, default_value_t = 18)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    /// Destination CSV.
    #[arg(long, value_name = "CSV", env = "SALES_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,
}

/// Options for plotting a saved summary.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Summary JSON produced by `sales run --export-summary`.
    #[arg(long, value_name = "JSON")]
    pub summary: PathBuf,

    #[command(flatten)]
    pub chart: ChartArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_defaults() {
        let cli = Cli::try_parse_from(["sales", "run"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.chart.plot, PlotMode::Auto);
        assert_eq!(args.chart.width, 72);
        assert!(args.export_forecast.is_none());
    }

    #[test]
    fn report_with_options() {
        let cli = Cli::try_parse_from([
            "sales",
            "report",
            "--data-file",
            "in.csv",
            "--plot",
            "ascii",
            "--export-summary",
            "out.json",
        ])
        .unwrap();
        let Command::Report(args) = cli.command else {
            panic!("expected report");
        };
        assert_eq!(args.data_file, PathBuf::from("in.csv"));
        assert_eq!(args.chart.plot, PlotMode::Ascii);
        assert_eq!(args.export_summary, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn plot_requires_summary() {
        assert!(Cli::try_parse_from(["sales", "plot"]).is_err());
        assert!(Cli::try_parse_from(["sales", "plot", "--summary", "s.json", "--plot", "none"]).is_ok());
    }
}
