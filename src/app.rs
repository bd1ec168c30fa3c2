//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - runs the pipeline
//! - prints the report and shows charts
//! - writes optional exports

use clap::Parser;
use tracing::debug;

use crate::cli::{ChartArgs, Command, GenerateArgs, PlotArgs, RunArgs};
use crate::domain::RunConfig;
use crate::error::AppError;
use crate::plot::{PlotTarget, resolve_plot_target, show_chart};

pub mod pipeline;

/// Entry point for the `sales` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is fine; env-backed options fall back to their defaults.
    dotenvy::dotenv().ok();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    crate::logging::init_logging(&cli.log_level)?;

    match cli.command {
        Command::Run(args) => handle_run(&run_config_from_args(&args, true)),
        Command::Report(args) => handle_run(&run_config_from_args(&args, false)),
        Command::Generate(args) => handle_generate(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_run(config: &RunConfig) -> Result<(), AppError> {
    let target = resolve_plot_target(config.plot_mode);
    debug!(?target, "resolved plot target");

    if config.write_dataset {
        crate::data::write_sample_dataset(&config.data_file)?;
        println!("{}", crate::report::format_dataset_written(&config.data_file));
    }

    let aggregated = pipeline::aggregate_dataset(&config.data_file)?;
    if let Some(summary) = crate::report::format_load_summary(&aggregated, &config.data_file) {
        println!("{summary}");
    }
    println!("{}", crate::report::format_monthly_sales(&aggregated.monthly));

    // Ranking an empty series fails here, after the totals are on screen.
    let run = pipeline::finish_run(aggregated)?;
    println!("{}", crate::report::format_extrema(&run.extrema));

    show_chart(
        &crate::plot::sales_trend_chart(&run.monthly),
        target,
        config.plot_width,
        config.plot_height,
    )?;

    println!("{}", crate::report::format_forecast(&run.forecast));

    show_chart(
        &crate::plot::forecast_chart(&run.monthly, &run.forecast),
        target,
        config.plot_width,
        config.plot_height,
    )?;

    // Optional exports.
    if let Some(path) = &config.export_forecast {
        crate::io::write_forecast_csv(path, &run.monthly, &run.forecast)?;
    }
    if let Some(path) = &config.export_summary {
        let summary = crate::io::build_summary(&config.data_file, &run.monthly, &run.extrema, &run.forecast);
        crate::io::write_summary_json(path, &summary)?;
    }

    Ok(())
}

fn handle_generate(args: GenerateArgs) -> Result<(), AppError> {
    crate::data::write_sample_dataset(&args.data_file)?;
    println!("{}", crate::report::format_dataset_written(&args.data_file));
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let summary = crate::io::read_summary_json(&args.summary)?;
    let (trend, forecast) = crate::plot::charts_from_summary(&summary);

    let target = match resolve_plot_target(args.chart.plot) {
        // `plot` always renders something.
        PlotTarget::Off => PlotTarget::Ascii,
        other => other,
    };
    show_chart(&trend, target, args.chart.width, args.chart.height)?;
    show_chart(&forecast, target, args.chart.width, args.chart.height)
}

pub fn run_config_from_args(args: &RunArgs, write_dataset: bool) -> RunConfig {
    let ChartArgs { plot, width, height } = args.chart.clone();
    RunConfig {
        data_file: args.data_file.clone(),
        write_dataset,
        plot_mode: plot,
        plot_width: width,
        plot_height: height,
        export_forecast: args.export_forecast.clone(),
        export_summary: args.export_summary.clone(),
    }
}

/// Rewrite argv so `sales` defaults to `sales run`.
///
/// Rules:
/// - `sales`                        -> `sales run`
/// - `sales --plot ascii ...`       -> `sales run --plot ascii ...`
/// - `sales --log-level info`       -> `sales --log-level info run`
/// - `sales --log-level info plot`  -> unchanged (global flags are skipped)
/// - `sales --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let first = first_non_global_arg(&argv);
    let Some(arg) = argv.get(first).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg.as_str(), "run" | "generate" | "report" | "plot");
    if is_subcommand {
        return argv;
    }

    // A leading flag means "run flags".
    if arg.starts_with('-') {
        argv.insert(first, "run".to_string());
        return argv;
    }

    argv
}

const GLOBAL_LOG_FLAG: &str = "--log-level";

/// Index of the first argument that is not a global flag (or its value).
fn first_non_global_arg(argv: &[String]) -> usize {
    let mut idx = 1;
    while let Some(arg) = argv.get(idx) {
        if arg == GLOBAL_LOG_FLAG {
            idx += 2;
        } else if arg.strip_prefix(GLOBAL_LOG_FLAG).is_some_and(|rest| rest.starts_with('=')) {
            idx += 1;
        } else {
            break;
        }
    }
    idx
}
