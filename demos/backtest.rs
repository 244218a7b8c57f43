//! Run a rolling-origin backtest from a YAML config and append the results
//! record to the Markdown report.
//!
//! ```text
//! cargo run --example backtest -- --config demos/config.example.yaml
//! ```

use clap::Parser;
use forecast_capacity::backtest::rolling_origin_backtest;
use forecast_capacity::config::load_config;
use forecast_capacity::data::DemandSeries;
use forecast_capacity::report::ResultsReport;
use std::path::PathBuf;
use std::process;

#[derive(Debug, Parser)]
#[command(about = "Run rolling-origin backtesting.")]
struct Args {
    /// Path to the YAML config file
    #[arg(long)]
    config: PathBuf,

    /// Path of the Markdown results file
    #[arg(long, default_value = "docs/results.md")]
    report: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn run(args: &Args) -> forecast_capacity::Result<()> {
    let config = load_config(&args.config)?;

    let series = DemandSeries::from_csv(
        &config.data.path,
        &config.data.date_col,
        &config.data.target_col,
        config.frequency()?,
    )?;

    let model = config.model.build()?;
    let split = config.split_config()?;
    let summary = rolling_origin_backtest(
        &series,
        &split,
        &model,
        Some(config.planning.service_level),
    )?;

    println!("\nBacktest summary ({})", summary.model_name);
    println!("{:>5} {:>12} {:>10} {:>10}", "fold", "cutoff", "mae", "sMAPE(%)");
    for metric in &summary.fold_metrics {
        println!(
            "{:>5} {:>12} {:>10.3} {:>10.3}",
            metric.fold, metric.cutoff, metric.mae, metric.smape
        );
    }
    println!("\nAverage MAE: {:.3}", summary.avg_mae);
    println!("Average sMAPE(%): {:.3}", summary.avg_smape);

    // Append only after the full run has succeeded
    let report = ResultsReport::new(&args.report)?;
    report.append_backtest(&summary)?;
    println!("\nWrote results to: {}", args.report.display());

    Ok(())
}
