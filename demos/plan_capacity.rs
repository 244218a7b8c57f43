//! Fit the configured model on the full series, translate the latest-horizon
//! forecast into a capacity recommendation, and sweep the service levels.
//!
//! ```text
//! cargo run --example plan_capacity -- --config demos/config.example.yaml
//! ```

use clap::Parser;
use forecast_capacity::config::load_config;
use forecast_capacity::data::DemandSeries;
use forecast_capacity::planning::{recommend_from_forecast, sensitivity_sweep};
use forecast_capacity::report::ResultsReport;
use std::path::PathBuf;
use std::process;

#[derive(Debug, Parser)]
#[command(about = "Generate a capacity recommendation from a forecast.")]
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
    let fitted = model.fit(&series)?;
    let horizon = config.backtest.horizon;
    let planning = &config.planning;

    let recommendation = recommend_from_forecast(
        fitted.as_ref(),
        horizon,
        planning.service_level,
        planning.units_per_capacity,
    )?;

    println!("\nCapacity recommendation ({})", model.name());
    println!(
        "p{} demand estimate: {:.3}",
        (recommendation.service_level * 100.0).round(),
        recommendation.demand_estimate
    );
    println!("Recommended capacity: {}", recommendation.recommended_capacity);

    let weights = config.cost_weights()?;
    let sweep = sensitivity_sweep(
        fitted.as_ref(),
        horizon,
        planning.units_per_capacity,
        &planning.service_levels,
        &weights,
    )?;

    println!("\nService-level sweep");
    println!(
        "{:>8} {:>16} {:>10} {:>12} {:>12}",
        "level", "demand estimate", "capacity", "over cost", "under cost"
    );
    for record in &sweep {
        println!(
            "{:>8} {:>16.3} {:>10} {:>12.3} {:>12.3}",
            format!("p{}", (record.recommendation.service_level * 100.0).round()),
            record.recommendation.demand_estimate,
            record.recommendation.recommended_capacity,
            record.cost.over_capacity_cost,
            record.cost.under_capacity_cost
        );
    }

    // Append only after the full run has succeeded
    let report = ResultsReport::new(&args.report)?;
    report.append_capacity(model.name(), horizon, planning.service_level, &sweep)?;
    println!("\nWrote recommendation to: {}", args.report.display());

    Ok(())
}
