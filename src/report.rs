//! Append-only Markdown result records

use crate::backtest::BacktestSummary;
use crate::error::Result;
use crate::planning::SensitivityRecord;
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

/// Append-only results file
///
/// Records are appended, never overwritten; nothing is written for a run
/// that fails.
#[derive(Debug)]
pub struct ResultsReport {
    path: PathBuf,
}

impl ResultsReport {
    /// Open the results file, creating it with a header if missing
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        if !path.exists() {
            std::fs::write(&path, "# Results\n\n")?;
        }

        Ok(Self { path })
    }

    /// Append a rolling-origin backtest record
    pub fn append_backtest(&self, summary: &BacktestSummary) -> Result<()> {
        let mut md = String::new();
        let _ = writeln!(md, "## Rolling-Origin Backtest – {}\n", summary.model_name);
        let _ = writeln!(md, "- Horizon: **{}**", summary.horizon);
        let _ = writeln!(md, "- Step: **{}**", summary.step);
        let _ = writeln!(md, "- Average MAE: **{:.3}**", summary.avg_mae);
        let _ = writeln!(md, "- Average sMAPE(%): **{:.3}**\n", summary.avg_smape);

        let _ = writeln!(md, "| fold | cutoff | mae | sMAPE(%) |");
        let _ = writeln!(md, "|---|---|---|---|");
        for metric in &summary.fold_metrics {
            let _ = writeln!(
                md,
                "| {} | {} | {:.3} | {:.3} |",
                metric.fold, metric.cutoff, metric.mae, metric.smape
            );
        }

        self.append(&md)
    }

    /// Append a capacity recommendation record
    pub fn append_capacity(
        &self,
        model_name: &str,
        horizon: usize,
        service_level: f64,
        records: &[SensitivityRecord],
    ) -> Result<()> {
        let mut md = String::new();
        let _ = writeln!(md, "## Capacity Recommendation – {}\n", model_name);
        let _ = writeln!(md, "- Horizon: **{}**", horizon);
        let _ = writeln!(
            md,
            "- Service level target: **p{}**\n",
            (service_level * 100.0).round() as u32
        );

        let _ = writeln!(
            md,
            "| service level | demand estimate | units_per_capacity | recommended_capacity \
             | over_capacity_cost | under_capacity_cost |"
        );
        let _ = writeln!(md, "|---|---|---|---|---|---|");
        for record in records {
            let rec = &record.recommendation;
            let cost = &record.cost;
            let _ = writeln!(
                md,
                "| p{} | {:.3} | {} | {} | {:.3} | {:.3} |",
                (rec.service_level * 100.0).round() as u32,
                rec.demand_estimate,
                rec.units_per_capacity,
                rec.recommended_capacity,
                cost.over_capacity_cost,
                cost.under_capacity_cost
            );
        }

        self.append(&md)
    }

    fn append(&self, record: &str) -> Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(record.as_bytes())?;
        file.write_all(b"\n")?;
        info!(path = %self.path.display(), "appended result record");
        Ok(())
    }
}
