//! Stats command implementation

use crate::output::{styled_level, OutputWriter};
use anyhow::{Context, Result};
use suelo_core::models::RiskLevel;
use suelo_store::ReportStore;

pub async fn execute(store: &ReportStore, output: &OutputWriter) -> Result<()> {
    let stats = store.compute_stats().await.context("Failed to compute report statistics")?;

    if output.is_json() {
        output.result(&stats)?;
        return Ok(());
    }

    output.section("Reports");
    output.kv("Total", stats.total);
    output.kv("Advanced", stats.advanced_count);
    output.kv("Basic", stats.basic_count);
    output.kv("This month", stats.this_month_count);

    output.section("Risk levels (advanced reports)");
    for level in [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low] {
        output.kv(styled_level(level), stats.risk_level_counts.get(level));
    }

    Ok(())
}
