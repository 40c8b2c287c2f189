//! Reports command implementation

use crate::cli::{ReportsArgs, ReportsCommand};
use crate::errors;
use crate::output::{styled_level, OutputWriter};
use crate::output_types::{DeleteOutput, ReportRow, SyncAllOutput, SyncOutput};
use anyhow::{Context, Result};
use suelo_core::models::{Report, ReportBody, ReportId, ReportKind};
use suelo_store::ReportStore;

pub async fn execute(args: ReportsArgs, store: &ReportStore, output: &OutputWriter) -> Result<()> {
    match args.command {
        ReportsCommand::List { unsynced } => list(store, output, unsynced).await,
        ReportsCommand::Show { id } => show(store, output, id).await,
        ReportsCommand::Sync { id, kind } => sync(store, output, id, kind).await,
        ReportsCommand::SyncAll => sync_all(store, output).await,
        ReportsCommand::Delete { id, kind } => delete(store, output, id, kind).await,
        ReportsCommand::Clear { yes } => clear(store, output, yes).await,
    }
}

async fn list(store: &ReportStore, output: &OutputWriter, unsynced: bool) -> Result<()> {
    let reports = if unsynced {
        store.list_unsynced_reports().await
    } else {
        store.list_all_reports().await
    }
    .context("Failed to list reports")?;

    if output.is_json() {
        output.result(&reports)?;
        return Ok(());
    }

    let rows: Vec<ReportRow> = reports.iter().map(ReportRow::from).collect();
    output.table(rows);
    Ok(())
}

async fn show(store: &ReportStore, output: &OutputWriter, id: ReportId) -> Result<()> {
    let report = find(store, id).await?;

    if output.is_json() {
        output.result(&report)?;
        return Ok(());
    }

    output.section(format!("Report {}", report.id));
    output.kv("Type", report.kind());
    output.kv("Created", report.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    match report.synced_at {
        Some(at) => output.kv("Synced", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => output.kv("Synced", "no"),
    }

    let site = &report.site_data;
    output.section("Site");
    output.kv("Name", site.site_name.as_deref().unwrap_or("-"));
    output.kv("Location", site.location.as_deref().unwrap_or("-"));
    if let Some(coords) = site.coordinates {
        output.kv("Coordinates", coords);
    }
    output.kv("Inspection date", site.inspection_date.as_deref().unwrap_or("-"));
    output.kv("Inspector", site.inspector.as_deref().unwrap_or("-"));

    output.section("Result");
    let factors = match &report.body {
        ReportBody::Advanced { risk_result, .. } => {
            output.kv("Raw score", risk_result.raw_score);
            output.kv("Weighted score", risk_result.weighted_score);
            &risk_result.contributing_factors
        }
        ReportBody::Basic { risk_result, .. } => {
            output.kv("Score", risk_result.raw_score);
            &risk_result.contributing_factors
        }
    };
    output.kv("Risk level", styled_level(report.level()));
    for factor in factors {
        output.bullet(factor);
    }

    // Reports written by other tools may carry results we would not produce
    if !report.body.verify_result().unwrap_or(false) {
        println!();
        output.warning("Stored result does not match a fresh scoring of the observations");
    }

    Ok(())
}

async fn sync(
    store: &ReportStore,
    output: &OutputWriter,
    id: ReportId,
    kind: Option<ReportKind>,
) -> Result<()> {
    let kind = resolve_kind(store, id, kind).await?;

    let found = store.mark_synced(id, kind).await.context("Failed to mark report as synced")?;
    if !found {
        return Err(errors::report_not_found(id).into());
    }

    if output.is_json() {
        output.result(SyncOutput { id, kind, synced: true })?;
    } else {
        output.success(format!("Marked {} report {} as synced", kind, id));
    }
    Ok(())
}

async fn sync_all(store: &ReportStore, output: &OutputWriter) -> Result<()> {
    let marked = store.sync_all_pending().await.context("Failed to sync pending reports")?;

    if output.is_json() {
        output.result(SyncAllOutput { marked })?;
    } else if marked == 0 {
        output.info("No pending reports");
    } else {
        output.success(format!("Marked {} report(s) as synced", marked));
    }
    Ok(())
}

async fn delete(
    store: &ReportStore,
    output: &OutputWriter,
    id: ReportId,
    kind: Option<ReportKind>,
) -> Result<()> {
    let kind = resolve_kind(store, id, kind).await?;

    let deleted = store.delete_report(id, kind).await.context("Failed to delete report")?;
    if !deleted {
        return Err(errors::report_not_found(id).into());
    }

    if output.is_json() {
        output.result(DeleteOutput { id, kind, deleted })?;
    } else {
        output.success(format!("Deleted {} report {}", kind, id));
    }
    Ok(())
}

async fn clear(store: &ReportStore, output: &OutputWriter, yes: bool) -> Result<()> {
    if !yes {
        return Err(errors::clear_not_confirmed().into());
    }

    store.clear_all_reports().await.context("Failed to clear reports")?;
    output.success("Deleted all reports");
    Ok(())
}

async fn find(store: &ReportStore, id: ReportId) -> Result<Report> {
    store
        .get_report_by_id(id)
        .await
        .context("Failed to read reports")?
        .ok_or_else(|| errors::report_not_found(id).into())
}

/// Partition of a report, looked up by id when not given
async fn resolve_kind(
    store: &ReportStore,
    id: ReportId,
    kind: Option<ReportKind>,
) -> Result<ReportKind> {
    match kind {
        Some(kind) => Ok(kind),
        None => Ok(find(store, id).await?.kind()),
    }
}
