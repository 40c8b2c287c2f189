//! Report lifecycle over the key-value port
//!
//! Each report kind lives in its own partition, stored as one JSON array.
//! Every mutation reads the whole partition, changes it in memory and writes
//! it back. Mutations through one `ReportStore` (and its clones) are
//! serialised by a shared lock so they cannot overwrite each other; separate
//! processes sharing the same files are not coordinated.
//!
//! A partition whose content cannot be parsed is logged and read as empty;
//! the next mutation of that partition replaces the unparseable content.
//! Failures of the key-value store itself are returned to the caller.

use chrono::{Datelike, Local, TimeZone};
use serde::Serialize;
use std::sync::Arc;
use suelo_core::error::{Result, SueloError};
use suelo_core::models::{Report, ReportBody, ReportId, ReportKind, RiskLevelCounts, SiteData};
use suelo_core::ports::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::ports::KeyValueStore;
use crate::session::Session;

/// Aggregate counts over a session's reports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportStats {
    pub total: usize,
    pub basic_count: usize,
    pub advanced_count: usize,
    pub this_month_count: usize,
    /// Advanced reports only
    pub risk_level_counts: RiskLevelCounts,
}

#[derive(Clone)]
pub struct ReportStore {
    kv: Arc<dyn KeyValueStore>,
    session: Session,
    clock: Arc<dyn Clock>,
    write_lock: Arc<Mutex<()>>,
}

impl ReportStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, session: Session) -> Self {
        Self::with_clock(kv, session, Arc::new(SystemClock))
    }

    pub fn with_clock(kv: Arc<dyn KeyValueStore>, session: Session, clock: Arc<dyn Clock>) -> Self {
        Self { kv, session, clock, write_lock: Arc::new(Mutex::new(())) }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    async fn read_partition(&self, kind: ReportKind) -> Result<Vec<Report>> {
        let key = self.session.partition_key(kind);
        let Some(content) = self.kv.get(&key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Report>>(&content) {
            Ok(reports) => {
                tracing::debug!(key = %key, count = reports.len(), "Read partition");
                Ok(reports)
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Corrupt partition, reading as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn write_partition(&self, kind: ReportKind, reports: &[Report]) -> Result<()> {
        let key = self.session.partition_key(kind);
        let content = serde_json::to_string(reports)?;
        self.kv.set(&key, &content).await
    }

    /// Next id: the current time in milliseconds, or one past the largest id
    /// already issued when the clock has not moved on
    fn next_id<'a>(
        &self,
        kind: ReportKind,
        existing: impl Iterator<Item = &'a Report>,
    ) -> Result<ReportId> {
        let now_ms = u64::try_from(self.clock.now().timestamp_millis()).unwrap_or(0);
        let after_existing = match existing.map(|r| r.id.0).max() {
            Some(largest) => largest.checked_add(1).ok_or_else(|| SueloError::Storage {
                key: self.session.partition_key(kind),
                reason: format!("no report id left after {}", largest),
            })?,
            None => 0,
        };
        Ok(ReportId(now_ms.max(after_existing)))
    }

    /// Persist a new, unsynced report built from already scored observations
    pub async fn create_report(&self, site_data: SiteData, body: ReportBody) -> Result<Report> {
        site_data.validate()?;

        let _guard = self.write_lock.lock().await;

        let kind = body.kind();
        let mut own = self.read_partition(kind).await?;
        let other = match kind {
            ReportKind::Basic => self.read_partition(ReportKind::Advanced).await?,
            ReportKind::Advanced => self.read_partition(ReportKind::Basic).await?,
        };

        let report = Report {
            id: self.next_id(kind, own.iter().chain(other.iter()))?,
            created_at: self.clock.now(),
            synced: false,
            synced_at: None,
            site_data,
            body,
        };

        own.push(report.clone());
        self.write_partition(kind, &own).await?;

        tracing::info!(id = %report.id, kind = %kind, level = %report.level(), "Created report");
        Ok(report)
    }

    /// All reports of the session, most recent first. Reports created at the
    /// same instant keep partition order (advanced before basic).
    pub async fn list_all_reports(&self) -> Result<Vec<Report>> {
        let mut all = Vec::new();
        for kind in ReportKind::ALL {
            all.extend(self.read_partition(kind).await?);
        }
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    pub async fn get_report_by_id(&self, id: ReportId) -> Result<Option<Report>> {
        Ok(self.list_all_reports().await?.into_iter().find(|r| r.id == id))
    }

    /// Reports not yet marked as synced, most recent first
    pub async fn list_unsynced_reports(&self) -> Result<Vec<Report>> {
        let mut reports = self.list_all_reports().await?;
        reports.retain(|r| !r.synced);
        Ok(reports)
    }

    /// Mark a report as synced. Returns `false` when the id is not in the
    /// partition of `kind`. Marking an already synced report succeeds and
    /// keeps its original `synced_at`.
    pub async fn mark_synced(&self, id: ReportId, kind: ReportKind) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let mut reports = self.read_partition(kind).await?;
        let Some(report) = reports.iter_mut().find(|r| r.id == id) else {
            tracing::debug!(id = %id, kind = %kind, "Report to sync not found");
            return Ok(false);
        };

        if report.mark_synced(self.clock.now()) {
            self.write_partition(kind, &reports).await?;
            tracing::info!(id = %id, kind = %kind, "Marked report as synced");
        }
        Ok(true)
    }

    /// Mark every unsynced report of the session; returns how many changed
    pub async fn sync_all_pending(&self) -> Result<usize> {
        let _guard = self.write_lock.lock().await;

        let now = self.clock.now();
        let mut marked = 0;
        for kind in ReportKind::ALL {
            let mut reports = self.read_partition(kind).await?;
            let changed =
                reports.iter_mut().map(|r| r.mark_synced(now)).filter(|&changed| changed).count();
            if changed > 0 {
                self.write_partition(kind, &reports).await?;
                marked += changed;
            }
        }

        tracing::info!(marked, "Synced pending reports");
        Ok(marked)
    }

    /// Delete a report. Returns `false`, without writing, when the id is not
    /// in the partition of `kind`.
    pub async fn delete_report(&self, id: ReportId, kind: ReportKind) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let mut reports = self.read_partition(kind).await?;
        let before = reports.len();
        reports.retain(|r| r.id != id);
        if reports.len() == before {
            return Ok(false);
        }

        self.write_partition(kind, &reports).await?;
        tracing::info!(id = %id, kind = %kind, "Deleted report");
        Ok(true)
    }

    /// Remove both partitions of the session
    pub async fn clear_all_reports(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        for kind in ReportKind::ALL {
            self.kv.remove(&self.session.partition_key(kind)).await?;
        }
        tracing::info!("Cleared all reports");
        Ok(())
    }

    /// Statistics with "this month" taken in the local time zone
    pub async fn compute_stats(&self) -> Result<ReportStats> {
        self.compute_stats_in(&Local).await
    }

    /// Statistics with "this month" taken in the given time zone
    pub async fn compute_stats_in<Tz: TimeZone + Sync>(&self, tz: &Tz) -> Result<ReportStats> {
        let advanced = self.read_partition(ReportKind::Advanced).await?;
        let basic = self.read_partition(ReportKind::Basic).await?;

        let now = self.clock.now().with_timezone(tz);
        let this_month_count = advanced
            .iter()
            .chain(basic.iter())
            .filter(|r| {
                let created = r.created_at.with_timezone(tz);
                created.year() == now.year() && created.month() == now.month()
            })
            .count();

        let mut risk_level_counts = RiskLevelCounts::default();
        for report in &advanced {
            risk_level_counts.record(report.level());
        }

        Ok(ReportStats {
            total: advanced.len() + basic.len(),
            basic_count: basic.len(),
            advanced_count: advanced.len(),
            this_month_count,
            risk_level_counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{ManualClock, MemoryKeyValueStore};
    use chrono::{Duration, Utc};
    use suelo_core::models::{BasicInput, NearbyWaterBody, OdorDetected, SoilColor, VisibleResidue};

    fn basic_body() -> ReportBody {
        ReportBody::assess_basic(BasicInput {
            odor: Some(OdorDetected::Yes),
            color: Some(SoilColor::DarkStained),
            residue: Some(VisibleResidue::None),
            water_body: Some(NearbyWaterBody::No),
            affected_area_m2: Some(20.0),
            notes: None,
        })
        .unwrap()
    }

    fn store_at_fixed_time() -> (ReportStore, MemoryKeyValueStore, ManualClock) {
        let kv = MemoryKeyValueStore::new();
        let clock = ManualClock::new(Utc::now());
        let store =
            ReportStore::with_clock(Arc::new(kv.clone()), Session::anonymous(), Arc::new(clock.clone()));
        (store, kv, clock)
    }

    #[tokio::test]
    async fn test_rapid_creates_get_distinct_increasing_ids() {
        let (store, _, _) = store_at_fixed_time();

        let mut ids = Vec::new();
        for _ in 0..20 {
            ids.push(store.create_report(SiteData::default(), basic_body()).await.unwrap().id);
        }

        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1], "ids not increasing: {:?}", pair);
        }
    }

    #[tokio::test]
    async fn test_create_writes_unsynced_report() {
        let (store, kv, _) = store_at_fixed_time();

        let report = store.create_report(SiteData::default(), basic_body()).await.unwrap();
        assert!(!report.synced);
        assert!(report.synced_at.is_none());

        let raw = kv.get("basicReports").await.unwrap().unwrap();
        let stored: Vec<Report> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, vec![report]);
        assert_eq!(kv.get("advancedReports").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_partition_reads_as_empty() {
        let (store, kv, _) = store_at_fixed_time();
        kv.set("basicReports", "{not json").await.unwrap();

        assert!(store.list_all_reports().await.unwrap().is_empty());
        assert_eq!(store.compute_stats().await.unwrap(), ReportStats::default());
    }

    #[tokio::test]
    async fn test_sync_keeps_first_timestamp() {
        let (store, _, clock) = store_at_fixed_time();
        let report = store.create_report(SiteData::default(), basic_body()).await.unwrap();

        clock.advance(Duration::minutes(5));
        assert!(store.mark_synced(report.id, ReportKind::Basic).await.unwrap());
        let first = store.get_report_by_id(report.id).await.unwrap().unwrap().synced_at;
        assert_eq!(first, Some(clock.now()));

        clock.advance(Duration::hours(1));
        assert!(store.mark_synced(report.id, ReportKind::Basic).await.unwrap());
        let second = store.get_report_by_id(report.id).await.unwrap().unwrap().synced_at;
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_create_after_largest_possible_id_fails() {
        let (store, kv, _) = store_at_fixed_time();
        let mut stored = store.create_report(SiteData::default(), basic_body()).await.unwrap();
        stored.id = ReportId(u64::MAX);
        kv.set("basicReports", &serde_json::to_string(&vec![stored]).unwrap()).await.unwrap();

        let err = store.create_report(SiteData::default(), basic_body()).await.unwrap_err();
        assert!(matches!(err, SueloError::Storage { ref key, .. } if key == "basicReports"));
        assert_eq!(store.list_all_reports().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_partition_replaced_on_next_write() {
        let (store, kv, _) = store_at_fixed_time();
        kv.set("basicReports", "{not json").await.unwrap();

        let report = store.create_report(SiteData::default(), basic_body()).await.unwrap();

        let raw = kv.get("basicReports").await.unwrap().unwrap();
        let stored: Vec<Report> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, vec![report]);
    }

    #[tokio::test]
    async fn test_sync_wrong_partition_is_not_found() {
        let (store, _, _) = store_at_fixed_time();
        let report = store.create_report(SiteData::default(), basic_body()).await.unwrap();

        assert!(!store.mark_synced(report.id, ReportKind::Advanced).await.unwrap());
        assert!(!store.delete_report(report.id, ReportKind::Advanced).await.unwrap());
        assert_eq!(store.list_all_reports().await.unwrap().len(), 1);
    }
}
