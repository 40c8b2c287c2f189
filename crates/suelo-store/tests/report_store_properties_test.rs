//! Property tests for id issuing and listing order over create/delete runs

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use std::sync::Arc;
use suelo_core::models::{
    AdvancedInput, BasicInput, Coloration, LandUse, NearbyWaterBody, Odor, OdorDetected,
    ReportBody, ReportId, SiteData, SoilColor, VisibleResidue, WaterTableDepth,
};
use suelo_store::memory::{ManualClock, MemoryKeyValueStore};
use suelo_store::{ReportStore, Session};

#[derive(Debug, Clone)]
enum Step {
    /// Create a report after moving the clock forward by the given milliseconds
    Create { advanced: bool, advance_ms: u16 },
    /// Delete the n-th live report (modulo the live count)
    Delete { pick: usize },
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (any::<bool>(), prop_oneof![Just(0u16), 0u16..2000])
            .prop_map(|(advanced, advance_ms)| Step::Create { advanced, advance_ms }),
        1 => any::<usize>().prop_map(|pick| Step::Delete { pick }),
    ]
}

fn body(advanced: bool) -> ReportBody {
    if advanced {
        ReportBody::assess_advanced(AdvancedInput {
            odor: Some(Odor::Mild),
            coloration: Some(Coloration::Superficial),
            free_phase: Some(false),
            land_use: Some(LandUse::Conservation),
            water_table_depth: Some(WaterTableDepth::From5To10m),
            ..Default::default()
        })
        .unwrap()
    } else {
        ReportBody::assess_basic(BasicInput {
            odor: Some(OdorDetected::Yes),
            color: Some(SoilColor::DarkStained),
            residue: Some(VisibleResidue::InorganicTrash),
            water_body: Some(NearbyWaterBody::Over500m),
            affected_area_m2: Some(50.0),
            notes: None,
        })
        .unwrap()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_ids_increase_and_listing_stays_sorted(
        steps in prop::collection::vec(step_strategy(), 1..40)
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        runtime.block_on(async {
            let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
            let store = ReportStore::with_clock(
                Arc::new(MemoryKeyValueStore::new()),
                Session::anonymous(),
                Arc::new(clock.clone()),
            );

            let mut last_id: Option<ReportId> = None;
            let mut live = Vec::new();

            for step in steps {
                match step {
                    Step::Create { advanced, advance_ms } => {
                        clock.advance(Duration::milliseconds(i64::from(advance_ms)));
                        let report =
                            store.create_report(SiteData::default(), body(advanced)).await.unwrap();
                        if let Some(previous) = last_id {
                            prop_assert!(report.id > previous, "{:?} after {:?}", report.id, previous);
                        }
                        last_id = Some(report.id);
                        live.push((report.id, report.kind()));
                    }
                    Step::Delete { pick } => {
                        if live.is_empty() {
                            continue;
                        }
                        let (id, kind) = live.remove(pick % live.len());
                        prop_assert!(store.delete_report(id, kind).await.unwrap());
                    }
                }

                let listed = store.list_all_reports().await.unwrap();
                prop_assert_eq!(listed.len(), live.len());
                for pair in listed.windows(2) {
                    prop_assert!(pair[0].created_at >= pair[1].created_at);
                }
            }
            Ok(())
        })?;
    }
}
