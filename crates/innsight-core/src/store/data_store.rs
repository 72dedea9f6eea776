// ── In-memory fixture store ──
//
// The single owner of all seed records for one process. Alerts and reports
// are mutable collections; daily metrics and room-type revenue are
// read-only reference data.

use std::sync::Arc;

use super::collection::EntityCollection;
use super::fixtures::FixtureSet;
use crate::config::FixtureSource;
use crate::error::CoreError;
use crate::model::{Alert, DailyMetric, Report, RoomTypeRevenue};

/// Shared state behind every service. Create one per process (or per test)
/// and hand out `Arc` clones.
pub struct FixtureStore {
    pub(crate) alerts: EntityCollection<Alert>,
    pub(crate) reports: EntityCollection<Report>,
    daily_metrics: Arc<[DailyMetric]>,
    room_type_revenue: Arc<[RoomTypeRevenue]>,
}

impl FixtureStore {
    pub fn new(set: FixtureSet) -> Self {
        Self {
            alerts: EntityCollection::from_records(set.alerts),
            reports: EntityCollection::from_records(set.reports),
            daily_metrics: set.daily_metrics.into(),
            room_type_revenue: set.room_type_revenue.into(),
        }
    }

    pub fn load(source: &FixtureSource) -> Result<Self, CoreError> {
        let set = FixtureSet::load(source)?;
        tracing::debug!(
            alerts = set.alerts.len(),
            reports = set.reports.len(),
            daily_metrics = set.daily_metrics.len(),
            room_types = set.room_type_revenue.len(),
            "fixture store seeded"
        );
        Ok(Self::new(set))
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    /// Alerts in store order (newest insertions first).
    pub fn alerts_snapshot(&self) -> Result<Vec<Arc<Alert>>, CoreError> {
        self.alerts.snapshot()
    }

    pub fn reports_snapshot(&self) -> Result<Vec<Arc<Report>>, CoreError> {
        self.reports.snapshot()
    }

    /// Daily metrics, newest first.
    pub fn daily_metrics(&self) -> Arc<[DailyMetric]> {
        Arc::clone(&self.daily_metrics)
    }

    pub fn room_type_revenue(&self) -> Arc<[RoomTypeRevenue]> {
        Arc::clone(&self.room_type_revenue)
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn alert_count(&self) -> usize {
        self.alerts.len()
    }

    pub fn report_count(&self) -> usize {
        self.reports.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::RecordId;

    fn store() -> FixtureStore {
        FixtureStore::load(&FixtureSource::Embedded).unwrap()
    }

    #[test]
    fn seeds_every_collection() {
        let s = store();
        assert_eq!(s.alert_count(), 8);
        assert_eq!(s.report_count(), 4);
        assert_eq!(s.daily_metrics().len(), 30);
        assert_eq!(s.room_type_revenue().len(), 5);
    }

    #[test]
    fn alert_snapshot_reflects_removals() {
        let s = store();
        s.alerts.remove(RecordId::new(3)).unwrap();

        let snap = s.alerts_snapshot().unwrap();
        assert_eq!(snap.len(), 7);
        assert!(snap.iter().all(|a| a.id != RecordId::new(3)));
        assert_eq!(s.alert_count(), 7);
    }

    #[test]
    fn report_snapshot_keeps_fixture_order() {
        let ids: Vec<u32> = store()
            .reports_snapshot()
            .unwrap()
            .iter()
            .map(|r| r.id.get())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
