// ── Analytics facade ──
//
// One entry point that owns the fixture store and vends services and
// controllers wired to it.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::config::ServiceConfig;
use crate::controller::{AlertController, DashboardController, NotificationSink, ReportController};
use crate::error::CoreError;
use crate::model::DateRange;
use crate::service::{AlertService, MetricsService, ReportService, ServiceContext};
use crate::store::{FixtureSet, FixtureStore};

/// Central facade over the mock data layer.
///
/// Cheaply cloneable; every clone shares one store, so a record created
/// through one handle is visible through all of them.
#[derive(Clone)]
pub struct Analytics {
    ctx: ServiceContext,
}

impl Analytics {
    /// Load fixtures from `config.fixtures` and build the services.
    pub fn new(config: ServiceConfig) -> Result<Self, CoreError> {
        let store = FixtureStore::load(&config.fixtures)?;
        info!(
            alerts = store.alert_count(),
            reports = store.report_count(),
            "analytics store ready"
        );
        Ok(Self::with_store(store, &config))
    }

    /// Build from an already-parsed fixture set. Ignores
    /// `config.fixtures`.
    pub fn from_fixtures(set: FixtureSet, config: &ServiceConfig) -> Self {
        Self::with_store(FixtureStore::new(set), config)
    }

    fn with_store(store: FixtureStore, config: &ServiceConfig) -> Self {
        Self {
            ctx: ServiceContext::new(Arc::new(store), config.latency, config.clock),
        }
    }

    // ── Services ─────────────────────────────────────────────────────

    pub fn alerts(&self) -> AlertService {
        AlertService::new(self.ctx.clone())
    }

    pub fn reports(&self) -> ReportService {
        ReportService::new(self.ctx.clone())
    }

    pub fn metrics(&self) -> MetricsService {
        MetricsService::new(self.ctx.clone())
    }

    pub fn store(&self) -> &Arc<FixtureStore> {
        &self.ctx.store
    }

    /// Today according to the configured clock.
    pub fn today(&self) -> NaiveDate {
        self.ctx.clock.today()
    }

    // ── Controllers ──────────────────────────────────────────────────

    pub fn alert_controller(&self, sink: Arc<dyn NotificationSink>) -> AlertController {
        AlertController::new(self.alerts(), sink)
    }

    pub fn report_controller(&self, sink: Arc<dyn NotificationSink>) -> ReportController {
        ReportController::new(self.reports(), sink)
    }

    pub fn dashboard_controller(&self, range: DateRange) -> DashboardController {
        DashboardController::new(self.metrics(), range)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{Clock, FixtureSource};
    use crate::controller::NullSink;
    use crate::model::{DatePreset, RecordId};
    use chrono::{DateTime, Utc};

    #[tokio::test]
    async fn clones_share_one_store() {
        let analytics = Analytics::new(ServiceConfig::instant()).unwrap();
        let other = analytics.clone();

        other.alerts().dismiss(RecordId::new(1)).await.unwrap();
        assert_eq!(analytics.alerts().get_all().await.unwrap().len(), 7);
        assert_eq!(analytics.store().alert_count(), 7);
    }

    #[tokio::test]
    async fn controllers_see_service_mutations() {
        let analytics = Analytics::new(ServiceConfig::instant()).unwrap();
        let controller = analytics.alert_controller(Arc::new(NullSink));
        analytics.alerts().dismiss(RecordId::new(5)).await.unwrap();

        controller.load().await;
        assert_eq!(controller.state().alerts.len(), 7);
    }

    #[test]
    fn missing_fixture_dir_fails_construction() {
        let config = ServiceConfig {
            fixtures: FixtureSource::Directory("/nonexistent/innsight".into()),
            ..ServiceConfig::instant()
        };
        assert!(matches!(
            Analytics::new(config),
            Err(CoreError::Fixture { .. })
        ));
    }

    #[tokio::test]
    async fn today_follows_the_clock() {
        let at = DateTime::parse_from_rfc3339("2024-03-30T23:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let config = ServiceConfig {
            clock: Clock::Fixed(at),
            ..ServiceConfig::instant()
        };
        let analytics = Analytics::new(config).unwrap();
        let range = DateRange::from_preset(DatePreset::Today, analytics.today());
        let dashboard = analytics.dashboard_controller(range.clone());
        dashboard.refetch().await;
        assert_eq!(dashboard.state().range, range);
    }
}
