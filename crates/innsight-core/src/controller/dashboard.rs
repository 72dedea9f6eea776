// ── Dashboard controller ──
//
// KPI cards and chart series for one date range. Both halves load
// concurrently and keep their own result: a chart failure does not hide
// fresh KPIs, and vice versa.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::{LoadGeneration, LoadState};
use crate::metrics::{ChartSeriesSet, KpiSummary};
use crate::model::DateRange;
use crate::service::MetricsService;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardState {
    pub phase: LoadState,
    /// Range of the most recent load request.
    pub range: DateRange,
    pub metrics: Option<KpiSummary>,
    pub charts: Option<ChartSeriesSet>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Dashboard state machine. Cheaply cloneable.
#[derive(Clone)]
pub struct DashboardController {
    inner: Arc<Inner>,
}

struct Inner {
    service: MetricsService,
    state: watch::Sender<DashboardState>,
    generation: LoadGeneration,
}

impl DashboardController {
    pub fn new(service: MetricsService, range: DateRange) -> Self {
        let (state, _) = watch::channel(DashboardState {
            phase: LoadState::Idle,
            range,
            metrics: None,
            charts: None,
            is_loading: false,
            error: None,
        });
        Self {
            inner: Arc::new(Inner {
                service,
                state,
                generation: LoadGeneration::default(),
            }),
        }
    }

    /// Create and run the initial load for `range`.
    pub async fn mount(service: MetricsService, range: DateRange) -> Self {
        let controller = Self::new(service, range);
        controller.refetch().await;
        controller
    }

    pub fn state(&self) -> DashboardState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.inner.state.subscribe()
    }

    /// Load KPIs and charts for `range`, which becomes the range for
    /// later [`refetch`](Self::refetch) calls.
    pub async fn load(&self, range: DateRange) {
        let ticket = self.inner.generation.begin();
        self.inner.state.send_modify(|s| {
            s.phase = LoadState::Loading;
            s.range = range.clone();
            s.is_loading = true;
            s.error = None;
        });

        let (metrics, charts) = tokio::join!(
            self.inner.service.dashboard_metrics(&range),
            self.inner.service.chart_data(&range),
        );
        if !self.inner.generation.is_current(ticket) {
            warn!(ticket, "discarding stale dashboard load");
            return;
        }

        let mut errors = Vec::new();
        self.inner.state.send_modify(|s| {
            match metrics {
                Ok(m) => s.metrics = Some(m),
                Err(e) => errors.push(e.to_string()),
            }
            match charts {
                Ok(c) => s.charts = Some(c),
                Err(e) => errors.push(e.to_string()),
            }
            s.is_loading = false;
            if errors.is_empty() {
                s.phase = LoadState::Ready;
            } else {
                s.phase = LoadState::Failed;
                s.error = Some(errors.join("; "));
            }
        });
        debug!(failed = errors.len(), "dashboard loaded");
    }

    /// Reload with the most recently requested range.
    pub async fn refetch(&self) {
        let range = self.inner.state.borrow().range.clone();
        self.load(range).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{Clock, LatencyProfile};
    use crate::model::DatePreset;
    use crate::service::ServiceContext;
    use crate::store::{FixtureSet, FixtureStore};
    use crate::testing::assert_waited;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tokio::time::Instant;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 30).unwrap()
    }

    fn service_with(set: FixtureSet, latency: LatencyProfile) -> MetricsService {
        let store = Arc::new(FixtureStore::new(set));
        MetricsService::new(ServiceContext::new(store, latency, Clock::System))
    }

    #[tokio::test]
    async fn mount_loads_both_halves() {
        let svc = service_with(FixtureSet::embedded().unwrap(), LatencyProfile::INSTANT);
        let c = DashboardController::mount(svc, DateRange::from_preset(DatePreset::Week, today())).await;
        let state = c.state();
        assert_eq!(state.phase, LoadState::Ready);
        assert!(!state.is_loading);
        assert!(state.metrics.is_some());
        assert_eq!(state.charts.unwrap().seasonal.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn halves_load_concurrently() {
        let svc = service_with(FixtureSet::embedded().unwrap(), LatencyProfile::REALISTIC);
        let c = DashboardController::new(svc, DateRange::from_preset(DatePreset::Week, today()));
        let start = Instant::now();
        c.refetch().await;
        // The slower half (charts, 400ms) bounds the load.
        assert_waited(start, Duration::from_millis(400));
    }

    #[tokio::test]
    async fn metrics_failure_keeps_chart_result() {
        let mut set = FixtureSet::embedded().unwrap();
        set.daily_metrics.clear();
        let svc = service_with(set, LatencyProfile::INSTANT);
        let c = DashboardController::mount(svc, DateRange::from_preset(DatePreset::Today, today())).await;

        let state = c.state();
        assert_eq!(state.phase, LoadState::Failed);
        assert!(state.metrics.is_none());
        assert!(state.charts.is_some());
        assert!(
            state
                .error
                .unwrap()
                .starts_with("Failed to fetch dashboard metrics")
        );
    }

    #[tokio::test]
    async fn refetch_reuses_last_range() {
        let svc = service_with(FixtureSet::embedded().unwrap(), LatencyProfile::INSTANT);
        let c = DashboardController::new(svc, DateRange::from_preset(DatePreset::Week, today()));
        let month = DateRange::from_preset(DatePreset::ThisMonth, today());
        c.load(month.clone()).await;
        c.refetch().await;
        assert_eq!(c.state().range, month);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_dashboard_load_is_discarded() {
        let svc = service_with(FixtureSet::embedded().unwrap(), LatencyProfile::REALISTIC);
        let c = DashboardController::new(svc, DateRange::from_preset(DatePreset::Week, today()));
        let year = DateRange::from_preset(DatePreset::ThisYear, today());

        let first = tokio::spawn({
            let c = c.clone();
            async move { c.refetch().await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = tokio::spawn({
            let c = c.clone();
            let year = year.clone();
            async move { c.load(year).await }
        });

        first.await.unwrap();
        let mid = c.state();
        assert!(mid.is_loading);
        assert!(mid.metrics.is_none());

        second.await.unwrap();
        let done = c.state();
        assert!(!done.is_loading);
        assert_eq!(done.range, year);
        assert!(done.metrics.is_some());
    }
}
