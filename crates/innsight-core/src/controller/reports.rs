// ── Report state controller ──

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::notify::{Notification, NotificationSink, Operation};
use super::{LoadGeneration, LoadState};
use crate::error::{CoreError, Resource, Verb};
use crate::model::{RecordId, Report, ReportConfig, ReportType};
use crate::service::ReportService;

const LOAD: Operation = Operation::new(Resource::Reports, Verb::GetAll);
const GENERATE: Operation = Operation::new(Resource::Reports, Verb::Generate);
const DELETE: Operation = Operation::new(Resource::Reports, Verb::Delete);

/// Which half of the reports page is showing. Pure UI state.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportView {
    #[default]
    Generate,
    History,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportsState {
    pub phase: LoadState,
    /// Report history, newest first.
    pub reports: Vec<Report>,
    pub is_loading: bool,
    /// Set while at least one `generate` call is in flight.
    pub is_generating: bool,
    pub error: Option<String>,
    pub view: ReportView,
    #[serde(skip)]
    generating: usize,
}

impl ReportsState {
    fn start_generating(&mut self) {
        self.generating += 1;
        self.is_generating = true;
    }

    fn finish_generating(&mut self) {
        self.generating = self.generating.saturating_sub(1);
        self.is_generating = self.generating > 0;
    }
}

/// Report history and generation state machine. Cheaply cloneable.
#[derive(Clone)]
pub struct ReportController {
    inner: Arc<Inner>,
}

struct Inner {
    service: ReportService,
    sink: Arc<dyn NotificationSink>,
    state: watch::Sender<ReportsState>,
    generation: LoadGeneration,
}

impl ReportController {
    pub fn new(service: ReportService, sink: Arc<dyn NotificationSink>) -> Self {
        let (state, _) = watch::channel(ReportsState::default());
        Self {
            inner: Arc::new(Inner {
                service,
                sink,
                state,
                generation: LoadGeneration::default(),
            }),
        }
    }

    /// Create and run the initial load.
    pub async fn mount(service: ReportService, sink: Arc<dyn NotificationSink>) -> Self {
        let controller = Self::new(service, sink);
        controller.load().await;
        controller
    }

    pub fn state(&self) -> ReportsState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ReportsState> {
        self.inner.state.subscribe()
    }

    /// The report types the builder offers, in display order.
    pub fn catalog() -> &'static [ReportType] {
        &ReportType::ALL
    }

    pub fn set_view(&self, view: ReportView) {
        self.inner.state.send_modify(|s| s.view = view);
    }

    pub async fn load(&self) {
        let ticket = self.inner.generation.begin();
        self.inner.state.send_modify(|s| {
            s.phase = LoadState::Loading;
            s.is_loading = true;
            s.error = None;
        });

        let result = self.inner.service.get_all().await;
        if !self.inner.generation.is_current(ticket) {
            warn!(ticket, "discarding stale report load");
            return;
        }

        match result {
            Ok(reports) => {
                debug!(count = reports.len(), "reports loaded");
                self.inner.state.send_modify(|s| {
                    s.reports = reports;
                    s.phase = LoadState::Ready;
                    s.is_loading = false;
                });
            }
            Err(e) => {
                self.inner.state.send_modify(|s| {
                    s.error = Some(e.to_string());
                    s.phase = LoadState::Failed;
                    s.is_loading = false;
                });
                self.inner
                    .sink
                    .notify(Notification::error(LOAD, "Failed to load reports"));
            }
        }
    }

    pub async fn refetch(&self) {
        self.load().await;
    }

    /// Validate the builder selection and generate a report.
    ///
    /// A missing type or date range fails locally without calling the
    /// service. `is_generating` stays set until every overlapping call
    /// has finished.
    pub async fn generate(&self, config: ReportConfig) -> Result<Report, CoreError> {
        let request = match config.into_request() {
            Ok(request) => request,
            Err(e) => {
                self.inner
                    .sink
                    .notify(Notification::error(GENERATE, validation_message(&e)));
                return Err(e);
            }
        };

        self.inner.sink.notify(Notification::info(
            GENERATE,
            format!("{} generation started", request.report_type.catalog_title()),
        ));
        self.inner.state.send_modify(ReportsState::start_generating);
        let result = self.inner.service.generate(request).await;

        match result {
            Ok(report) => {
                self.inner.state.send_modify(|s| {
                    s.reports.insert(0, report.clone());
                    s.finish_generating();
                });
                self.inner.sink.notify(Notification::success(
                    GENERATE,
                    "Report generated successfully",
                ));
                Ok(report)
            }
            Err(e) => {
                self.inner.state.send_modify(ReportsState::finish_generating);
                self.inner
                    .sink
                    .notify(Notification::error(GENERATE, "Failed to generate report"));
                Err(e)
            }
        }
    }

    /// Delete a report. Local state changes only after the service
    /// confirms.
    pub async fn delete(&self, id: RecordId) -> Result<Report, CoreError> {
        match self.inner.service.delete(id).await {
            Ok(removed) => {
                self.inner
                    .state
                    .send_modify(|s| s.reports.retain(|r| r.id != id));
                self.inner
                    .sink
                    .notify(Notification::success(DELETE, "Report deleted"));
                Ok(removed)
            }
            Err(e) => {
                self.inner
                    .sink
                    .notify(Notification::error(DELETE, "Failed to delete report"));
                Err(e)
            }
        }
    }
}

fn validation_message(err: &CoreError) -> String {
    match err {
        CoreError::ValidationFailed { field, .. } if field == "type" => {
            "Please select a report type".into()
        }
        CoreError::ValidationFailed { field, .. } if field == "dateRange" => {
            "Please select a date range".into()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{Clock, LatencyProfile};
    use crate::controller::notify::{ChannelSink, NotificationLevel};
    use crate::model::{DatePreset, DateRange, ReportFormat, ReportStatus};
    use crate::service::ServiceContext;
    use crate::store::{FixtureSet, FixtureStore};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;
    use tokio::time::Instant;

    struct Harness {
        controller: ReportController,
        store: Arc<FixtureStore>,
        rx: UnboundedReceiver<Notification>,
    }

    fn harness_with(set: FixtureSet, latency: LatencyProfile) -> Harness {
        let store = Arc::new(FixtureStore::new(set));
        let service = ReportService::new(ServiceContext::new(
            Arc::clone(&store),
            latency,
            Clock::System,
        ));
        let (sink, rx) = ChannelSink::new();
        Harness {
            controller: ReportController::new(service, Arc::new(sink)),
            store,
            rx,
        }
    }

    fn harness() -> Harness {
        harness_with(FixtureSet::embedded().unwrap(), LatencyProfile::INSTANT)
    }

    fn last_week() -> DateRange {
        DateRange::from_preset(DatePreset::Week, NaiveDate::from_ymd_opt(2024, 3, 30).unwrap())
    }

    fn revenue_config() -> ReportConfig {
        ReportConfig {
            report_type: Some(ReportType::Revenue),
            date_range: Some(last_week()),
            format: ReportFormat::Csv,
        }
    }

    fn drain(rx: &mut UnboundedReceiver<Notification>) -> Vec<Notification> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    #[tokio::test]
    async fn defaults_to_generate_view() {
        let h = harness();
        assert_eq!(h.controller.state().view, ReportView::Generate);
        h.controller.set_view(ReportView::History);
        assert_eq!(h.controller.state().view, ReportView::History);
        assert_eq!(ReportController::catalog().len(), 4);
    }

    #[tokio::test]
    async fn generate_prepends_completed_report() {
        let mut h = harness();
        h.controller.load().await;

        let report = h.controller.generate(revenue_config()).await.unwrap();
        assert_eq!(report.id, RecordId::new(5));
        assert_eq!(report.status, ReportStatus::Completed);
        assert!(report.data.contains_key("totalRevenue"));

        let state = h.controller.state();
        assert_eq!(state.reports[0].id, report.id);
        assert!(!state.is_generating);

        let messages: Vec<String> = drain(&mut h.rx).into_iter().map(|n| n.message).collect();
        assert_eq!(
            messages,
            vec![
                "Revenue Summary generation started".to_owned(),
                "Report generated successfully".to_owned(),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn missing_type_never_reaches_service() {
        let mut h = harness_with(FixtureSet::embedded().unwrap(), LatencyProfile::REALISTIC);
        let start = Instant::now();

        let err = h
            .controller
            .generate(ReportConfig {
                report_type: None,
                date_range: None,
                format: ReportFormat::Pdf,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::ValidationFailed { ref field, .. } if field == "type"));
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(h.store.report_count(), 4);
        assert!(!h.controller.state().is_generating);

        let n = h.rx.try_recv().unwrap();
        assert_eq!(n.level, NotificationLevel::Error);
        assert_eq!(n.message, "Please select a report type");
    }

    #[tokio::test]
    async fn missing_range_is_reported_second() {
        let mut h = harness();
        let err = h
            .controller
            .generate(ReportConfig {
                date_range: None,
                ..revenue_config()
            })
            .await
            .unwrap_err();
        assert!(
            matches!(err, CoreError::ValidationFailed { ref field, .. } if field == "dateRange")
        );
        assert_eq!(h.rx.try_recv().unwrap().message, "Please select a date range");
    }

    #[tokio::test(start_paused = true)]
    async fn generating_flag_spans_the_call() {
        let h = harness_with(FixtureSet::embedded().unwrap(), LatencyProfile::REALISTIC);
        let task = tokio::spawn({
            let c = h.controller.clone();
            async move { c.generate(revenue_config()).await }
        });

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(h.controller.state().is_generating);

        task.await.unwrap().unwrap();
        assert!(!h.controller.state().is_generating);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_generations_keep_flag_until_last_finishes() {
        let h = harness_with(FixtureSet::embedded().unwrap(), LatencyProfile::REALISTIC);
        let spawn_generate = |c: ReportController| {
            tokio::spawn(async move { c.generate(revenue_config()).await })
        };

        let first = spawn_generate(h.controller.clone());
        tokio::time::sleep(Duration::from_millis(500)).await;
        let second = spawn_generate(h.controller.clone());

        first.await.unwrap().unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(h.controller.state().is_generating);

        second.await.unwrap().unwrap();
        let state = h.controller.state();
        assert!(!state.is_generating);
        assert_eq!(state.reports.len(), 2);
    }

    #[tokio::test]
    async fn failed_generation_clears_flag_and_keeps_list() {
        let mut set = FixtureSet::embedded().unwrap();
        set.reports[0].id = RecordId::new(u32::MAX);
        let mut h = harness_with(set, LatencyProfile::INSTANT);
        h.controller.load().await;
        let before = h.controller.state().reports;

        let err = h.controller.generate(revenue_config()).await.unwrap_err();
        assert!(matches!(err, CoreError::OperationFailed { .. }));

        let state = h.controller.state();
        assert!(!state.is_generating);
        assert_eq!(state.reports, before);
        let last = drain(&mut h.rx).pop().unwrap();
        assert_eq!(last.message, "Failed to generate report");
    }

    #[tokio::test]
    async fn delete_removes_after_success() {
        let mut h = harness();
        h.controller.load().await;

        h.controller.delete(RecordId::new(3)).await.unwrap();
        let ids: Vec<u32> = h.controller.state().reports.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![4, 2, 1]);
        assert_eq!(h.rx.try_recv().unwrap().message, "Report deleted");
    }

    #[tokio::test]
    async fn failed_delete_leaves_state_unchanged() {
        let mut h = harness();
        h.controller.load().await;
        let before = h.controller.state();

        assert!(h.controller.delete(RecordId::new(77)).await.is_err());
        assert_eq!(h.controller.state(), before);
        assert_eq!(h.rx.try_recv().unwrap().message, "Failed to delete report");
    }
}
