// ── Alert state controller ──
//
// Loaded alert collection plus the list page's filter and sort selection.
// Filtering and sorting never touch the loaded collection; `visible()`
// derives a fresh list on every read.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::notify::{Notification, NotificationSink, Operation};
use super::{LoadGeneration, LoadState};
use crate::error::{CoreError, Resource, Verb};
use crate::model::{Alert, NewAlert, RecordId, Severity};
use crate::service::AlertService;

const LOAD: Operation = Operation::new(Resource::Alerts, Verb::GetAll);
const DISMISS: Operation = Operation::new(Resource::Alerts, Verb::Delete);
const CREATE: Operation = Operation::new(Resource::Alerts, Verb::Create);

// ── Filter / sort ───────────────────────────────────────────────────

/// Severity filter for the alert list.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AlertFilter {
    #[default]
    All,
    Critical,
    Warning,
    Info,
}

impl AlertFilter {
    pub const ALL: [Self; 4] = [Self::All, Self::Critical, Self::Warning, Self::Info];

    pub const fn severity(self) -> Option<Severity> {
        match self {
            Self::All => None,
            Self::Critical => Some(Severity::Critical),
            Self::Warning => Some(Severity::Warning),
            Self::Info => Some(Severity::Info),
        }
    }

    pub fn matches(self, alert: &Alert) -> bool {
        self.severity().is_none_or(|s| alert.severity == s)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Alerts",
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

/// Ordering for the alert list.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AlertSort {
    #[default]
    Newest,
    Oldest,
    Severity,
}

impl AlertSort {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest First",
            Self::Oldest => "Oldest First",
            Self::Severity => "By Severity",
        }
    }
}

/// Filter then stable-sort a copy of `alerts`.
pub fn visible_alerts(alerts: &[Alert], filter: AlertFilter, sort: AlertSort) -> Vec<Alert> {
    let mut out: Vec<Alert> = alerts.iter().filter(|a| filter.matches(a)).cloned().collect();
    match sort {
        AlertSort::Newest => out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        AlertSort::Oldest => out.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
        AlertSort::Severity => out.sort_by(|a, b| b.severity.rank().cmp(&a.severity.rank())),
    }
    out
}

/// Per-filter totals for the summary cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertCounts {
    pub all: usize,
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
}

impl AlertCounts {
    pub fn tally(alerts: &[Alert]) -> Self {
        alerts.iter().fold(
            Self {
                all: alerts.len(),
                ..Self::default()
            },
            |mut acc, a| {
                match a.severity {
                    Severity::Critical => acc.critical += 1,
                    Severity::Warning => acc.warning += 1,
                    Severity::Info => acc.info += 1,
                }
                acc
            },
        )
    }

    pub const fn get(&self, filter: AlertFilter) -> usize {
        match filter {
            AlertFilter::All => self.all,
            AlertFilter::Critical => self.critical,
            AlertFilter::Warning => self.warning,
            AlertFilter::Info => self.info,
        }
    }
}

/// Copy for an empty alert list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: String,
    pub description: String,
    pub icon: &'static str,
}

impl EmptyState {
    pub fn for_filter(filter: AlertFilter) -> Self {
        let (title, description) = match filter {
            AlertFilter::All => (
                "No alerts".to_owned(),
                "Your hotel is running smoothly with no active alerts.".to_owned(),
            ),
            other => (
                format!("No {other} alerts"),
                format!("No {other} alerts are currently active."),
            ),
        };
        Self {
            title,
            description,
            icon: "CheckCircle",
        }
    }
}

// ── State ───────────────────────────────────────────────────────────

/// Everything a presenter needs to draw the alert page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlertsState {
    pub phase: LoadState,
    /// Loaded collection in service order (newest first).
    pub alerts: Vec<Alert>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub filter: AlertFilter,
    pub sort: AlertSort,
}

// ── Controller ──────────────────────────────────────────────────────

/// Alert list state machine. Cheaply cloneable via `Arc<Inner>`.
#[derive(Clone)]
pub struct AlertController {
    inner: Arc<Inner>,
}

struct Inner {
    service: AlertService,
    sink: Arc<dyn NotificationSink>,
    state: watch::Sender<AlertsState>,
    generation: LoadGeneration,
}

impl AlertController {
    /// Create an idle controller. Call [`load`](Self::load) or use
    /// [`mount`](Self::mount) to fetch.
    pub fn new(service: AlertService, sink: Arc<dyn NotificationSink>) -> Self {
        let (state, _) = watch::channel(AlertsState::default());
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
    pub async fn mount(service: AlertService, sink: Arc<dyn NotificationSink>) -> Self {
        let controller = Self::new(service, sink);
        controller.load().await;
        controller
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn state(&self) -> AlertsState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AlertsState> {
        self.inner.state.subscribe()
    }

    /// Filtered and sorted view of the loaded alerts.
    pub fn visible(&self) -> Vec<Alert> {
        let state = self.inner.state.borrow();
        visible_alerts(&state.alerts, state.filter, state.sort)
    }

    pub fn counts(&self) -> AlertCounts {
        AlertCounts::tally(&self.inner.state.borrow().alerts)
    }

    /// Empty-state copy for the current filter.
    pub fn empty_message(&self) -> EmptyState {
        EmptyState::for_filter(self.inner.state.borrow().filter)
    }

    // ── UI selection ─────────────────────────────────────────────────

    pub fn set_filter(&self, filter: AlertFilter) {
        self.inner.state.send_modify(|s| s.filter = filter);
    }

    pub fn set_sort(&self, sort: AlertSort) {
        self.inner.state.send_modify(|s| s.sort = sort);
    }

    // ── Verbs ────────────────────────────────────────────────────────

    /// Fetch the full collection. Failures land in `error` and raise a
    /// notification; a load overtaken by a newer one is discarded.
    pub async fn load(&self) {
        let ticket = self.inner.generation.begin();
        self.inner.state.send_modify(|s| {
            s.phase = LoadState::Loading;
            s.is_loading = true;
            s.error = None;
        });

        let result = self.inner.service.get_all().await;
        if !self.inner.generation.is_current(ticket) {
            warn!(ticket, "discarding stale alert load");
            return;
        }

        match result {
            Ok(alerts) => {
                debug!(count = alerts.len(), "alerts loaded");
                self.inner.state.send_modify(|s| {
                    s.alerts = alerts;
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
                    .notify(Notification::error(LOAD, "Failed to load alerts"));
            }
        }
    }

    /// Explicit full reload.
    pub async fn refetch(&self) {
        self.load().await;
    }

    /// Dismiss an alert. Local state changes only after the service
    /// confirms; a failure leaves the list untouched.
    pub async fn dismiss(&self, id: RecordId) -> Result<Alert, CoreError> {
        match self.inner.service.dismiss(id).await {
            Ok(removed) => {
                self.inner
                    .state
                    .send_modify(|s| s.alerts.retain(|a| a.id != id));
                self.inner
                    .sink
                    .notify(Notification::success(DISMISS, "Alert dismissed"));
                Ok(removed)
            }
            Err(e) => {
                self.inner
                    .sink
                    .notify(Notification::error(DISMISS, "Failed to dismiss alert"));
                Err(e)
            }
        }
    }

    /// Create an alert and prepend it to the loaded list.
    pub async fn create(&self, new: NewAlert) -> Result<Alert, CoreError> {
        match self.inner.service.create(new).await {
            Ok(alert) => {
                self.inner
                    .state
                    .send_modify(|s| s.alerts.insert(0, alert.clone()));
                self.inner
                    .sink
                    .notify(Notification::success(CREATE, "Alert created"));
                Ok(alert)
            }
            Err(e) => {
                self.inner
                    .sink
                    .notify(Notification::error(CREATE, "Failed to create alert"));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{Clock, LatencyProfile};
    use crate::controller::notify::{ChannelSink, NotificationLevel};
    use crate::model::AlertType;
    use crate::service::ServiceContext;
    use crate::store::{FixtureSet, FixtureStore};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn controller_with(
        set: FixtureSet,
        latency: LatencyProfile,
    ) -> (AlertController, UnboundedReceiver<Notification>) {
        let store = Arc::new(FixtureStore::new(set));
        let service = AlertService::new(ServiceContext::new(store, latency, Clock::System));
        let (sink, rx) = ChannelSink::new();
        (AlertController::new(service, Arc::new(sink)), rx)
    }

    fn controller() -> (AlertController, UnboundedReceiver<Notification>) {
        controller_with(FixtureSet::embedded().unwrap(), LatencyProfile::INSTANT)
    }

    fn ids(alerts: &[Alert]) -> Vec<u32> {
        alerts.iter().map(|a| a.id.get()).collect()
    }

    fn alert(id: u32, severity: Severity, hour: u32) -> Alert {
        Alert {
            id: RecordId::new(id),
            alert_type: AlertType::Occupancy,
            severity,
            metric: "Occupancy Rate".into(),
            current_value: 60.0,
            threshold: 70.0,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn new_controller_is_idle() {
        let (c, _rx) = controller();
        let state = c.state();
        assert_eq!(state.phase, LoadState::Idle);
        assert!(!state.is_loading);
        assert!(state.alerts.is_empty());
    }

    #[tokio::test]
    async fn load_reaches_ready() {
        let (c, mut rx) = controller();
        c.load().await;
        let state = c.state();
        assert_eq!(state.phase, LoadState::Ready);
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
        assert_eq!(state.alerts.len(), 8);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn loading_flag_is_observable() {
        let (c, _rx) = controller_with(FixtureSet::embedded().unwrap(), LatencyProfile::REALISTIC);
        let mut rx = c.subscribe();
        let task = tokio::spawn({
            let c = c.clone();
            async move { c.load().await }
        });

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_loading);
        task.await.unwrap();
        assert!(!c.state().is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_load_is_discarded() {
        let (c, _rx) = controller_with(FixtureSet::embedded().unwrap(), LatencyProfile::REALISTIC);

        // First load resolves at 250ms, second (started at 100ms) at 350ms.
        let first = tokio::spawn({
            let c = c.clone();
            async move { c.load().await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = tokio::spawn({
            let c = c.clone();
            async move { c.load().await }
        });

        tokio::time::sleep(Duration::from_millis(200)).await;
        first.await.unwrap();
        let mid = c.state();
        assert!(mid.is_loading);
        assert_eq!(mid.phase, LoadState::Loading);
        assert!(mid.alerts.is_empty());

        second.await.unwrap();
        let done = c.state();
        assert!(!done.is_loading);
        assert_eq!(done.alerts.len(), 8);
    }

    #[tokio::test]
    async fn dismiss_removes_after_success() {
        let (c, mut rx) = controller();
        c.load().await;

        let removed = c.dismiss(RecordId::new(2)).await.unwrap();
        assert_eq!(removed.id, RecordId::new(2));
        assert!(c.state().alerts.iter().all(|a| a.id != RecordId::new(2)));

        let n = rx.try_recv().unwrap();
        assert_eq!(n.level, NotificationLevel::Success);
        assert_eq!(n.message, "Alert dismissed");
    }

    #[tokio::test]
    async fn failed_dismiss_leaves_state_unchanged() {
        let (c, mut rx) = controller();
        c.load().await;
        let before = c.state();

        let err = c.dismiss(RecordId::new(42)).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(c.state(), before);

        let n = rx.try_recv().unwrap();
        assert_eq!(n.level, NotificationLevel::Error);
        assert_eq!(n.message, "Failed to dismiss alert");
    }

    #[tokio::test]
    async fn create_prepends_and_notifies() {
        let (c, mut rx) = controller();
        c.load().await;

        let created = c
            .create(NewAlert {
                alert_type: AlertType::Maintenance,
                severity: Severity::Info,
                metric: "Ice Machine 2".into(),
                current_value: 0.0,
                threshold: 0.0,
            })
            .await
            .unwrap();
        assert_eq!(created.id, RecordId::new(9));
        assert_eq!(c.state().alerts[0].id, created.id);
        assert_eq!(rx.try_recv().unwrap().message, "Alert created");
    }

    #[tokio::test]
    async fn failed_create_notifies_and_returns_error() {
        let mut set = FixtureSet::embedded().unwrap();
        set.alerts[0].id = RecordId::new(u32::MAX);
        let (c, mut rx) = controller_with(set, LatencyProfile::INSTANT);
        c.load().await;

        let err = c
            .create(NewAlert {
                alert_type: AlertType::Revenue,
                severity: Severity::Critical,
                metric: "Daily Revenue".into(),
                current_value: 1.0,
                threshold: 2.0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::OperationFailed { .. }));
        assert_eq!(c.state().alerts.len(), 8);
        assert_eq!(rx.try_recv().unwrap().message, "Failed to create alert");
    }

    #[tokio::test]
    async fn critical_filter_is_strict_subset_then_all_restores() {
        let (c, _rx) = controller();
        c.load().await;
        let everything = c.visible();

        c.set_filter(AlertFilter::Critical);
        let critical = c.visible();
        assert!(critical.len() < everything.len());
        assert!(critical.iter().all(|a| a.severity == Severity::Critical));

        c.set_filter(AlertFilter::All);
        let ids = |alerts: &[Alert]| alerts.iter().map(|a| a.id).collect::<Vec<_>>();
        assert_eq!(ids(&c.visible()), ids(&everything));
        // The loaded collection itself was never filtered.
        assert_eq!(c.state().alerts.len(), 8);
    }

    #[test]
    fn severity_sort_is_stable() {
        let alerts = vec![
            alert(1, Severity::Info, 9),
            alert(2, Severity::Critical, 8),
            alert(3, Severity::Info, 7),
            alert(4, Severity::Critical, 6),
            alert(5, Severity::Warning, 5),
        ];
        let sorted = visible_alerts(&alerts, AlertFilter::All, AlertSort::Severity);
        assert_eq!(ids(&sorted), vec![2, 4, 5, 1, 3]);
    }

    #[test]
    fn oldest_and_newest_are_mirror_images() {
        let alerts = vec![
            alert(1, Severity::Info, 12),
            alert(2, Severity::Warning, 6),
            alert(3, Severity::Critical, 9),
        ];
        assert_eq!(
            ids(&visible_alerts(&alerts, AlertFilter::All, AlertSort::Newest)),
            vec![1, 3, 2]
        );
        assert_eq!(
            ids(&visible_alerts(&alerts, AlertFilter::All, AlertSort::Oldest)),
            vec![2, 3, 1]
        );
    }

    #[tokio::test]
    async fn counts_cover_every_filter() {
        let (c, _rx) = controller();
        c.load().await;
        let counts = c.counts();
        assert_eq!(counts.all, 8);
        assert_eq!(counts.critical + counts.warning + counts.info, counts.all);
        for filter in AlertFilter::ALL {
            c.set_filter(filter);
            assert_eq!(c.visible().len(), counts.get(filter));
        }
    }

    #[test]
    fn empty_state_copy_per_filter() {
        assert_eq!(EmptyState::for_filter(AlertFilter::All).title, "No alerts");
        let warning = EmptyState::for_filter(AlertFilter::Warning);
        assert_eq!(warning.title, "No warning alerts");
        assert_eq!(warning.description, "No warning alerts are currently active.");
    }
}
