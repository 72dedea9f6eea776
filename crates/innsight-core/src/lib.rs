//! Data core for the innsight hotel analytics dashboard.
//!
//! This crate owns the domain model, the mock data-access layer, metric
//! aggregation, and the presenter-facing state controllers:
//!
//! - **[`Analytics`]** — Facade that loads fixtures into a shared
//!   [`FixtureStore`] and vends services and controllers wired to it.
//!
//! - **Services** ([`AlertService`], [`ReportService`], [`MetricsService`])
//!   — Async CRUD with simulated latency. Faults outside an operation's
//!   contract surface as [`CoreError::OperationFailed`].
//!
//! - **Controllers** ([`AlertController`], [`ReportController`],
//!   [`DashboardController`]) — `Idle → Loading → Ready | Failed` state in
//!   `watch` channels, with overlapping loads resolved by generation
//!   tickets and outcomes reported through a [`NotificationSink`].
//!
//! - **[`metrics`]** — Pure KPI and chart-series aggregation plus the
//!   value formatting the dashboard cards use.
//!
//! - **Domain model** ([`model`]) — Alerts, reports, daily metrics and date
//!   ranges, keeping the fixture JSON shape on the wire.

pub mod analytics;
pub mod config;
pub mod controller;
pub mod error;
pub mod metrics;
pub mod model;
pub mod service;
pub mod store;

#[cfg(test)]
mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use analytics::Analytics;
pub use config::{Clock, CrudLatency, FixtureSource, LatencyProfile, ServiceConfig};
pub use controller::{
    AlertController, AlertCounts, AlertFilter, AlertSort, AlertsState, ChannelSink,
    DashboardController, DashboardState, EmptyState, LoadState, Notification, NotificationLevel,
    NotificationSink, NullSink, Operation, ReportController, ReportView, ReportsState,
    TracingSink,
};
pub use error::{CoreError, Resource, Verb};
pub use metrics::{ChartSeriesSet, FormatKind, Kpi, KpiSummary};
pub use service::{AlertService, MetricsService, ReportService};
pub use store::{FixtureSet, FixtureStore};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Alert, AlertPatch, AlertType, DailyMetric, DatePreset, DateRange, DateSpan, NewAlert, RecordId,
    Report, ReportConfig, ReportFormat, ReportPatch, ReportRequest, ReportStatus, ReportType,
    ReportValue, RoomTypeRevenue, Severity, Tone,
};
