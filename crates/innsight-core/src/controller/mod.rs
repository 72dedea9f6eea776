// ── State controllers ──
//
// Presenter-facing state machines over the services. Each controller keeps
// its state in a `watch` channel, mutates it only between awaits, and
// reports user-visible outcomes through a `NotificationSink`.

mod alerts;
mod dashboard;
pub mod notify;
mod reports;

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use strum::Display;

pub use alerts::{
    AlertController, AlertCounts, AlertFilter, AlertSort, AlertsState, EmptyState, visible_alerts,
};
pub use dashboard::{DashboardController, DashboardState};
pub use notify::{
    ChannelSink, Notification, NotificationLevel, NotificationSink, NullSink, Operation,
    TracingSink,
};
pub use reports::{ReportController, ReportView, ReportsState};

/// Lifecycle of a controller's collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Monotonic ticket counter for overlapping loads.
///
/// Every load takes a ticket; only the newest ticket may publish its
/// result. Older resolutions are dropped on arrival.
#[derive(Debug, Default)]
pub(crate) struct LoadGeneration(AtomicU64);

impl LoadGeneration {
    /// Start a new load and return its ticket.
    pub(crate) fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub(crate) fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::Acquire) == ticket
    }
}
