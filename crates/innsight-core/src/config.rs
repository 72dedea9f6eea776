// ── Runtime service configuration ──
//
// These types describe how the mock data layer behaves: how long each
// call pretends to take, where fixtures come from, and which clock stamps
// new records. Core never reads config files; the CLI builds a
// `ServiceConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{Resource, Verb};

/// Simulated latency for every data-access call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub alerts: CrudLatency,
    pub reports: CrudLatency,
    pub dashboard: Duration,
    pub charts: Duration,
}

/// Per-verb delays for one mutable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrudLatency {
    pub get_all: Duration,
    pub get_by_id: Duration,
    /// `create` for alerts, `generate` for reports.
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl CrudLatency {
    const fn millis(get_all: u64, get_by_id: u64, create: u64, update: u64, delete: u64) -> Self {
        Self {
            get_all: Duration::from_millis(get_all),
            get_by_id: Duration::from_millis(get_by_id),
            create: Duration::from_millis(create),
            update: Duration::from_millis(update),
            delete: Duration::from_millis(delete),
        }
    }

    fn scaled(self, factor: f64) -> Self {
        Self {
            get_all: scale(self.get_all, factor),
            get_by_id: scale(self.get_by_id, factor),
            create: scale(self.create, factor),
            update: scale(self.update, factor),
            delete: scale(self.delete, factor),
        }
    }
}

impl LatencyProfile {
    /// The delays a real backend would roughly exhibit. Report generation
    /// is deliberately slow.
    pub const REALISTIC: Self = Self {
        alerts: CrudLatency::millis(250, 200, 300, 350, 250),
        reports: CrudLatency::millis(350, 200, 2000, 350, 250),
        dashboard: Duration::from_millis(300),
        charts: Duration::from_millis(400),
    };

    /// No delays at all.
    pub const INSTANT: Self = Self {
        alerts: CrudLatency::millis(0, 0, 0, 0, 0),
        reports: CrudLatency::millis(0, 0, 0, 0, 0),
        dashboard: Duration::ZERO,
        charts: Duration::ZERO,
    };

    /// Multiply every delay by `factor`. A non-positive or non-finite
    /// factor yields [`INSTANT`](Self::INSTANT).
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return Self::INSTANT;
        }
        Self {
            alerts: self.alerts.scaled(factor),
            reports: self.reports.scaled(factor),
            dashboard: scale(self.dashboard, factor),
            charts: scale(self.charts, factor),
        }
    }

    /// Delay for a `(resource, verb)` pair. Pairs that no service performs
    /// get no delay.
    pub fn delay(&self, resource: Resource, verb: Verb) -> Duration {
        let crud = match resource {
            Resource::Alerts => &self.alerts,
            Resource::Reports => &self.reports,
            Resource::Metrics => {
                return match verb {
                    Verb::Dashboard => self.dashboard,
                    Verb::Charts => self.charts,
                    _ => Duration::ZERO,
                };
            }
        };
        match verb {
            Verb::GetAll => crud.get_all,
            Verb::GetById => crud.get_by_id,
            Verb::Create | Verb::Generate => crud.create,
            Verb::Update => crud.update,
            Verb::Delete => crud.delete,
            Verb::Dashboard | Verb::Charts => Duration::ZERO,
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::REALISTIC
    }
}

// Rounded to whole nanoseconds so a factor of 1.0 is exact.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::as_conversions
)]
fn scale(d: Duration, factor: f64) -> Duration {
    let nanos = (d.as_secs_f64() * factor * 1e9).round();
    if nanos.is_finite() && nanos >= 0.0 && nanos < u64::MAX as f64 {
        Duration::from_nanos(nanos as u64)
    } else {
        d
    }
}

/// Where the seed records come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FixtureSource {
    /// The data set compiled into the binary.
    #[default]
    Embedded,
    /// A directory holding `alerts.json`, `dailyMetrics.json`,
    /// `roomTypeRevenue.json` and `reports.json`.
    Directory(PathBuf),
}

/// Source of "now" for timestamps on created records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Self::System => Utc::now(),
            Self::Fixed(at) => *at,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Everything needed to stand up the analytics services.
///
/// Built by the CLI, passed to [`Analytics`](crate::Analytics).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    pub latency: LatencyProfile,
    pub fixtures: FixtureSource,
    pub clock: Clock,
}

impl ServiceConfig {
    /// Embedded fixtures, no latency, system clock.
    pub fn instant() -> Self {
        Self {
            latency: LatencyProfile::INSTANT,
            ..Self::default()
        }
    }
}
