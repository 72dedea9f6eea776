// ── Seed data ──
//
// The four fixture files, either compiled in or read from a directory.
// Daily metrics are expected newest-first; every other file is kept in
// the order it was written.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::config::FixtureSource;
use crate::error::CoreError;
use crate::model::{Alert, DailyMetric, Report, RoomTypeRevenue};

pub const ALERTS_FILE: &str = "alerts.json";
pub const DAILY_METRICS_FILE: &str = "dailyMetrics.json";
pub const ROOM_TYPE_REVENUE_FILE: &str = "roomTypeRevenue.json";
pub const REPORTS_FILE: &str = "reports.json";

const EMBEDDED_ALERTS: &str = include_str!("../../fixtures/alerts.json");
const EMBEDDED_DAILY_METRICS: &str = include_str!("../../fixtures/dailyMetrics.json");
const EMBEDDED_ROOM_TYPE_REVENUE: &str = include_str!("../../fixtures/roomTypeRevenue.json");
const EMBEDDED_REPORTS: &str = include_str!("../../fixtures/reports.json");

/// One complete, parsed set of seed records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixtureSet {
    pub alerts: Vec<Alert>,
    pub reports: Vec<Report>,
    pub daily_metrics: Vec<DailyMetric>,
    pub room_type_revenue: Vec<RoomTypeRevenue>,
}

impl FixtureSet {
    pub fn load(source: &FixtureSource) -> Result<Self, CoreError> {
        match source {
            FixtureSource::Embedded => Self::embedded(),
            FixtureSource::Directory(dir) => Self::from_dir(dir),
        }
    }

    /// The data set shipped with the binary.
    pub fn embedded() -> Result<Self, CoreError> {
        Ok(Self {
            alerts: parse(ALERTS_FILE, EMBEDDED_ALERTS)?,
            reports: parse(REPORTS_FILE, EMBEDDED_REPORTS)?,
            daily_metrics: parse(DAILY_METRICS_FILE, EMBEDDED_DAILY_METRICS)?,
            room_type_revenue: parse(ROOM_TYPE_REVENUE_FILE, EMBEDDED_ROOM_TYPE_REVENUE)?,
        })
    }

    /// Read all four files from `dir`. Every file must exist.
    pub fn from_dir(dir: &Path) -> Result<Self, CoreError> {
        tracing::debug!(dir = %dir.display(), "loading fixtures from directory");
        Ok(Self {
            alerts: read(dir, ALERTS_FILE)?,
            reports: read(dir, REPORTS_FILE)?,
            daily_metrics: read(dir, DAILY_METRICS_FILE)?,
            room_type_revenue: read(dir, ROOM_TYPE_REVENUE_FILE)?,
        })
    }
}

fn parse<T: DeserializeOwned>(name: &str, text: &str) -> Result<Vec<T>, CoreError> {
    serde_json::from_str(text).map_err(|e| fixture_error(name, e))
}

fn read<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>, CoreError> {
    let text = std::fs::read_to_string(dir.join(name)).map_err(|e| fixture_error(name, e))?;
    parse(name, &text)
}

fn fixture_error(name: &str, err: impl std::fmt::Display) -> CoreError {
    CoreError::Fixture {
        name: name.to_owned(),
        reason: err.to_string(),
    }
}
