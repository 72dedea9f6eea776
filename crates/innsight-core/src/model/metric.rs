// ── Read-only reference metrics ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of headline hotel performance figures.
///
/// Fixture collections are ordered newest-first: index 0 is the current
/// period and index 1 the comparison period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetric {
    pub date: NaiveDate,
    pub revenue: f64,
    /// Percentage of rooms sold, 0–100.
    pub occupancy_rate: f64,
    /// Average daily rate.
    pub adr: f64,
    /// Revenue per available room.
    pub revpar: f64,
}

/// Revenue attributed to one room category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeRevenue {
    pub room_type: String,
    pub revenue: f64,
}
