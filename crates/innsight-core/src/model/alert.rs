// ── Alert domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::common::Tone;
use super::record_id::RecordId;

// ── Severity ────────────────────────────────────────────────────────

/// How urgently an alert needs attention.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    /// Fixed ordering used by the "by severity" sort: higher is more urgent.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 3,
            Self::Warning => 2,
            Self::Info => 1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Critical => "AlertTriangle",
            Self::Warning => "AlertCircle",
            Self::Info => "Info",
        }
    }

    pub const fn tone(self) -> Tone {
        match self {
            Self::Critical => Tone::Error,
            Self::Warning => Tone::Warning,
            Self::Info => Tone::Info,
        }
    }
}

// ── AlertType ───────────────────────────────────────────────────────

/// Alert category. Open-ended: unknown categories are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertType {
    Occupancy,
    Revenue,
    Maintenance,
    Other(String),
}

impl AlertType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Occupancy => "occupancy",
            Self::Revenue => "revenue",
            Self::Maintenance => "maintenance",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for AlertType {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "occupancy" => Self::Occupancy,
            "revenue" => Self::Revenue,
            "maintenance" => Self::Maintenance,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for AlertType {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<AlertType> for String {
    fn from(t: AlertType) -> Self {
        match t {
            AlertType::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Alert ───────────────────────────────────────────────────────────

/// A threshold breach raised against one hotel metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: Severity,
    pub metric: String,
    pub current_value: f64,
    pub threshold: f64,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    /// One-line human description, phrased per alert category.
    pub fn message(&self) -> String {
        match self.alert_type {
            AlertType::Occupancy => format!(
                "Occupancy rate is {:.1}%, below the {}% threshold",
                self.current_value, self.threshold
            ),
            AlertType::Revenue => format!(
                "Revenue target missed by {:.1}K",
                (self.threshold - self.current_value) / 1000.0
            ),
            AlertType::Maintenance => format!("Maintenance overdue for {}", self.metric),
            AlertType::Other(_) => format!(
                "{}: {} (threshold: {})",
                self.metric, self.current_value, self.threshold
            ),
        }
    }
}

/// Payload for creating an alert. The store assigns `Id` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlert {
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: Severity,
    pub metric: String,
    pub current_value: f64,
    pub threshold: f64,
}

/// Partial update for an alert. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPatch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<AlertType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl AlertPatch {
    /// Merge this patch over `alert`, returning the updated record.
    pub fn apply(self, mut alert: Alert) -> Alert {
        if let Some(t) = self.alert_type {
            alert.alert_type = t;
        }
        if let Some(s) = self.severity {
            alert.severity = s;
        }
        if let Some(m) = self.metric {
            alert.metric = m;
        }
        if let Some(v) = self.current_value {
            alert.current_value = v;
        }
        if let Some(t) = self.threshold {
            alert.threshold = t;
        }
        if let Some(ts) = self.timestamp {
            alert.timestamp = ts;
        }
        alert
    }
}
