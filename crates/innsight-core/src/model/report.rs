// ── Report domain types ──

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::common::Tone;
use super::date_range::DateRange;
use super::record_id::RecordId;
use crate::metrics::format::format_plain_number;

// ── ReportType ──────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ReportType {
    Occupancy,
    Revenue,
    GuestSatisfaction,
    StaffPerformance,
}

impl ReportType {
    pub const ALL: [Self; 4] = [
        Self::Occupancy,
        Self::Revenue,
        Self::GuestSatisfaction,
        Self::StaffPerformance,
    ];

    /// Title stamped on a generated report.
    pub const fn report_title(self) -> &'static str {
        match self {
            Self::Occupancy => "Occupancy Analysis Report",
            Self::Revenue => "Revenue Performance Report",
            Self::GuestSatisfaction => "Guest Satisfaction Report",
            Self::StaffPerformance => "Staff Performance Report",
        }
    }

    /// Short title shown in the report builder catalog.
    pub const fn catalog_title(self) -> &'static str {
        match self {
            Self::Occupancy => "Occupancy Report",
            Self::Revenue => "Revenue Summary",
            Self::GuestSatisfaction => "Guest Satisfaction",
            Self::StaffPerformance => "Staff Performance",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Occupancy => "Detailed room occupancy analysis with trends and patterns",
            Self::Revenue => "Comprehensive revenue analytics across all channels",
            Self::GuestSatisfaction => "Guest feedback analysis and satisfaction metrics",
            Self::StaffPerformance => "Employee productivity and performance tracking",
        }
    }

    pub const fn features(self) -> &'static [&'static str] {
        match self {
            Self::Occupancy => &[
                "Daily occupancy rates",
                "Room type breakdown",
                "Seasonal patterns",
                "Forecasting",
            ],
            Self::Revenue => &[
                "Revenue by source",
                "ADR trends",
                "RevPAR analysis",
                "Profit margins",
            ],
            Self::GuestSatisfaction => &[
                "Review scores",
                "Feedback trends",
                "Service ratings",
                "Improvement areas",
            ],
            Self::StaffPerformance => &[
                "Task completion",
                "Guest interactions",
                "Performance scores",
                "Training needs",
            ],
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Occupancy => "Users",
            Self::Revenue => "DollarSign",
            Self::GuestSatisfaction => "Heart",
            Self::StaffPerformance => "Award",
        }
    }
}

// ── Format / status ─────────────────────────────────────────────────

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
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReportFormat {
    #[default]
    Pdf,
    Csv,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportStatus {
    Completed,
    Generating,
    Error,
}

impl ReportStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Generating => "Generating...",
            Self::Error => "Error",
        }
    }

    pub const fn tone(self) -> Tone {
        match self {
            Self::Completed => Tone::Success,
            Self::Generating => Tone::Warning,
            Self::Error => Tone::Error,
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Completed => "CheckCircle",
            Self::Generating => "Clock",
            Self::Error => "AlertCircle",
        }
    }
}

// ── Report payload ──────────────────────────────────────────────────

/// A single summary value inside a report's `data` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl fmt::Display for ReportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_plain_number(*n)),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<f64> for ReportValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for ReportValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

/// The calendar window a report covers, as plain dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl From<&DateRange> for DateSpan {
    fn from(range: &DateRange) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%b %-d"),
            self.end.format("%b %-d, %Y")
        )
    }
}

/// A generated analytics report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub title: String,
    pub date_range: DateSpan,
    pub generated_at: DateTime<Utc>,
    pub format: ReportFormat,
    pub status: ReportStatus,
    #[serde(default)]
    pub data: IndexMap<String, ReportValue>,
}

impl Report {
    /// The first `n` data entries with keys spelled out for display
    /// (`totalRevenue` → `total revenue`).
    pub fn highlights(&self, n: usize) -> Vec<(String, String)> {
        self.data
            .iter()
            .take(n)
            .map(|(k, v)| (humanize_key(k), v.to_string()))
            .collect()
    }
}

fn humanize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push(' ');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

// ── Requests ────────────────────────────────────────────────────────

/// What the report builder has collected so far. Either field may still
/// be unset; [`ReportConfig::into_request`] checks them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    #[serde(rename = "type")]
    pub report_type: Option<ReportType>,
    pub date_range: Option<DateRange>,
    #[serde(default)]
    pub format: ReportFormat,
}

impl ReportConfig {
    /// Validate required fields, checked in order: type, then date range.
    pub fn into_request(self) -> Result<ReportRequest, crate::CoreError> {
        let report_type = self
            .report_type
            .ok_or_else(|| crate::CoreError::missing("type"))?;
        let date_range = self
            .date_range
            .ok_or_else(|| crate::CoreError::missing("dateRange"))?;
        Ok(ReportRequest {
            report_type,
            date_range,
            format: self.format,
        })
    }
}

/// A fully specified generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub date_range: DateRange,
    pub format: ReportFormat,
}

/// Partial update for a report. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ReportFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<IndexMap<String, ReportValue>>,
}

impl ReportPatch {
    pub fn apply(self, mut report: Report) -> Report {
        if let Some(t) = self.title {
            report.title = t;
        }
        if let Some(f) = self.format {
            report.format = f;
        }
        if let Some(s) = self.status {
            report.status = s;
        }
        if let Some(d) = self.data {
            report.data = d;
        }
        report
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::CoreError;

    #[test]
    fn report_type_uses_kebab_case_names() {
        assert_eq!(ReportType::GuestSatisfaction.to_string(), "guest-satisfaction");
        assert_eq!(
            "staff-performance".parse::<ReportType>().unwrap(),
            ReportType::StaffPerformance
        );
    }

    #[test]
    fn config_without_type_fails_on_type_first() {
        let err = ReportConfig::default().into_request().unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed { ref field, .. } if field == "type"));
    }

    #[test]
    fn config_without_range_fails_on_date_range() {
        let cfg = ReportConfig {
            report_type: Some(ReportType::Revenue),
            ..ReportConfig::default()
        };
        let err = cfg.into_request().unwrap_err();
        assert!(
            matches!(err, CoreError::ValidationFailed { ref field, .. } if field == "dateRange")
        );
    }

    #[test]
    fn data_values_deserialize_by_shape() {
        let json = r#"{"a": 12.5, "b": "steady", "c": ["WiFi Speed", "Checkout Wait"]}"#;
        let data: IndexMap<String, ReportValue> = serde_json::from_str(json).unwrap();
        assert_eq!(data["a"], ReportValue::Number(12.5));
        assert_eq!(data["b"], ReportValue::Text("steady".into()));
        assert_eq!(data["c"].to_string(), "WiFi Speed, Checkout Wait");
    }

    #[test]
    fn highlights_spell_out_camel_case_keys() {
        let mut data = IndexMap::new();
        data.insert("totalRevenue".to_owned(), ReportValue::Number(892_500.0));
        data.insert("growthRate".to_owned(), ReportValue::Number(12.3));
        let report = Report {
            id: RecordId::new(1),
            report_type: ReportType::Revenue,
            title: "Revenue Performance Report".into(),
            date_range: DateSpan {
                start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            },
            generated_at: Utc::now(),
            format: ReportFormat::Csv,
            status: ReportStatus::Completed,
            data,
        };

        assert_eq!(
            report.highlights(1),
            vec![("total revenue".to_owned(), "892,500".to_owned())]
        );
        assert_eq!(report.date_range.to_string(), "Mar 1 - Mar 31, 2024");
    }
}
