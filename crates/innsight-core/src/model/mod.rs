// ── Domain model ──
//
// Canonical record shapes shared by the store, the services, and every
// presenter. Serde attributes keep the fixture wire shape (`Id`,
// camelCase fields, kebab-case enum values).

pub mod alert;
pub mod common;
pub mod date_range;
pub mod metric;
pub mod record_id;
pub mod report;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use innsight_core::model::*` gives you everything.

pub use alert::{Alert, AlertPatch, AlertType, NewAlert, Severity};
pub use common::Tone;
pub use date_range::{DatePreset, DateRange};
pub use metric::{DailyMetric, RoomTypeRevenue};
pub use record_id::RecordId;
pub use report::{
    DateSpan, Report, ReportConfig, ReportFormat, ReportPatch, ReportRequest, ReportStatus,
    ReportType, ReportValue,
};
