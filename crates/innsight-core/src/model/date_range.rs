// ── Reporting window ──
//
// The date range is supplied by whoever owns the date picker. The core
// accepts any range as-is; `validate()` is for the boundary to call.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::CoreError;

/// Quick-select presets offered by the date picker.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum DatePreset {
    Today,
    Yesterday,
    /// Last 7 days.
    Week,
    /// Last 30 days.
    Month,
    ThisWeek,
    ThisMonth,
    ThisQuarter,
    ThisYear,
    Custom,
}

impl DatePreset {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::Week => "Last 7 days",
            Self::Month => "Last 30 days",
            Self::ThisWeek => "This week",
            Self::ThisMonth => "This month",
            Self::ThisQuarter => "This quarter",
            Self::ThisYear => "This year",
            Self::Custom => "Custom",
        }
    }
}

/// A reporting window with its picker metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub preset: DatePreset,
    pub label: String,
}

impl DateRange {
    /// Resolve a preset relative to `today`. Weeks start on Sunday.
    ///
    /// `Custom` has no fixed window and resolves to `today..=today`.
    pub fn from_preset(preset: DatePreset, today: NaiveDate) -> Self {
        let start = match preset {
            DatePreset::Today | DatePreset::Custom => today,
            DatePreset::Yesterday => days_before(today, 1),
            DatePreset::Week => days_before(today, 7),
            DatePreset::Month => days_before(today, 30),
            DatePreset::ThisWeek => {
                days_before(today, u64::from(today.weekday().num_days_from_sunday()))
            }
            DatePreset::ThisMonth => today.with_day(1).unwrap_or(today),
            DatePreset::ThisQuarter => {
                let month = (today.month0() / 3) * 3 + 1;
                NaiveDate::from_ymd_opt(today.year(), month, 1).unwrap_or(today)
            }
            DatePreset::ThisYear => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
        };
        let end = if preset == DatePreset::Yesterday {
            start
        } else {
            today
        };

        Self {
            start,
            end,
            preset,
            label: preset.label().to_owned(),
        }
    }

    /// A user-picked window, labelled like `"Mar 1 - Mar 9"`.
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            preset: DatePreset::Custom,
            label: format!("{} - {}", start.format("%b %-d"), end.format("%b %-d")),
        }
    }

    /// Reject windows whose start falls after their end.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.start > self.end {
            return Err(CoreError::ValidationFailed {
                field: "dateRange".into(),
                reason: format!("start {} is after end {}", self.start, self.end),
            });
        }
        Ok(())
    }

    /// Inclusive length of the window in days (0 for an inverted range).
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days().max(-1) + 1
    }
}

fn days_before(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(n)).unwrap_or(date)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn last_seven_days_spans_a_week_back() {
        let r = DateRange::from_preset(DatePreset::Week, date(2024, 3, 15));
        assert_eq!(r.start, date(2024, 3, 8));
        assert_eq!(r.end, date(2024, 3, 15));
        assert_eq!(r.label, "Last 7 days");
    }

    #[test]
    fn yesterday_is_a_single_day() {
        let r = DateRange::from_preset(DatePreset::Yesterday, date(2024, 3, 1));
        assert_eq!(r.start, date(2024, 2, 29));
        assert_eq!(r.end, date(2024, 2, 29));
    }

    #[test]
    fn this_week_starts_on_sunday() {
        // 2024-03-14 is a Thursday
        let r = DateRange::from_preset(DatePreset::ThisWeek, date(2024, 3, 14));
        assert_eq!(r.start, date(2024, 3, 10));
    }

    #[test]
    fn this_quarter_starts_on_quarter_boundary() {
        let r = DateRange::from_preset(DatePreset::ThisQuarter, date(2024, 8, 20));
        assert_eq!(r.start, date(2024, 7, 1));
    }

    #[test]
    fn custom_label_uses_short_month_names() {
        let r = DateRange::custom(date(2024, 3, 1), date(2024, 3, 9));
        assert_eq!(r.label, "Mar 1 - Mar 9");
        assert_eq!(r.days(), 9);
    }

    #[test]
    fn inverted_range_fails_validation() {
        let r = DateRange::custom(date(2024, 3, 9), date(2024, 3, 1));
        let err = r.validate().unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed { ref field, .. } if field == "dateRange"));
    }

    #[test]
    fn preset_names_parse_in_camel_case() {
        assert_eq!("thisMonth".parse::<DatePreset>().unwrap(), DatePreset::ThisMonth);
    }
}
