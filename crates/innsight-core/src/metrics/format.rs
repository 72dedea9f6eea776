// ── Display formatting for metric values ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How a KPI value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FormatKind {
    Currency,
    Percentage,
    Number,
}

/// Render a KPI value.
///
/// Zero and non-finite values render as `"0"` whatever the kind.
pub fn format_value(value: f64, kind: FormatKind) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".into();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    match kind {
        FormatKind::Currency => format!("{sign}${}", group_digits(&format!("{:.0}", value.abs()))),
        FormatKind::Percentage => format!("{value:.1}%"),
        FormatKind::Number => format!("{sign}{}", group_digits(&format!("{:.0}", value.abs()))),
    }
}

/// Grouped number that keeps up to two significant decimals:
/// `892500` → `892,500`, `12.3` → `12.3`.
pub fn format_plain_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".into();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');
    let grouped = group_digits(int_part);
    if frac.is_empty() {
        if grouped == "0" {
            return grouped;
        }
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

/// Insert `,` between every group of three digits. Expects ASCII digits.
fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ── Change indicators ───────────────────────────────────────────────

/// Relative change in percent. Zero when there is no usable baseline.
pub fn percent_change(current: f64, previous: Option<f64>) -> f64 {
    match previous {
        Some(prev) if prev != 0.0 && prev.is_finite() => (current - prev) / prev * 100.0,
        _ => 0.0,
    }
}

/// Which way a KPI moved relative to its comparison period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChangeDirection {
    Positive,
    Negative,
    Neutral,
}

impl ChangeDirection {
    pub fn of(change: f64) -> Self {
        if change > 0.0 {
            Self::Positive
        } else if change < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Positive => "↑",
            Self::Negative => "↓",
            Self::Neutral => "→",
        }
    }
}

/// Magnitude of a change with one decimal, e.g. `12.5%`. Direction is
/// conveyed separately.
pub fn format_change(change: f64) -> String {
    if !change.is_finite() {
        return "0.0%".into();
    }
    format!("{:.1}%", change.abs())
}

// ── Compact renderings ──────────────────────────────────────────────

const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Unicode block sparkline scaled between the series min and max.
/// A flat series renders at mid height.
pub fn sparkline(values: &[f64]) -> String {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let span = max - min;

    values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                return BLOCKS[0];
            }
            if span <= 0.0 {
                return BLOCKS[3];
            }
            let ratio = (v - min) / span;
            // ratio is in 0.0..=1.0, so the index is in 0..=7.
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::as_conversions
            )]
            let level = (ratio * 7.0).round() as usize;
            BLOCKS[level.min(BLOCKS.len() - 1)]
        })
        .collect()
}

/// Short axis label: `Mar 5`.
pub fn short_date_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}
