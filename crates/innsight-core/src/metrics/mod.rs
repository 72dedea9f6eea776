// ── Metrics aggregation ──
//
// Pure functions that turn the newest-first daily metrics into the KPI
// summary and chart series the dashboard renders. No I/O, no latency:
// `MetricsService` wraps these with the simulated delay.

pub mod format;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{DailyMetric, RoomTypeRevenue};

pub use format::{
    ChangeDirection, FormatKind, format_change, format_plain_number, format_value, percent_change,
    short_date_label, sparkline,
};

/// Days of history in each KPI sparkline.
pub const TREND_DAYS: usize = 7;
/// Days shown on the occupancy-by-date chart.
pub const OCCUPANCY_CHART_DAYS: usize = 10;
/// Days shown on the ADR trend chart.
pub const ADR_CHART_DAYS: usize = 15;

/// Month labels for the seasonal heatmap columns.
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const SEASONAL_BOOKINGS: [(&str, [u8; 12]); 4] = [
    ("Week 1", [65, 72, 78, 85, 92, 88, 95, 87, 82, 76, 69, 73]),
    ("Week 2", [68, 75, 81, 88, 94, 91, 97, 89, 85, 79, 72, 76]),
    ("Week 3", [71, 78, 84, 91, 96, 93, 98, 92, 87, 82, 75, 79]),
    ("Week 4", [63, 70, 76, 83, 89, 86, 93, 85, 80, 74, 67, 71]),
];

// ── KPI summary ─────────────────────────────────────────────────────

/// One headline figure with its comparison value and recent trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub current: f64,
    /// Absent when only one day of data exists.
    pub previous: Option<f64>,
    /// Oldest to newest.
    pub trend: Vec<f64>,
}

impl Kpi {
    /// Percent change against `previous`, or `0` without a baseline.
    pub fn change(&self) -> f64 {
        percent_change(self.current, self.previous)
    }

    pub fn direction(&self) -> ChangeDirection {
        ChangeDirection::of(self.change())
    }
}

/// The four dashboard KPIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    /// Trend values are in thousands.
    pub revenue: Kpi,
    pub occupancy_rate: Kpi,
    pub adr: Kpi,
    pub revpar: Kpi,
}

/// A KPI paired with how the dashboard titles and formats it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KpiCard<'a> {
    pub title: &'static str,
    pub icon: &'static str,
    pub kind: FormatKind,
    pub kpi: &'a Kpi,
}

impl KpiCard<'_> {
    pub fn formatted_value(&self) -> String {
        format_value(self.kpi.current, self.kind)
    }
}

impl KpiSummary {
    /// Cards in dashboard order.
    pub fn cards(&self) -> [KpiCard<'_>; 4] {
        [
            KpiCard {
                title: "Total Revenue",
                icon: "DollarSign",
                kind: FormatKind::Currency,
                kpi: &self.revenue,
            },
            KpiCard {
                title: "Occupancy Rate",
                icon: "Users",
                kind: FormatKind::Percentage,
                kpi: &self.occupancy_rate,
            },
            KpiCard {
                title: "Average Daily Rate",
                icon: "TrendingUp",
                kind: FormatKind::Currency,
                kpi: &self.adr,
            },
            KpiCard {
                title: "RevPAR",
                icon: "Target",
                kind: FormatKind::Currency,
                kpi: &self.revpar,
            },
        ]
    }
}

/// Build the KPI summary from newest-first daily metrics.
///
/// Index 0 is the current period, index 1 the comparison period. An empty
/// series has no current period and is an internal fault.
pub fn dashboard_metrics(daily: &[DailyMetric]) -> Result<KpiSummary, CoreError> {
    let Some(current) = daily.first() else {
        return Err(CoreError::Internal("no daily metrics available".into()));
    };
    let previous = daily.get(1);
    let trend: Vec<&DailyMetric> = daily.iter().take(TREND_DAYS).rev().collect();

    let kpi = |pick: fn(&DailyMetric) -> f64, trend_scale: f64| Kpi {
        current: pick(current),
        previous: previous.map(pick),
        trend: trend.iter().map(|d| pick(d) / trend_scale).collect(),
    };

    Ok(KpiSummary {
        revenue: kpi(|d| d.revenue, 1000.0),
        occupancy_rate: kpi(|d| d.occupancy_rate, 1.0),
        adr: kpi(|d| d.adr, 1.0),
        revpar: kpi(|d| d.revpar, 1.0),
    })
}

// ── Chart series ────────────────────────────────────────────────────

/// A labelled point on a date axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedValue {
    /// Short label such as `Mar 5`.
    pub date: String,
    pub rate: f64,
}

/// One heatmap row: a week-of-month across the twelve months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapRow {
    pub name: String,
    pub data: [u8; 12],
}

/// Everything the charts grid needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeriesSet {
    #[serde(rename = "occupancyData")]
    pub occupancy: Vec<DatedValue>,
    pub revenue_by_room: Vec<RoomTypeRevenue>,
    #[serde(rename = "adrTrends")]
    pub adr_trend: Vec<DatedValue>,
    #[serde(rename = "seasonalBookings")]
    pub seasonal: Vec<HeatmapRow>,
}

/// Build every chart series. The newest `n` days of each date series are
/// returned oldest first.
pub fn chart_series(daily: &[DailyMetric], room_types: &[RoomTypeRevenue]) -> ChartSeriesSet {
    ChartSeriesSet {
        occupancy: dated(daily, OCCUPANCY_CHART_DAYS, |d| d.occupancy_rate),
        revenue_by_room: room_types.to_vec(),
        adr_trend: dated(daily, ADR_CHART_DAYS, |d| d.adr),
        seasonal: seasonal_heatmap(),
    }
}

/// Synthetic week-by-month occupancy percentages. Static; not derived
/// from the daily metrics.
pub fn seasonal_heatmap() -> Vec<HeatmapRow> {
    SEASONAL_BOOKINGS
        .iter()
        .map(|(name, data)| HeatmapRow {
            name: (*name).to_owned(),
            data: *data,
        })
        .collect()
}

fn dated(daily: &[DailyMetric], n: usize, pick: fn(&DailyMetric) -> f64) -> Vec<DatedValue> {
    daily
        .iter()
        .take(n)
        .rev()
        .map(|d| DatedValue {
            date: short_date_label(d.date),
            rate: pick(d),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use pretty_assertions::assert_eq;

    /// `n` days ending 2024-03-10, newest first, with values that encode
    /// the day of month so ordering is easy to check.
    fn series(n: u32) -> Vec<DailyMetric> {
        let end = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        (0..n)
            .map(|i| {
                let day = 10.0 - f64::from(i);
                DailyMetric {
                    date: end.checked_sub_days(Days::new(u64::from(i))).unwrap(),
                    revenue: day * 1000.0,
                    occupancy_rate: 70.0 + day,
                    adr: 180.0 + day,
                    revpar: 120.0 + day,
                }
            })
            .collect()
    }

    #[test]
    fn trends_are_seven_days_oldest_first() {
        let summary = dashboard_metrics(&series(10)).unwrap();
        assert_eq!(summary.revenue.trend, vec![4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        assert_eq!(summary.adr.trend.len(), TREND_DAYS);
        assert_eq!(summary.occupancy_rate.trend.last().copied(), Some(80.0));
    }

    #[test]
    fn last_trend_point_is_current_period() {
        let summary = dashboard_metrics(&series(10)).unwrap();
        let last = summary.revenue.trend.last().copied().unwrap();
        assert!((last - summary.revenue.current / 1000.0).abs() < f64::EPSILON);
        assert_eq!(summary.revpar.previous, Some(129.0));
    }

    #[test]
    fn single_day_has_no_previous() {
        let summary = dashboard_metrics(&series(1)).unwrap();
        assert_eq!(summary.adr.previous, None);
        assert_eq!(summary.adr.direction(), ChangeDirection::Neutral);
        assert_eq!(summary.adr.trend, vec![190.0]);
    }

    #[test]
    fn empty_series_is_internal_fault() {
        let err = dashboard_metrics(&[]).unwrap_err();
        assert!(matches!(err, CoreError::Internal(_)));
    }

    #[test]
    fn cards_format_each_kpi() {
        let summary = dashboard_metrics(&series(2)).unwrap();
        let rendered: Vec<String> = summary
            .cards()
            .iter()
            .map(|c| format!("{}: {}", c.title, c.formatted_value()))
            .collect();
        insta::assert_snapshot!(rendered.join("\n"), @r"
        Total Revenue: $10,000
        Occupancy Rate: 80.0%
        Average Daily Rate: $190
        RevPAR: $130
        ");
    }

    #[test]
    fn chart_series_windows_and_labels() {
        let charts = chart_series(&series(20), &[]);
        assert_eq!(charts.occupancy.len(), OCCUPANCY_CHART_DAYS);
        assert_eq!(charts.adr_trend.len(), ADR_CHART_DAYS);
        assert_eq!(charts.occupancy.first().unwrap().date, "Mar 1");
        assert_eq!(charts.occupancy.last().unwrap().date, "Mar 10");
        assert_eq!(charts.adr_trend.first().unwrap().date, "Feb 25");
    }

    #[test]
    fn short_history_yields_short_series() {
        let charts = chart_series(&series(3), &[]);
        assert_eq!(charts.occupancy.len(), 3);
        assert_eq!(charts.adr_trend.len(), 3);
    }

    #[test]
    fn heatmap_is_four_weeks_by_twelve_months() {
        let rows = seasonal_heatmap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].name, "Week 1");
        assert_eq!(rows[2].data[6], 98);
        assert_eq!(rows[3].data[11], 71);
    }

    #[test]
    fn chart_json_keeps_dashboard_field_names() {
        let charts = chart_series(&series(1), &[]);
        let json = serde_json::to_value(&charts).unwrap();
        for key in ["occupancyData", "revenueByRoom", "adrTrends", "seasonalBookings"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
