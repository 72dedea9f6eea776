//! Chart command handlers.
//!
//! Each chart prints as a table with a proportional bar column; structured
//! formats emit the raw series.

use tabled::Tabled;
use tabled::builder::Builder;
use tabled::settings::Style;

use innsight_core::metrics::{DatedValue, HeatmapRow, MONTHS, format_value};
use innsight_core::{Analytics, ChartSeriesSet, FormatKind, RoomTypeRevenue};

use crate::cli::{ChartKind, ChartsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

const BAR_WIDTH: f64 = 30.0;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DatedRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "")]
    bar: String,
}

#[derive(Tabled)]
struct RoomRow {
    #[tabled(rename = "Room Type")]
    room_type: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || !value.is_finite() || value <= 0.0 {
        return String::new();
    }
    let cells = ((value / max) * BAR_WIDTH).round().clamp(0.0, BAR_WIDTH) as usize;
    "█".repeat(cells)
}

fn series_max<'a>(values: impl Iterator<Item = &'a f64>) -> f64 {
    values.copied().fold(0.0, f64::max)
}

fn dated_rows(series: &[DatedValue], kind: FormatKind) -> Vec<DatedRow> {
    let max = series_max(series.iter().map(|p| &p.rate));
    series
        .iter()
        .map(|p| DatedRow {
            date: p.date.clone(),
            value: format_value(p.rate, kind),
            bar: bar(p.rate, max),
        })
        .collect()
}

fn room_rows(rooms: &[RoomTypeRevenue]) -> Vec<RoomRow> {
    let max = series_max(rooms.iter().map(|r| &r.revenue));
    let total: f64 = rooms.iter().map(|r| r.revenue).sum();
    rooms
        .iter()
        .map(|r| RoomRow {
            room_type: r.room_type.clone(),
            revenue: format_value(r.revenue, FormatKind::Currency),
            share: if total > 0.0 {
                format!("{:.1}%", r.revenue / total * 100.0)
            } else {
                "-".into()
            },
            bar: bar(r.revenue, max),
        })
        .collect()
}

fn heatmap_table(rows: &[HeatmapRow]) -> String {
    let mut builder = Builder::default();
    builder.push_record(std::iter::once("").chain(MONTHS));
    for row in rows {
        builder.push_record(
            std::iter::once(row.name.clone()).chain(row.data.iter().map(ToString::to_string)),
        );
    }
    builder.build().with(Style::rounded()).to_string()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    analytics: &Analytics,
    args: ChartsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let range = util::resolve_range(&args.range, analytics.today())?;
    let charts = analytics.metrics().chart_data(&range).await?;
    let out = render_chart(args.chart, &charts, global);
    output::print_output(&out, global.quiet);
    Ok(())
}

fn render_chart(chart: ChartKind, charts: &ChartSeriesSet, global: &GlobalOpts) -> String {
    match chart {
        ChartKind::Occupancy => output::render_single(
            global.output,
            charts.occupancy.as_slice(),
            |s| output::render_table(&dated_rows(s, FormatKind::Percentage)),
            plain_dated,
        ),
        ChartKind::Adr => output::render_single(
            global.output,
            charts.adr_trend.as_slice(),
            |s| output::render_table(&dated_rows(s, FormatKind::Currency)),
            plain_dated,
        ),
        ChartKind::Rooms => output::render_single(
            global.output,
            charts.revenue_by_room.as_slice(),
            |rooms| output::render_table(&room_rows(rooms)),
            |rooms| {
                rooms
                    .iter()
                    .map(|r| format!("{}\t{}", r.room_type, r.revenue))
                    .collect::<Vec<_>>()
                    .join("\n")
            },
        ),
        ChartKind::Heatmap => output::render_single(
            global.output,
            charts.seasonal.as_slice(),
            heatmap_table,
            |rows| {
                rows.iter()
                    .map(|r| {
                        let cells: Vec<String> = r.data.iter().map(ToString::to_string).collect();
                        format!("{}\t{}", r.name, cells.join("\t"))
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            },
        ),
    }
}

fn plain_dated(series: &[DatedValue]) -> String {
    series
        .iter()
        .map(|p| format!("{}\t{}", p.date, p.rate))
        .collect::<Vec<_>>()
        .join("\n")
}
