//! Dashboard command handler: the four KPI cards.

use tabled::Tabled;

use innsight_core::metrics::{KpiCard, format_change, sparkline};
use innsight_core::{Analytics, KpiSummary};

use crate::cli::{DashboardArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct KpiRow {
    #[tabled(rename = "Metric")]
    title: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Change")]
    change: String,
    #[tabled(rename = "Last 7 days")]
    trend: String,
}

fn kpi_row(card: &KpiCard<'_>, color: bool) -> KpiRow {
    let direction = card.kpi.direction();
    let change = format!("{} {}", direction.arrow(), format_change(card.kpi.change()));
    KpiRow {
        title: card.title.to_owned(),
        value: card.formatted_value(),
        change: output::paint(&change, output::direction_tone(direction), color),
        trend: sparkline(&card.kpi.trend),
    }
}

fn cards_table(summary: &KpiSummary, range_label: &str, color: bool) -> String {
    let rows: Vec<KpiRow> = summary.cards().iter().map(|c| kpi_row(c, color)).collect();
    format!("{range_label}\n{}", output::render_table(&rows))
}

fn cards_plain(summary: &KpiSummary) -> String {
    summary
        .cards()
        .iter()
        .map(|c| format!("{}\t{}", c.title, c.formatted_value()))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    analytics: &Analytics,
    args: DashboardArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let range = util::resolve_range(&args.range, analytics.today())?;
    let label = range.label.clone();

    let dashboard = analytics.dashboard_controller(range.clone());
    dashboard.load(range).await;
    let state = dashboard.state();

    let Some(summary) = state.metrics else {
        return Err(CliError::OperationFailed {
            message: state
                .error
                .unwrap_or_else(|| "Failed to fetch dashboard metrics".into()),
        });
    };

    let color = output::should_color(global.color);
    let out = output::render_single(
        global.output,
        &summary,
        |s| cards_table(s, &label, color),
        cards_plain,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
