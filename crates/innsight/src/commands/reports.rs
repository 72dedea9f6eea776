//! Report command handlers.

use std::sync::Arc;

use tabled::Tabled;

use innsight_core::{
    Analytics, RecordId, Report, ReportConfig, ReportController, ReportFormat, ReportType,
    ReportsState,
};

use crate::cli::{ExportFormat, GlobalOpts, ReportKind, ReportsArgs, ReportsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Format")]
    format: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Generated")]
    generated: String,
}

fn report_row(r: &Report, color: bool) -> ReportRow {
    ReportRow {
        id: r.id.to_string(),
        title: r.title.clone(),
        period: r.date_range.to_string(),
        format: r.format.as_ref().to_uppercase(),
        status: output::paint(r.status.label(), r.status.tone(), color),
        generated: r.generated_at.format("%b %-d, %Y").to_string(),
    }
}

#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "Type")]
    key: String,
    #[tabled(rename = "Name")]
    title: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
    #[tabled(rename = "Includes")]
    features: String,
}

impl From<&ReportType> for TypeRow {
    fn from(t: &ReportType) -> Self {
        Self {
            key: t.to_string(),
            title: t.catalog_title(),
            description: t.description(),
            features: t.features().join(", "),
        }
    }
}

fn detail(r: &Report, color: bool) -> String {
    let mut lines = vec![
        format!("ID:        {}", r.id),
        format!("Title:     {}", r.title),
        format!("Type:      {}", r.report_type),
        format!("Period:    {}", r.date_range),
        format!("Format:    {}", r.format.as_ref().to_uppercase()),
        format!(
            "Status:    {}",
            output::paint(r.status.label(), r.status.tone(), color)
        ),
        format!("Generated: {}", r.generated_at.to_rfc3339()),
    ];
    let highlights = r.highlights(r.data.len());
    if !highlights.is_empty() {
        lines.push(String::new());
        lines.extend(highlights.into_iter().map(|(k, v)| format!("  {k}: {v}")));
    }
    lines.join("\n")
}

// ── Arg mapping ─────────────────────────────────────────────────────

const fn report_type(k: ReportKind) -> ReportType {
    match k {
        ReportKind::Occupancy => ReportType::Occupancy,
        ReportKind::Revenue => ReportType::Revenue,
        ReportKind::GuestSatisfaction => ReportType::GuestSatisfaction,
        ReportKind::StaffPerformance => ReportType::StaffPerformance,
    }
}

const fn report_format(f: ExportFormat) -> ReportFormat {
    match f {
        ExportFormat::Pdf => ReportFormat::Pdf,
        ExportFormat::Csv => ReportFormat::Csv,
    }
}

fn controller(analytics: &Analytics, global: &GlobalOpts) -> ReportController {
    analytics.report_controller(Arc::new(util::StderrSink::new(global)))
}

fn load_error(state: ReportsState) -> Result<ReportsState, CliError> {
    match state.error {
        Some(message) => Err(CliError::OperationFailed { message }),
        None => Ok(state),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(
    analytics: &Analytics,
    args: ReportsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);

    match args.command {
        ReportsCommand::List => {
            let reports = controller(analytics, global);
            reports.load().await;
            let state = load_error(reports.state())?;
            let out = output::render_list(
                global.output,
                &state.reports,
                |r| report_row(r, color),
                |r| r.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReportsCommand::Get { id } => {
            let report = analytics.reports().get_by_id(RecordId::new(id)).await?;
            let out = output::render_single(
                global.output,
                &report,
                |r| detail(r, color),
                |r| r.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReportsCommand::Generate {
            report_type: kind,
            range,
            format,
        } => {
            let range = util::resolve_range(&range, analytics.today())?;
            let report_type = report_type(kind);
            let config = ReportConfig {
                report_type: Some(report_type),
                date_range: Some(range),
                format: report_format(format),
            };

            let pb = util::spinner(
                format!("Generating {}...", report_type.catalog_title()),
                global,
            );
            let result = controller(analytics, global).generate(config).await;
            pb.finish_and_clear();

            let report = result?;
            let out = output::render_single(
                global.output,
                &report,
                |r| detail(r, color),
                |r| r.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReportsCommand::Delete { id } => {
            let id = RecordId::new(id);
            if !util::confirm(&format!("Delete report {id}?"), "reports delete", global.yes)? {
                return Ok(());
            }
            controller(analytics, global).delete(id).await?;
            Ok(())
        }

        ReportsCommand::Types => {
            let out = output::render_list(
                global.output,
                ReportController::catalog(),
                |t| TypeRow::from(t),
                ToString::to_string,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use innsight_core::FixtureSet;

    fn fixture(id: u32) -> Report {
        FixtureSet::embedded()
            .unwrap()
            .reports
            .into_iter()
            .find(|r| r.id.get() == id)
            .unwrap()
    }

    #[test]
    fn row_shows_period_and_upper_case_format() {
        let row = report_row(&fixture(2), false);
        assert_eq!(row.format, "CSV");
        assert_eq!(row.status, "Completed");
    }

    #[test]
    fn detail_spells_out_data_keys() {
        let text = detail(&fixture(2), false);
        assert!(text.contains("  total revenue: "), "{text}");
    }

    #[test]
    fn pending_report_has_no_highlights() {
        let text = detail(&fixture(4), false);
        assert!(text.contains("Generating..."));
        assert!(!text.contains("\n\n"), "{text}");
    }

    #[test]
    fn catalog_rows_cover_every_type() {
        let rows: Vec<TypeRow> = ReportController::catalog().iter().map(TypeRow::from).collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].key, "revenue");
        assert_eq!(rows[1].title, "Revenue Summary");
        assert!(rows[3].features.contains("Training needs"));
    }
}
