//! Alert command handlers.

use std::sync::Arc;

use tabled::Tabled;

use innsight_core::{
    Alert, AlertController, AlertCounts, AlertFilter, AlertSort, Analytics, NewAlert, RecordId,
    Severity,
};

use crate::cli::{
    AlertsArgs, AlertsCommand, GlobalOpts, OutputFormat, SeverityArg, SeverityFilter, SortOrder,
};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Type")]
    alert_type: String,
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Raised")]
    raised: String,
}

fn alert_row(a: &Alert, color: bool) -> AlertRow {
    AlertRow {
        id: a.id.to_string(),
        severity: output::paint(a.severity.label(), a.severity.tone(), color),
        alert_type: a.alert_type.to_string(),
        metric: a.metric.clone(),
        message: a.message(),
        raised: a.timestamp.format("%b %-d, %H:%M").to_string(),
    }
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Filter")]
    label: &'static str,
    #[tabled(rename = "Alerts")]
    count: usize,
}

fn detail(a: &Alert, color: bool) -> String {
    [
        format!("ID:        {}", a.id),
        format!(
            "Severity:  {}",
            output::paint(a.severity.label(), a.severity.tone(), color)
        ),
        format!("Type:      {}", a.alert_type),
        format!("Metric:    {}", a.metric),
        format!("Current:   {}", a.current_value),
        format!("Threshold: {}", a.threshold),
        format!("Raised:    {}", a.timestamp.to_rfc3339()),
        format!("Message:   {}", a.message()),
    ]
    .join("\n")
}

fn counts_table(counts: &AlertCounts) -> String {
    let rows: Vec<CountRow> = AlertFilter::ALL
        .iter()
        .map(|&f| CountRow {
            label: f.label(),
            count: counts.get(f),
        })
        .collect();
    output::render_table(&rows)
}

// ── Arg mapping ─────────────────────────────────────────────────────

const fn filter(f: SeverityFilter) -> AlertFilter {
    match f {
        SeverityFilter::All => AlertFilter::All,
        SeverityFilter::Critical => AlertFilter::Critical,
        SeverityFilter::Warning => AlertFilter::Warning,
        SeverityFilter::Info => AlertFilter::Info,
    }
}

const fn sort(s: SortOrder) -> AlertSort {
    match s {
        SortOrder::Newest => AlertSort::Newest,
        SortOrder::Oldest => AlertSort::Oldest,
        SortOrder::Severity => AlertSort::Severity,
    }
}

const fn severity(s: SeverityArg) -> Severity {
    match s {
        SeverityArg::Critical => Severity::Critical,
        SeverityArg::Warning => Severity::Warning,
        SeverityArg::Info => Severity::Info,
    }
}

/// Mount a controller and surface a failed load as an error.
async fn loaded(analytics: &Analytics, global: &GlobalOpts) -> Result<AlertController, CliError> {
    let controller = analytics.alert_controller(Arc::new(util::StderrSink::new(global)));
    controller.load().await;
    match controller.state().error {
        Some(message) => Err(CliError::OperationFailed { message }),
        None => Ok(controller),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(
    analytics: &Analytics,
    args: AlertsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);

    match args.command {
        AlertsCommand::List {
            filter: f,
            sort: s,
        } => {
            let controller = loaded(analytics, global).await?;
            controller.set_filter(filter(f));
            controller.set_sort(sort(s));
            let visible = controller.visible();

            if visible.is_empty() && global.output == OutputFormat::Table {
                let empty = controller.empty_message();
                output::print_output(
                    &format!("{}\n{}", empty.title, empty.description),
                    global.quiet,
                );
                return Ok(());
            }

            let out = output::render_list(
                global.output,
                &visible,
                |a| alert_row(a, color),
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AlertsCommand::Get { id } => {
            let alert = analytics.alerts().get_by_id(RecordId::new(id)).await?;
            let out = output::render_single(
                global.output,
                &alert,
                |a| detail(a, color),
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AlertsCommand::Create {
            alert_type,
            severity: sev,
            metric,
            current,
            threshold,
        } => {
            if metric.trim().is_empty() {
                return Err(CliError::Validation {
                    field: "metric".into(),
                    reason: "cannot be empty".into(),
                });
            }
            let controller = analytics.alert_controller(Arc::new(util::StderrSink::new(global)));
            let alert = controller
                .create(NewAlert {
                    alert_type: alert_type.into(),
                    severity: severity(sev),
                    metric,
                    current_value: current,
                    threshold,
                })
                .await?;
            let out = output::render_single(
                global.output,
                &alert,
                |a| detail(a, color),
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AlertsCommand::Dismiss { id } => {
            let id = RecordId::new(id);
            if !util::confirm(&format!("Dismiss alert {id}?"), "alerts dismiss", global.yes)? {
                return Ok(());
            }
            let controller = analytics.alert_controller(Arc::new(util::StderrSink::new(global)));
            controller.dismiss(id).await?;
            Ok(())
        }

        AlertsCommand::Counts => {
            let controller = loaded(analytics, global).await?;
            let counts = controller.counts();
            let out = output::render_single(global.output, &counts, counts_table, |c| {
                AlertFilter::ALL
                    .iter()
                    .map(|&f| format!("{f}\t{}", c.get(f)))
                    .collect::<Vec<_>>()
                    .join("\n")
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
