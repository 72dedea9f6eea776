//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::time::Duration;

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};

use innsight_core::{
    DatePreset, DateRange, Notification, NotificationLevel, NotificationSink, Tone,
};

use crate::cli::{GlobalOpts, RangeArgs, RangePreset};
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to ask on, refuses instead of blocking.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

// ── Date ranges ─────────────────────────────────────────────────────

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| CliError::Validation {
        field: field.into(),
        reason: format!("expected YYYY-MM-DD, got '{raw}' ({e})"),
    })
}

const fn preset(p: RangePreset) -> DatePreset {
    match p {
        RangePreset::Today => DatePreset::Today,
        RangePreset::Yesterday => DatePreset::Yesterday,
        RangePreset::Week => DatePreset::Week,
        RangePreset::Month => DatePreset::Month,
        RangePreset::ThisWeek => DatePreset::ThisWeek,
        RangePreset::ThisMonth => DatePreset::ThisMonth,
        RangePreset::ThisQuarter => DatePreset::ThisQuarter,
        RangePreset::ThisYear => DatePreset::ThisYear,
    }
}

/// Resolve `--range` or `--from/--to` into a validated window.
pub fn resolve_range(args: &RangeArgs, today: NaiveDate) -> Result<DateRange, CliError> {
    let range = match (&args.from, &args.to) {
        (Some(from), Some(to)) => DateRange::custom(parse_date("from", from)?, parse_date("to", to)?),
        _ => DateRange::from_preset(preset(args.range), today),
    };
    range.validate()?;
    Ok(range)
}

// ── Notifications ───────────────────────────────────────────────────

/// Prints controller toasts to stderr. Failures are left to the returned
/// error, so they only reach the debug log here.
pub struct StderrSink {
    quiet: bool,
    color: bool,
}

impl StderrSink {
    pub fn new(global: &GlobalOpts) -> Self {
        Self {
            quiet: global.quiet,
            color: output::should_color(global.color),
        }
    }
}

impl NotificationSink for StderrSink {
    fn notify(&self, n: Notification) {
        let (mark, tone) = match n.level {
            NotificationLevel::Success => ("✓", Tone::Success),
            NotificationLevel::Info => ("•", Tone::Info),
            NotificationLevel::Warning => ("!", Tone::Warning),
            NotificationLevel::Error => {
                tracing::debug!(operation = %n.operation, "{}", n.message);
                return;
            }
        };
        if !self.quiet {
            eprintln!("{} {}", output::paint(mark, tone, self.color), n.message);
        }
    }
}

// ── Progress ────────────────────────────────────────────────────────

/// Spinner on stderr for slow calls. Hidden when quiet or not a terminal.
pub fn spinner(message: impl Into<String>, global: &GlobalOpts) -> ProgressBar {
    if global.quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
