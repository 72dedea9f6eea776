//! Clap derive structures for the `innsight` CLI.
//!
//! Defines the command tree, global flags, and the value enums parsed from
//! the command line. Kept free of crate-internal imports so `build.rs` can
//! pull it in for man page generation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// innsight -- hotel performance analytics from the command line
#[derive(Debug, Parser)]
#[command(
    name = "innsight",
    version,
    about = "Hotel performance analytics from the command line",
    long_about = "Dashboard KPIs, occupancy and revenue charts, threshold alerts and\n\
        generated reports for a single property.\n\n\
        Data comes from a fixture set (compiled in, or a directory given with\n\
        --fixtures). Changes made by a command last only for that invocation.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "INNSIGHT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Skip the simulated backend latency
    #[arg(long, global = true)]
    pub instant: bool,

    /// Load fixtures from this directory instead of the built-in set
    #[arg(long, value_name = "DIR", global = true)]
    pub fixtures: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, env = "INNSIGHT_CONFIG", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the KPI cards for a date range
    #[command(alias = "dash", alias = "d")]
    Dashboard(DashboardArgs),

    /// Print one of the dashboard chart series
    Charts(ChartsArgs),

    /// Inspect and manage threshold alerts
    #[command(alias = "a")]
    Alerts(AlertsArgs),

    /// Generate and browse reports
    #[command(alias = "r")]
    Reports(ReportsArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Date range ───────────────────────────────────────────────────────

/// Reporting window: a preset, or an explicit `--from`/`--to` pair.
#[derive(Debug, Clone, Args)]
pub struct RangeArgs {
    /// Quick-select window relative to today
    #[arg(long, short = 'r', default_value = "today", conflicts_with_all = ["from", "to"])]
    pub range: RangePreset,

    /// Custom window start (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "to")]
    pub from: Option<String>,

    /// Custom window end (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "from")]
    pub to: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RangePreset {
    Today,
    Yesterday,
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
    ThisWeek,
    ThisMonth,
    ThisQuarter,
    ThisYear,
}

// ── Dashboard ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub range: RangeArgs,
}

// ── Charts ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ChartsArgs {
    /// Which series to print
    #[arg(value_enum)]
    pub chart: ChartKind,

    #[command(flatten)]
    pub range: RangeArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    /// Occupancy rate for the last 10 days
    Occupancy,
    /// Revenue by room type
    Rooms,
    /// Average daily rate for the last 15 days
    Adr,
    /// Seasonal booking heatmap
    Heatmap,
}

// ── Alerts ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AlertsArgs {
    #[command(subcommand)]
    pub command: AlertsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AlertsCommand {
    /// List alerts
    #[command(alias = "ls")]
    List {
        /// Only show alerts of this severity
        #[arg(long, short = 'f', default_value = "all")]
        filter: SeverityFilter,

        /// Ordering
        #[arg(long, short = 's', default_value = "newest")]
        sort: SortOrder,
    },

    /// Show one alert
    Get {
        /// Alert Id
        id: u32,
    },

    /// Raise a new alert
    Create {
        /// Category (occupancy, revenue, maintenance, or any other label)
        #[arg(long = "type", short = 't')]
        alert_type: String,

        /// Severity
        #[arg(long, short = 's')]
        severity: SeverityArg,

        /// Metric name shown as the alert title
        #[arg(long, short = 'm')]
        metric: String,

        /// Observed value
        #[arg(long)]
        current: f64,

        /// Threshold that was breached
        #[arg(long)]
        threshold: f64,
    },

    /// Dismiss (remove) an alert
    #[command(alias = "rm")]
    Dismiss {
        /// Alert Id
        id: u32,
    },

    /// Totals per severity
    Counts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeverityFilter {
    All,
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeverityArg {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Newest first
    Newest,
    /// Oldest first
    Oldest,
    /// Critical first
    Severity,
}

// ── Reports ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReportsArgs {
    #[command(subcommand)]
    pub command: ReportsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReportsCommand {
    /// List generated reports
    #[command(alias = "ls")]
    List,

    /// Show one report with its summary data
    Get {
        /// Report Id
        id: u32,
    },

    /// Generate a new report
    Generate {
        /// Report type
        #[arg(value_enum)]
        report_type: ReportKind,

        #[command(flatten)]
        range: RangeArgs,

        /// Export format
        #[arg(long, short = 'f', default_value = "pdf")]
        format: ExportFormat,
    },

    /// Delete a report
    #[command(alias = "rm")]
    Delete {
        /// Report Id
        id: u32,
    },

    /// List the report types that can be generated
    Types,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    Occupancy,
    Revenue,
    GuestSatisfaction,
    StaffPerformance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Pdf,
    Csv,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a config file interactively
    Init,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
