//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use innsight_config::ConfigError;
use innsight_core::{CoreError, Resource};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} {identifier} not found")]
    #[diagnostic(
        code(innsight::not_found),
        help("Run: innsight {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{message}")]
    #[diagnostic(code(innsight::operation_failed))]
    OperationFailed { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(innsight::validation))]
    Validation { field: String, reason: String },

    // ── Data / configuration ─────────────────────────────────────────
    #[error("Could not load fixture {name}: {reason}")]
    #[diagnostic(
        code(innsight::fixture),
        help(
            "The fixture directory must contain alerts.json, dailyMetrics.json,\n\
             roomTypeRevenue.json and reports.json. Omit --fixtures to use the built-in set."
        )
    )]
    Fixture { name: String, reason: String },

    #[error("{0}")]
    #[diagnostic(
        code(innsight::config),
        help("Check the config file (innsight config path) and INNSIGHT_* environment variables.")
    )]
    Config(String),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(innsight::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { resource, id } => Self::NotFound {
                resource_type: resource.singular().into(),
                identifier: id.to_string(),
                list_command: list_command(resource).into(),
            },
            CoreError::ValidationFailed { field, reason } => Self::Validation { field, reason },
            CoreError::Fixture { name, reason } => Self::Fixture { name, reason },
            other @ (CoreError::OperationFailed { .. } | CoreError::Internal(_)) => {
                Self::OperationFailed {
                    message: other.to_string(),
                }
            }
        }
    }
}

fn list_command(resource: Resource) -> &'static str {
    match resource {
        Resource::Alerts => "alerts list",
        Resource::Reports => "reports list",
        Resource::Metrics => "dashboard",
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config(other.to_string()),
        }
    }
}
