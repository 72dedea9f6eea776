//! CLI configuration: thin wrapper around `innsight_config`.
//!
//! Loads the config file the user pointed at (or the canonical one) and
//! folds in `GlobalOpts` flag overrides (--instant, --fixtures, and the
//! output defaults when the flags were left at their defaults).

use std::path::PathBuf;

use clap::ArgMatches;
use clap::ValueEnum;
use clap::parser::ValueSource;

use innsight_core::{FixtureSource, LatencyProfile, ServiceConfig};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use innsight_config::{Config, LatencyMode, load_config_from, save_config_to};

// ── CLI-specific helpers ────────────────────────────────────────────

/// The config file in effect: `--config` / `INNSIGHT_CONFIG`, else the
/// platform default.
pub fn active_config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(innsight_config::config_path)
}

pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(load_config_from(&active_config_path(global))?)
}

/// Apply `[defaults]` from the config file to flags the user did not set.
pub fn apply_output_defaults(global: &mut GlobalOpts, matches: &ArgMatches, cfg: &Config) {
    if is_defaulted(matches, "output") {
        match OutputFormat::from_str(&cfg.defaults.output, true) {
            Ok(fmt) => global.output = fmt,
            Err(e) => tracing::warn!(value = %cfg.defaults.output, "ignoring defaults.output: {e}"),
        }
    }
    if is_defaulted(matches, "color") {
        match ColorMode::from_str(&cfg.defaults.color, true) {
            Ok(mode) => global.color = mode,
            Err(e) => tracing::warn!(value = %cfg.defaults.color, "ignoring defaults.color: {e}"),
        }
    }
}

fn is_defaulted(matches: &ArgMatches, id: &str) -> bool {
    matches!(matches.value_source(id), None | Some(ValueSource::DefaultValue))
}

/// Translate the loaded config + global flags into a `ServiceConfig`.
///
/// CLI flags take priority over the config file.
pub fn resolve_service_config(cfg: &Config, global: &GlobalOpts) -> Result<ServiceConfig, CliError> {
    let mut service = cfg.to_service_config()?;

    if global.instant {
        service.latency = LatencyProfile::INSTANT;
    }
    if let Some(dir) = &global.fixtures {
        service.fixtures = FixtureSource::Directory(dir.clone());
    }

    tracing::debug!(
        fixtures = ?service.fixtures,
        instant = service.latency == LatencyProfile::INSTANT,
        "resolved service config"
    );
    Ok(service)
}
