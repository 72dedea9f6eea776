//! Config subcommand handlers.

use std::io::IsTerminal;
use std::path::PathBuf;

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, LatencyMode};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Helpers ─────────────────────────────────────────────────────────

fn render_toml(cfg: &Config) -> Result<String, CliError> {
    toml::to_string_pretty(cfg).map_err(|e| CliError::Config(format!("failed to render config: {e}")))
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Ask for every setting, starting from `current`.
fn prompt_config(current: &Config) -> Result<Config, CliError> {
    let mut cfg = current.clone();

    let outputs = ["table", "json", "json-compact", "yaml", "plain"];
    let selected = outputs
        .iter()
        .position(|o| *o == cfg.defaults.output)
        .unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Default output format")
        .items(&outputs)
        .default(selected)
        .interact()
        .map_err(prompt_err)?;
    cfg.defaults.output = outputs[choice].into();

    let modes = [
        "Realistic (simulated backend delays)",
        "Instant (no delays)",
    ];
    let mode = Select::new()
        .with_prompt("Latency")
        .items(&modes)
        .default(usize::from(cfg.latency.mode == LatencyMode::Instant))
        .interact()
        .map_err(prompt_err)?;
    cfg.latency.mode = if mode == 0 {
        LatencyMode::Realistic
    } else {
        LatencyMode::Instant
    };

    if cfg.latency.mode == LatencyMode::Realistic {
        cfg.latency.scale = Input::new()
            .with_prompt("Latency scale")
            .default(cfg.latency.scale)
            .interact_text()
            .map_err(prompt_err)?;
    }

    let dir: String = Input::new()
        .with_prompt("Fixture directory (empty for built-in data)")
        .allow_empty(true)
        .default(
            cfg.fixtures_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        )
        .interact_text()
        .map_err(prompt_err)?;
    cfg.fixtures_dir = if dir.trim().is_empty() {
        None
    } else {
        Some(PathBuf::from(dir.trim()))
    };

    // Surface a bad scale or directory before anything is written.
    cfg.to_service_config()?;
    Ok(cfg)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let rendered = render_toml(cfg)?;
            let out = output::render_single(
                global.output,
                cfg,
                |_| rendered.trim_end().to_owned(),
                |_| rendered.trim_end().to_owned(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            let path = config::active_config_path(global);
            let out = match global.output {
                OutputFormat::Json | OutputFormat::JsonCompact | OutputFormat::Yaml => {
                    output::render_single(
                        global.output,
                        &path,
                        |p| p.display().to_string(),
                        |p| p.display().to_string(),
                    )
                }
                OutputFormat::Table | OutputFormat::Plain => path.display().to_string(),
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Init => {
            let path = config::active_config_path(global);
            let interactive = std::io::stdin().is_terminal();

            let new_cfg = if interactive && !global.yes {
                eprintln!("innsight configuration");
                eprintln!("   Config path: {}\n", path.display());
                prompt_config(cfg)?
            } else if global.yes {
                cfg.clone()
            } else {
                return Err(CliError::NonInteractiveRequiresYes {
                    action: "config init".into(),
                });
            };

            if path.exists()
                && !util::confirm(
                    &format!("Overwrite {}?", path.display()),
                    "config init",
                    global.yes,
                )?
            {
                return Ok(());
            }

            config::save_config_to(&new_cfg, &path)?;
            if !global.quiet {
                eprintln!("✓ Configuration written to {}", path.display());
            }
            Ok(())
        }
    }
}
