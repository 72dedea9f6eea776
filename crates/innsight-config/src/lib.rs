//! Configuration for the innsight CLI.
//!
//! A TOML file with output defaults, simulated-latency settings and an
//! optional fixture directory, layered under `INNSIGHT_` environment
//! variables and translated to `innsight_core::ServiceConfig`.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use innsight_core::{FixtureSource, LatencyProfile, ServiceConfig};

/// Environment prefix for every override. Nested keys use `__`, e.g.
/// `INNSIGHT_LATENCY__MODE=instant`.
pub const ENV_PREFIX: &str = "INNSIGHT_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Directory holding the four fixture JSON files. Unset means the
    /// data set compiled into the binary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixtures_dir: Option<PathBuf>,

    /// Output defaults for the CLI.
    #[serde(default)]
    pub defaults: Defaults,

    /// Simulated backend latency.
    #[serde(default)]
    pub latency: LatencySettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LatencyMode {
    /// Delays modelled on a real backend.
    #[default]
    Realistic,
    /// No delays.
    Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct LatencySettings {
    #[serde(default)]
    pub mode: LatencyMode,

    /// Multiplier applied to realistic delays.
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl Default for LatencySettings {
    fn default() -> Self {
        Self {
            mode: LatencyMode::default(),
            scale: default_scale(),
        }
    }
}

fn default_scale() -> f64 {
    1.0
}

impl LatencySettings {
    pub fn profile(&self) -> Result<LatencyProfile, ConfigError> {
        if !self.scale.is_finite() || self.scale < 0.0 {
            return Err(ConfigError::Validation {
                field: "latency.scale".into(),
                reason: format!("expected a non-negative number, got {}", self.scale),
            });
        }
        Ok(match self.mode {
            LatencyMode::Instant => LatencyProfile::INSTANT,
            LatencyMode::Realistic => LatencyProfile::REALISTIC.scaled(self.scale),
        })
    }
}

impl Config {
    /// Translate to the runtime service configuration.
    pub fn to_service_config(&self) -> Result<ServiceConfig, ConfigError> {
        let fixtures = match &self.fixtures_dir {
            Some(dir) if dir.as_os_str().is_empty() => {
                return Err(ConfigError::Validation {
                    field: "fixtures_dir".into(),
                    reason: "path is empty".into(),
                });
            }
            Some(dir) => FixtureSource::Directory(dir.clone()),
            None => FixtureSource::Embedded,
        };
        Ok(ServiceConfig {
            latency: self.latency.profile()?,
            fixtures,
            ..ServiceConfig::default()
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "innsight", "innsight").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("innsight");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path + environment. A missing file is not
/// an error; defaults apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parent
/// directories as needed.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let cfg = load_config_from(Path::new("absent.toml")).unwrap();
            assert_eq!(cfg, Config::default());
            assert_eq!(cfg.defaults.output, "table");
            Ok(())
        });
    }

    #[test]
    fn file_values_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    fixtures_dir = "/srv/innsight/fixtures"

                    [defaults]
                    output = "json"

                    [latency]
                    scale = 0.5
                "#,
            )?;
            let cfg = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.defaults.output, "json");
            assert_eq!(cfg.defaults.color, "auto");
            assert_eq!(cfg.fixtures_dir, Some(PathBuf::from("/srv/innsight/fixtures")));

            let service = cfg.to_service_config().unwrap();
            assert_eq!(
                service.fixtures,
                FixtureSource::Directory("/srv/innsight/fixtures".into())
            );
            assert_eq!(service.latency.charts, Duration::from_millis(200));
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[latency]\nmode = \"realistic\"\n")?;
            jail.set_env("INNSIGHT_LATENCY__MODE", "instant");
            jail.set_env("INNSIGHT_DEFAULTS__COLOR", "never");
            jail.set_env("INNSIGHT_CONFIG", "ignored.toml");

            let cfg = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.latency.mode, LatencyMode::Instant);
            assert_eq!(cfg.defaults.color, "never");
            assert_eq!(cfg.to_service_config().unwrap().latency, LatencyProfile::INSTANT);
            Ok(())
        });
    }

    #[test]
    fn negative_scale_is_rejected() {
        let cfg = Config {
            latency: LatencySettings {
                mode: LatencyMode::Realistic,
                scale: -1.0,
            },
            ..Config::default()
        };
        let err = cfg.to_service_config().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "latency.scale"));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            defaults: Defaults {
                output: "yaml".into(),
                color: "always".into(),
            },
            latency: LatencySettings {
                mode: LatencyMode::Instant,
                scale: 1.0,
            },
            fixtures_dir: None,
        };
        save_config_to(&cfg, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let reparsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(reparsed, cfg);
    }
}
