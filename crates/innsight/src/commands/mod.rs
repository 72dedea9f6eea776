//! Command dispatch: bridges CLI args -> core controllers -> output formatting.

pub mod alerts;
pub mod charts;
pub mod config_cmd;
pub mod dashboard;
pub mod reports;
pub mod util;

use clap::CommandFactory;

use innsight_core::Analytics;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;

/// Dispatch a parsed command to its handler.
///
/// Only the data commands stand up the analytics core; config and
/// completions never touch fixtures.
pub async fn dispatch(cmd: Command, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Config(args) => config_cmd::handle(args, cfg, global),
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "innsight", &mut std::io::stdout());
            Ok(())
        }
        Command::Dashboard(args) => dashboard::handle(&connect(cfg, global)?, args, global).await,
        Command::Charts(args) => charts::handle(&connect(cfg, global)?, args, global).await,
        Command::Alerts(args) => alerts::handle(&connect(cfg, global)?, args, global).await,
        Command::Reports(args) => reports::handle(&connect(cfg, global)?, args, global).await,
    }
}

fn connect(cfg: &Config, global: &GlobalOpts) -> Result<Analytics, CliError> {
    let service = config::resolve_service_config(cfg, global)?;
    Ok(Analytics::new(service)?)
}
