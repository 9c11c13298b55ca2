//! vmod binary.
//!
//! Operator console for the voice moderation engine:
//! - Manage rules, schedules, whitelist/blacklist, kick targets and stacking pairs
//! - Query the audit log and action statistics
//! - Watch engine liveness
//!
//! Configuration is loaded from `VMOD_*` environment variables (and `.env`);
//! the engine connection lives in the settings file.

use clap::Parser;
use std::future::Future;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use vmod_client::{unless_cancelled, ServiceContext};
use vmod_common::{
    init_tracing, ConnectionConfig, ConsoleConfig, ConsoleError, FileSettingsStore,
    SharedConnection, TracingConfig,
};

mod cli;

use cli::{
    handle_config_command, handle_dashboard, handle_kick_target_command, handle_live,
    handle_logs_command, handle_rule_command, handle_schedule_command,
    handle_stacking_pair_command, handle_stats_command, handle_user_command, Cli, Commands,
    Output,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command-line arguments
    let cli = Cli::parse();
    let out = Output::new(cli.format);

    match run(cli, out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out.error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, out: Output) -> anyhow::Result<()> {
    let config = ConsoleConfig::from_env().map_err(ConsoleError::from)?;
    init_tracing(TracingConfig::for_console(&config, cli.verbose));

    let store = match cli.settings.or_else(|| config.settings_path.clone()) {
        Some(path) => FileSettingsStore::new(path),
        None => FileSettingsStore::open_default().map_err(ConsoleError::from)?,
    };
    debug!(path = %store.path().display(), "Using settings file");

    let connection =
        SharedConnection::new(ConnectionConfig::load(&store).map_err(ConsoleError::from)?);
    let ctx = ServiceContext::new(connection.clone(), &config)?;

    let token = CancellationToken::new();
    cancel_on_interrupt(token.clone());

    // Execute the requested command
    match cli.command {
        Commands::Config(cmd) => handle_config_command(cmd, &store, &connection, out),

        Commands::Live => {
            handle_live(connection, config.live_retry_delay(), token, out).await
        }

        Commands::Dashboard => guarded(&token, handle_dashboard(&ctx, out)).await,

        Commands::Rules(cmd) => guarded(&token, handle_rule_command(cmd, &ctx, out)).await,

        Commands::Schedules(cmd) => {
            guarded(&token, handle_schedule_command(cmd, &ctx, out)).await
        }

        Commands::Logs(args) => guarded(&token, handle_logs_command(args, &ctx, out)).await,

        Commands::Users(cmd) => guarded(&token, handle_user_command(cmd, &ctx, out)).await,

        Commands::Stats(cmd) => guarded(&token, handle_stats_command(cmd, &ctx, out)).await,

        Commands::KickTargets(cmd) => {
            guarded(&token, handle_kick_target_command(cmd, &ctx, out)).await
        }

        Commands::StackingPairs(cmd) => {
            guarded(&token, handle_stacking_pair_command(cmd, &ctx, out)).await
        }
    }
}

/// Abandon a one-shot command when the operator interrupts it
async fn guarded<F>(token: &CancellationToken, fut: F) -> anyhow::Result<()>
where
    F: Future<Output = anyhow::Result<()>>,
{
    unless_cancelled(token, fut)
        .await
        .unwrap_or_else(|| Err(anyhow::anyhow!("Interrupted")))
}

fn cancel_on_interrupt(token: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                debug!("Interrupt received");
                token.cancel();
            }
            Err(e) => warn!(error = %e, "Cannot listen for Ctrl-C"),
        }
    });
}
