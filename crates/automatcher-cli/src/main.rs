// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use automatcher_application::{ArtistMatcher, MatchDecision, MusicBrainzCatalog, TitleInput};
use automatcher_config::{load as load_config, AppConfig, TelemetryConfig};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const EXIT_MATCHED: u8 = 0;
const EXIT_NO_MATCH: u8 = 1;
const EXIT_LOOKUP_FAILED: u8 = 2;
const EXIT_INTERRUPTED: u8 = 130;

/// Resolve artist names to a MusicBrainz artist id.
#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about,
    long_about = None,
    after_help = "Exit status: 0 matched, 1 no confident match, 2 catalog unreachable or \
                  setup failed (never \"artist does not exist\"), 130 interrupted."
)]
struct Cli {
    /// One or more artist names. Credits such as "A feat. B" are split automatically.
    #[arg(required = true)]
    artists: Vec<String>,

    /// Track title used to disambiguate artists sharing a name.
    #[arg(short, long)]
    title: Option<String>,

    /// TOML configuration file. `AUTOMATCHER_*` environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the decision as JSON instead of plain text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    ExitCode::from(status_of(run(cli).await))
}

/// Errors of any kind map to one status, distinct from "no match".
fn status_of(outcome: Result<u8>) -> u8 {
    match outcome {
        Ok(status) => status,
        Err(err) => {
            error!(target: "cli", error = %format!("{err:#}"), "artist resolution failed");
            eprintln!("error: {err:#}");
            EXIT_LOOKUP_FAILED
        }
    }
}

async fn run(cli: Cli) -> Result<u8> {
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.telemetry);
    debug!(target: "cli", ?config, "configuration loaded");
    resolve(cli, &config).await
}

async fn resolve(cli: Cli, config: &AppConfig) -> Result<u8> {
    let catalog = MusicBrainzCatalog::from_config(config)
        .context("failed to create MusicBrainz client")?;
    let matcher = ArtistMatcher::from_config(catalog, config)?;

    let decision = tokio::select! {
        decision = matcher.resolve_artist(cli.artists, TitleInput::from(cli.title)) => decision?,
        _ = shutdown_signal() => {
            info!(target: "cli", "interrupted before a decision was reached");
            return Ok(EXIT_INTERRUPTED);
        }
    };

    println!("{}", render(&decision, cli.json)?);
    Ok(exit_status(&decision))
}

fn exit_status(decision: &MatchDecision) -> u8 {
    if decision.is_match() {
        EXIT_MATCHED
    } else {
        EXIT_NO_MATCH
    }
}

fn render(decision: &MatchDecision, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string(decision)?);
    }
    Ok(match decision.artist_id() {
        Some(id) => id.to_string(),
        None => "no match".to_string(),
    })
}

/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(telemetry: &TelemetryConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&telemetry.log_level));

    let fmt_layer = if telemetry.json {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(target: "cli", error = %err, "unable to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
