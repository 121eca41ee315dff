//! RootWatch - Root Activity Notifier
//!
//! Performs a single invocation: reads one activity event, publishes the
//! alert for it, and exits.

use anyhow::{Context, Result};
use clap::Parser;
use rootwatch::{
    cli::Cli,
    config::{Config, LogFormat},
    services::{build_handler, load_aws_config, setup_aws_services},
    InvocationOutcome,
};
use serde_json::Value;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        // Manually initialize logging for this specific error
        tracing_subscriber::fmt().init();
        error!("Failed to load configuration: {}", err);
        // Exit if configuration fails, as it's a critical step.
        std::process::exit(1);
    });

    init_tracing(&config);

    info!("RootWatch starting up...");
    info!(
        topic_arn = %config.topic_arn,
        display_timezone = %config.display_timezone,
        aws_region = config.aws_region.as_deref().unwrap_or("provider chain"),
        "Configuration loaded"
    );

    // =========================================================================
    // 1. Instantiate Services
    // =========================================================================
    let sdk_config = load_aws_config(&config).await;
    let services = setup_aws_services(&sdk_config);
    match services.directory.caller_account_id().await {
        Ok(account_id) => info!(account_id = %account_id, "Running as account"),
        Err(e) => warn!(error = %format!("{e:#}"), "Could not determine the caller account"),
    }
    let handler = build_handler(&config, &services)?;

    // =========================================================================
    // 2. Read the Event and Invoke
    // =========================================================================
    let payload = read_event(cli.event.as_deref()).await?;
    match handler.handle(payload).await {
        InvocationOutcome::Published { message_id } => {
            info!(message_id = %message_id, "Invocation complete");
        }
        InvocationOutcome::PublishFailed => {
            warn!("Invocation complete, alert was not delivered");
        }
        // Already logged with its fields by the handler.
        InvocationOutcome::Rejected(_) => {
            info!("Invocation complete, no alert published");
        }
    }

    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over the config.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init(),
        LogFormat::PlainText => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

/// Reads one event document from `path`, or from stdin.
async fn read_event(path: Option<&Path>) -> Result<Value> {
    let text = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read event from {}", path.display()))?,
        None => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("failed to read event from stdin")?;
            text
        }
    };
    serde_json::from_str(&text).context("event is not a valid JSON document")
}
