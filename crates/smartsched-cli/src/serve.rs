//! # Serve Subcommand
//!
//! Runs the SmartSched HTTP API server. Equivalent to launching the
//! `smartsched-api` binary, with the port exposed as a flag.

use anyhow::{Context, Result};
use clap::Args;

use smartsched_api::state::{AppConfig, AppState};
use smartsched_model::{ModelApiConfig, ModelGateway};

/// Arguments for the `smartsched serve` subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to bind. Falls back to the PORT environment variable, then 8080.
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Execute the serve subcommand. Runs until the process is terminated.
pub async fn run_serve(args: &ServeArgs) -> Result<u8> {
    let port = args
        .port
        .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
        .unwrap_or(8080);

    let auth_token = std::env::var("SMARTSCHED_AUTH_TOKEN").ok();
    if auth_token.is_none() {
        tracing::warn!("SMARTSCHED_AUTH_TOKEN not set; API runs open in demo mode");
    }
    let config = AppConfig { port, auth_token };

    let model = match ModelApiConfig::from_env() {
        Ok(model_config) => {
            tracing::info!("model client configured");
            Some(ModelGateway::new(model_config).context("failed to create model client")?)
        }
        Err(e) => {
            tracing::warn!("model client not configured: {e}. Verdict endpoints will return 503.");
            None
        }
    };

    let state = AppState::new(config, model);
    let app = smartsched_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("SmartSched API listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .await
        .context("server terminated abnormally")?;
    Ok(0)
}
