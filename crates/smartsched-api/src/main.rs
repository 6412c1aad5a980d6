//! # smartsched-api — Binary Entry Point
//!
//! Starts the Axum HTTP server. Binds to a configurable port
//! (default 8080).

use smartsched_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Build configuration from environment.
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let auth_token = std::env::var("SMARTSCHED_AUTH_TOKEN").ok();
    if auth_token.is_none() {
        tracing::warn!("SMARTSCHED_AUTH_TOKEN not set; API runs open in demo mode");
    }
    let config = AppConfig { port, auth_token };

    // Attempt to create the model gateway from environment.
    let model = match smartsched_model::ModelApiConfig::from_env() {
        Ok(model_config) => {
            tracing::info!("model client configured");
            match smartsched_model::ModelGateway::new(model_config) {
                Ok(gateway) => Some(gateway),
                Err(e) => {
                    tracing::error!("failed to create model client: {e}");
                    return Err(e.into());
                }
            }
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
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
