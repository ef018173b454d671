use std::sync::Arc;

use anyhow::Context;
use ask_relay::settings::Settings;
use ask_relay::{build_app, run_server, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "ask_relay=info".into()),
        )
        .with_target(false)
        .init();

    let config_path = Settings::config_path_from_env();
    let settings = Settings::load(&config_path)
        .with_context(|| format!("failed to load settings from {}", config_path.display()))?;

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let state = Arc::new(AppState::new(settings));
    tracing::info!(
        backend = %state.inference.url(),
        model = %state.inference.model(),
        "relay starting"
    );

    run_server(build_app(state), &host, port)
        .await
        .with_context(|| format!("server on {host}:{port} failed"))
}
