//! calcgate Server - Headless Daemon
//!
//! Serves the browser-facing gateway on /api/*:
//! - /api/generate-text   (POST) text completion with model fallback
//! - /api/generate-image  (GET)  image generation with model fallback
//! - /api/generate-video  (GET)  video generation with model fallback
//! - /api/feedback        (POST) feedback relay
//!
//! Access via: http://127.0.0.1:8787

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod router;
mod server_utils;
mod state;
#[cfg(test)]
mod test_helpers;

use calcgate_core::modules::config as core_config;
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command.as_ref().unwrap_or(&Commands::Serve) {
        Commands::Serve => run_server(&cli).await,
        Commands::Config { json } => commands::show_config(cli.config.as_deref(), *json),
        Commands::Check => commands::check_config(cli.config.as_deref()),
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

async fn run_server(cli: &Cli) -> Result<()> {
    let mut config = core_config::load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = &cli.host {
        config.server.host.clone_from(host);
    }

    info!("🚀 calcgate starting on {}:{}...", config.server.host, config.server.port);
    for warning in commands::missing_credentials(&config) {
        tracing::warn!("⚠️ {}", warning);
    }

    let listener = server_utils::create_listener(&config.server).await?;
    let state = AppState::new(config)?;
    info!(
        "✅ Gateway ready: {} allowed origins, {} text models",
        state.config().allowed_origins.len(),
        state.config().text.models.len()
    );

    let app = router::build_router(state);
    let local_addr = listener.local_addr()?;
    info!("🌐 Listening on http://{}", local_addr);
    info!("🔌 API available at http://{}/api/", local_addr);

    axum::serve(listener, app).with_graceful_shutdown(server_utils::shutdown_signal()).await?;

    info!("👋 Server stopped");
    Ok(())
}
