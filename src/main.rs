// =============================================================================
// FX Strength: Main Entry Point
// =============================================================================
//
// Seeds the input snapshot (from file or the built-in sample), runs the first
// evaluation, and serves the REST API until Ctrl+C.
// =============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fx_strength::api;
use fx_strength::app_state::AppState;
use fx_strength::engine::ModelInputs;
use fx_strength::runtime_config::RuntimeConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("FX Strength starting up");

    let config_path = PathBuf::from(
        std::env::var("FX_CONFIG_PATH").unwrap_or_else(|_| "runtime_config.json".into()),
    );
    let config = RuntimeConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });

    // Env overrides apply to this run only and are never written back.
    let launch = config.launch_settings(
        std::env::var("FX_BIND_ADDR").ok(),
        std::env::var("FX_INPUTS_PATH").ok().map(PathBuf::from),
    );
    let bind_addr = launch.bind_addr.clone();

    info!(
        bind_addr = %bind_addr,
        pairs = ?config.major_pairs.iter().map(ToString::to_string).collect::<Vec<_>>(),
        policy_week = config.central_bank_week,
        "Configuration resolved"
    );

    // ── 2. Seed inputs ───────────────────────────────────────────────────
    let inputs = match &launch.inputs_path {
        Some(path) => ModelInputs::load(path).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load model inputs, using sample dataset");
            ModelInputs::sample()
        }),
        None => {
            info!("No inputs path configured, using sample dataset");
            ModelInputs::sample()
        }
    };

    // ── 3. Build shared state ────────────────────────────────────────────
    let state = Arc::new(AppState::new(config, inputs, Some(config_path.clone())));

    // ── 4. Serve ─────────────────────────────────────────────────────────
    let app = api::rest::router(state.clone());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server on {bind_addr}"))?;
    info!(addr = %bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            warn!("Shutdown signal received, stopping gracefully");
        })
        .await
        .context("API server failed")?;

    // ── 5. Shutdown ──────────────────────────────────────────────────────
    if let Err(e) = state.runtime_config.read().save(&config_path) {
        error!(error = %e, "Failed to save runtime config on shutdown");
    }

    info!("FX Strength shut down complete.");
    Ok(())
}
