//! NetWatch Engine - Main entry point.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use netwatch_engine::infrastructure::{
    clock::{SystemClock, SystemRandom},
    config::EngineConfig,
    workers::hack_resolution_worker,
};
use netwatch_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be started from `crates/engine`).
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "netwatch_engine=debug,netwatch_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting NetWatch Engine");

    let config = EngineConfig::from_env();
    tracing::info!(
        hack_duration_secs = config.hack_duration_secs,
        hack_energy_cost = config.hack_energy_cost,
        "Configuration loaded"
    );

    let app = Arc::new(App::in_memory(
        Arc::new(SystemClock::new()),
        Arc::new(SystemRandom::new()),
        config.clone(),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let worker = tokio::spawn(hack_resolution_worker(
        app.use_cases.hacks.resolve_due.clone(),
        config.hack_poll_interval,
        shutdown_rx,
    ));

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");

    shutdown_tx.send(true)?;
    worker.await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let repo_root = manifest_dir.join("../..");

    // Prefer `.env.local` for developer overrides, then `.env`.
    let _ = dotenvy::from_path(repo_root.join(".env.local"));
    let _ = dotenvy::from_path(repo_root.join(".env"));
}
