//! Gatekeeper Server: client identity and session service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use gatekeeper_api::AppState;
use gatekeeper_cache::provider::CacheManager;
use gatekeeper_core::config::AppConfig;
use gatekeeper_core::config::logging::LogFormat;
use gatekeeper_core::result::AppResult;
use gatekeeper_core::retry::RetryPolicy;
use gatekeeper_database::store::connect_store;

#[tokio::main]
async fn main() {
    let env = std::env::var("GATEKEEPER_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!("Configuration loaded (env: {})", env);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins over `logging.level` when both are present.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = fmt().with_env_filter(filter).with_target(true);

    match config.logging.format {
        LogFormat::Json => builder.json().with_current_span(false).init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

/// Main server run function
async fn run(config: AppConfig) -> AppResult<()> {
    tracing::info!("Starting Gatekeeper v{}", env!("CARGO_PKG_VERSION"));
    let retry = RetryPolicy::from(&config.startup);

    // ── Step 1: Credential store ─────────────────────────────────
    tracing::info!(
        "Connecting credential store (provider: {})...",
        config.database.provider
    );
    let store = retry
        .run("credential store", || connect_store(&config.database))
        .await?;

    // ── Step 2: Cache and pub/sub ────────────────────────────────
    tracing::info!("Initializing cache (provider: {})...", config.cache.provider);
    let cache = retry
        .run("cache", || CacheManager::new(&config.cache))
        .await?;
    let cache = Arc::new(cache);

    // ── Step 3: Auth, services, and state ────────────────────────
    let bootstrap_admin = config.auth.bootstrap_admin.clone();
    let state = AppState::new(config, store, cache)?;

    // ── Step 4: Bootstrap admin ──────────────────────────────────
    if let Some(admin) = bootstrap_admin {
        state.admin.ensure_admin(&admin).await?;
    }

    // ── Step 5: Serve ────────────────────────────────────────────
    gatekeeper_api::run_server(state).await
}
