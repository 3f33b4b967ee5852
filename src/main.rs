//! Countdown Timer - a countdown controller served over a small HTTP shell
//!
//! This is the main entry point for the countdown-timer application.

use std::sync::Arc;
use anyhow::anyhow;
use tokio::net::TcpListener;
use tracing::info;

use countdown_timer::{
    api::create_router,
    config::Config,
    services::{JsonFileStore, KeyValueStore, MemoryStore, RandomPicker},
    state::{AppState, CountdownController},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .init();

    let timer_config = config.timer_config();
    info!("Starting countdown-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, duration={}s",
          config.host, config.port, timer_config.duration_seconds());

    let store: Arc<dyn KeyValueStore> = match &config.store {
        Some(path) => {
            let store = JsonFileStore::open(path).map_err(|e| anyhow!(e))?;
            info!("Persisting username to {}", store.path().display());
            Arc::new(store)
        }
        None => {
            info!("No store path given, username is kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let controller = CountdownController::new(timer_config, store, Box::new(RandomPicker));
    let state = Arc::new(AppState::new(controller, config.port, config.host.clone()));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start      - Start the countdown");
    info!("  POST /reset      - Stop and refill the countdown");
    info!("  POST /configure  - Set the duration in seconds");
    info!("  PUT  /username   - Set the username");
    info!("  GET  /status     - Current countdown state");
    info!("  GET  /health     - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    state.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
