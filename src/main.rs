//! Interval Timer - An HTTP server holding pausable countdown timers
//! 
//! This is the main entry point for the interval-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use interval_timer::{
    api::create_router,
    clock::MonotonicClock,
    config::Config,
    state::AppState,
    tasks::expiry_watch,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("interval_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting interval-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms",
          config.host, config.port, config.tick_ms);

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), Arc::new(MonotonicClock)));

    // Start the expiry watch
    let mut watch = expiry_watch(Arc::clone(&state), config.tick_period());
    watch.run();

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /timers              - Create a timer");
    info!("  GET    /timers              - List timers");
    info!("  GET    /timers/:id          - Inspect a timer");
    info!("  DELETE /timers/:id          - Remove a timer");
    info!("  POST   /timers/:id/pause    - Pause / resume / reset / expire / extend");
    info!("  GET    /timers/:id/snapshot - Export a timer as JSON");
    info!("  POST   /timers/restore      - Import a timer snapshot");
    info!("  GET    /status              - Registry overview");
    info!("  GET    /health              - Health check");

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

    watch.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
