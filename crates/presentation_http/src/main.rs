//! MedAssist HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use infrastructure::{AppConfig, TracingProgressReporter, build_services, init_telemetry};
use presentation_http::{create_router, state::AppState};
use tokio::{net::TcpListener, signal, sync::Notify};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let loaded = AppConfig::load();
    let telemetry = loaded
        .as_ref()
        .map(|c| c.telemetry.clone())
        .unwrap_or_default();
    init_telemetry(&telemetry)?;

    info!("🩺 MedAssist v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = %config.server.port,
        vision_model = %config.vision.model,
        local_runtime = %config.local_model.base_url,
        "Configuration loaded"
    );

    let services = build_services(&config, Arc::new(TracingProgressReporter))
        .map_err(|e| anyhow::anyhow!("Failed to initialize services: {e}"))?;
    let state = AppState::from(services);

    let mut app = create_router(state, &config.server)
        .layer(RequestBodyLimitLayer::new(config.server.max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    if config.server.cors_enabled {
        app = app.layer(cors_layer(&config.server.allowed_origins));
    }

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("🚀 Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));
    let shutdown = Arc::new(Notify::new());

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(Arc::clone(&shutdown), shutdown_timeout))
        .into_future();

    tokio::select! {
        result = server => {
            result?;
            info!("👋 Server shutdown complete");
        }
        () = drain_deadline(&shutdown, shutdown_timeout) => {
            warn!("⌛ In-flight requests did not finish within {:?}, exiting", shutdown_timeout);
        }
    }

    Ok(())
}

/// Allow all origins when none are configured
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    use axum::http::{HeaderValue, Method};
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

/// Resolve `timeout` after the shutdown signal fired
async fn drain_deadline(shutdown: &Notify, timeout: Duration) {
    shutdown.notified().await;
    tokio::time::sleep(timeout).await;
}

/// Wait for SIGINT or SIGTERM, then start the drain deadline
async fn shutdown_signal(shutdown: Arc<Notify>, timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("⏳ Waiting up to {:?} for in-flight requests to finish...", timeout);
    shutdown.notify_one();
}
