//! RateGuard HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::ClassificationService;
use infrastructure::{AppConfig, OpenAiCompletionAdapter, SpeechTranscriptionAdapter};
use presentation_http::{RequestIdLayer, routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "rateguard_server=debug,presentation_http=debug,tower_http=debug";

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    use axum::http::{HeaderValue, Method};

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);
    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    layer.allow_origin(origins)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(config.server.json_logs());

    info!("RateGuard v{} starting...", env!("CARGO_PKG_VERSION"));

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;
    for name in config.missing_credentials() {
        warn!(credential = name, "Credential not configured; requests needing it will fail");
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        taxonomy = %config.classifier.taxonomy,
        model = %config.inference.default_model,
        stt_provider = ?config.speech.provider,
        "Configuration loaded"
    );

    let completion = OpenAiCompletionAdapter::new(config.inference.to_client_config())
        .map_err(|e| anyhow::anyhow!("Failed to initialize completion provider: {e}"))?;
    let transcription = SpeechTranscriptionAdapter::new(config.speech.to_client_config())
        .map_err(|e| anyhow::anyhow!("Failed to initialize speech provider: {e}"))?;
    let guidelines = config
        .guideline_template()
        .map_err(|e| anyhow::anyhow!("Failed to load guidelines: {e}"))?;
    info!(version = guidelines.version(), "Guidelines loaded");

    let classifier =
        ClassificationService::new(Arc::new(completion), Arc::new(transcription), guidelines);

    let addr = config.server.bind_address();
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let cors = cors_layer(&config.server.allowed_origins);
    let state = AppState::new(classifier, config);

    // Add middleware (last added = outermost)
    let app = routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestIdLayer::new());

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
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
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
