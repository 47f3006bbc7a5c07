//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
///
/// JSON routes and the audio upload route get separate body limits from
/// `server` config.
pub fn create_router(state: AppState) -> Router {
    let server = &state.config.server;

    let json_routes = Router::new()
        .route("/classify", post(handlers::classify::classify))
        .route("/classify-batch", post(handlers::batch::classify_batch))
        .layer(DefaultBodyLimit::max(server.max_body_size_json_bytes));

    let audio_routes = Router::new()
        .route("/classify-audio", post(handlers::audio::classify_audio))
        .layer(DefaultBodyLimit::max(server.max_body_size_audio_bytes));

    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .merge(json_routes)
        .merge(audio_routes)
        .with_state(state)
}
