use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::pipeline::Detector;

use super::routes;

#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<Detector>,
}

/// Build the Axum application around an already loaded detector
pub fn build_app(detector: Arc<Detector>) -> Router {
    let state = AppState { detector };

    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/api/analyze", post(routes::analyze))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until the process is stopped.
pub async fn run_server(detector: Arc<Detector>, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!(
        num_features = detector.num_features(),
        model = detector.model_description(),
        "Starting AI text detector on {}",
        addr
    );
    tracing::info!("Open http://{} in your browser", addr);

    let app = build_app(detector);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
