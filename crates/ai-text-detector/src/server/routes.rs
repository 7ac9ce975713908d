use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::{app::AppState, page};
use crate::presentation::{self, View};

// ============================================================================
// Page
// ============================================================================

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(page::render(state.detector.model_description()))
}

// ============================================================================
// Health
// ============================================================================

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "features": state.detector.num_features(),
    }))
}

// ============================================================================
// Analysis
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
}

pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Response {
    let detector = state.detector;
    let view = tokio::task::spawn_blocking(move || presentation::present(&detector, &req.text))
        .await
        .unwrap_or_else(|err| {
            tracing::error!(error = %err, "Analysis task failed");
            View::Error {
                message: "Analysis failed: internal error".to_string(),
            }
        });

    let status = if view.is_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    (status, Json(view)).into_response()
}
