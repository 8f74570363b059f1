use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    serve, Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::analysis::Analyzer;
use crate::error::KaiError;
use crate::models::{AnalysisResult, AnswerSet};
use crate::prompts::{initial_bot_message, ChatMessage, QUESTIONS};

// Shared application state
#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<Analyzer>,
}

#[derive(Serialize)]
struct QuestionsResponse {
    greeting: ChatMessage,
    questions: &'static [&'static str],
}

#[derive(Deserialize)]
pub struct AnalysisRequest {
    pub answers: Vec<String>,
}

#[derive(Deserialize)]
pub struct VisualAnchorRequest {
    pub theme: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VisualAnchorResponse {
    image_url: String,
}

/// Every failure leaves the API as `{ "error": message }`.
pub enum ApiError {
    Kai(KaiError),
    Body(JsonRejection),
}

impl From<KaiError> for ApiError {
    fn from(e: KaiError) -> Self {
        ApiError::Kai(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::Body(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Kai(e) => {
                let status = match e {
                    KaiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                    KaiError::NoImageData | KaiError::ImageGeneration(_) => StatusCode::BAD_GATEWAY,
                    KaiError::InvalidAnswerCount { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    KaiError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }
            ApiError::Body(rejection) => (rejection.status(), rejection.body_text()),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

async fn questions_handler() -> Json<QuestionsResponse> {
    Json(QuestionsResponse {
        greeting: initial_bot_message(),
        questions: &QUESTIONS,
    })
}

async fn analysis_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(request) = payload?;
    let answers = AnswerSet::new(request.answers)?;
    let result = state.analyzer.produce_analysis(&answers).await?;
    Ok(Json(result))
}

async fn visual_anchor_handler(
    State(state): State<AppState>,
    payload: Result<Json<VisualAnchorRequest>, JsonRejection>,
) -> Result<Json<VisualAnchorResponse>, ApiError> {
    let Json(request) = payload?;
    let image_url = state
        .analyzer
        .generate_visual_anchor(&request.theme)
        .await
        .inspect_err(|e| warn!(error = %e, "Visual anchor retry failed"))?;
    Ok(Json(VisualAnchorResponse { image_url }))
}

pub fn router(analyzer: Arc<Analyzer>) -> Router {
    let state = AppState { analyzer };

    Router::new()
        .route("/api/questions", get(questions_handler))
        .route("/api/analysis", post(analysis_handler))
        .route("/api/visual-anchor", post(visual_anchor_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http()) // Add request logging
}

pub async fn start_web_server(port: u16, analyzer: Arc<Analyzer>) -> Result<()> {
    let app = router(analyzer);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind to address {}", addr))?;

    serve(listener, app.into_make_service())
        .await
        .context("Web server failed")?;

    Ok(())
}
