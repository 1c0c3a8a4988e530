//! Local HTTP bridge for hosts that cannot link the library

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::errors::JuremyError;
use crate::core::languages::Language;
use crate::core::lookup::JuremyLookup;
use crate::core::models::{PushOutcome, PushStats};

/// Application state
#[derive(Clone)]
pub struct AppState {
    lookup: JuremyLookup,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
    stats: PushStats,
}

/// Push request
#[derive(Deserialize)]
pub struct PushBody {
    pub source_lang: String,
    pub target_lang: String,
    pub text: String,
}

/// Push response
#[derive(Serialize, Deserialize)]
pub struct PushResponse {
    pub status: PushOutcome,
}

/// Ping response
#[derive(Serialize)]
pub struct PingResponse {
    pub connected: bool,
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, message: String, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: ErrorDetail {
                message,
                code: code.to_string(),
            },
        }),
    )
}

impl From<JuremyError> for ApiError {
    fn from(err: JuremyError) -> Self {
        let status = if err.is_caller_error() {
            StatusCode::BAD_REQUEST
        } else if err.is_local_error() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::BAD_GATEWAY
        };
        error_response(status, err.to_string(), err.code())
    }
}

/// Health check handler
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: crate::NAME.to_string(),
        version: crate::VERSION.to_string(),
        stats: state.lookup.client().stats().await,
    })
}

/// Push a search to Juremy
async fn push(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PushBody>,
) -> Result<Json<PushResponse>, ApiError> {
    if payload.text.trim().is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "text cannot be empty".to_string(),
            "invalid_request",
        ));
    }

    let source = Language::parse(&payload.source_lang)?;
    let target = Language::parse(&payload.target_lang)?;

    match state
        .lookup
        .client()
        .push_search(&source, &target, &payload.text)
        .await
    {
        Ok(status) => Ok(Json(PushResponse { status })),
        Err(e) => {
            warn!("Push failed: {}", e);
            Err(e.into())
        }
    }
}

/// Set up the route again and ping the session
async fn ping(State(state): State<Arc<AppState>>) -> Result<Json<PingResponse>, ApiError> {
    state.lookup.client().setup_route_and_ping().await?;
    Ok(Json(PingResponse { connected: true }))
}

/// Build the router
pub fn router(lookup: JuremyLookup) -> Router {
    let state = Arc::new(AppState { lookup });

    Router::new()
        .route("/", get(health_check))
        .route("/push", post(push))
        .route("/ping", post(ping))
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server(host: String, port: u16, lookup: JuremyLookup) -> anyhow::Result<()> {
    let app = router(lookup);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
