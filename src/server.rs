//! JSON HTTP API over the analysis and generation operations.
//!
//! Endpoints:
//!   GET  /api/health             → liveness probe
//!   POST /api/analyze            → strength report for one password
//!   POST /api/generate           → wordlist as a JSON array
//!   POST /api/generate/download  → wordlist as a `text/plain` attachment
//!
//! Nothing is written to disk and no request body is ever logged.

use crate::config::ServerConfig;
use crate::error::InvalidArgument;
use crate::generator::{generate_wordlist, GenerateOptions, Wordlist};
use crate::strength::{Analyzer, EngineChoice, StrengthReport};
use anyhow::{Context, Result};
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<Analyzer>,
    engine: EngineChoice,
}

impl AppState {
    pub fn new(engine: EngineChoice) -> Self {
        Self {
            analyzer: Arc::new(engine.analyzer(Vec::new())),
            engine,
        }
    }
}

pub fn router(config: &ServerConfig) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze))
        .route("/api/generate", post(generate))
        .route("/api/generate/download", post(download))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(config.engine))
}

pub async fn serve(config: ServerConfig) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    let addr = listener.local_addr().context("Failed to read local address")?;
    info!(%addr, engine = ?config.engine, "passlab API listening");

    axum::serve(listener, router(&config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

// ── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ApiError {
    Invalid(InvalidArgument),
    Internal(String),
}

impl From<InvalidArgument> for ApiError {
    fn from(e: InvalidArgument) -> Self {
        ApiError::Invalid(e)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Invalid(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Internal(detail) => {
                warn!(%detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { ok: false, error })).into_response()
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    password: String,
    #[serde(default)]
    user_inputs: Vec<String>,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    ok: bool,
    result: StrengthReport,
}

async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let password = Zeroizing::new(request.password);

    let user_inputs: Vec<String> = request
        .user_inputs
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let result = tokio::task::spawn_blocking(move || {
        if user_inputs.is_empty() {
            state.analyzer.analyze(&password)
        } else {
            state.engine.analyzer(user_inputs).analyze(&password)
        }
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    debug!("analysis request served");
    Ok(Json(AnalyzeResponse { ok: true, result }))
}

/// Seeds arrive either as a JSON array or as one comma-separated string.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeedInput {
    List(Vec<String>),
    Joined(String),
}

impl SeedInput {
    fn into_seeds(self) -> Vec<String> {
        match self {
            SeedInput::List(seeds) => seeds,
            SeedInput::Joined(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct GenerateRequest {
    seeds: SeedInput,
    #[serde(default)]
    target: Option<i64>,
    #[serde(default)]
    min_length: Option<usize>,
    #[serde(default, alias = "length")]
    max_length: Option<usize>,
}

impl GenerateRequest {
    fn options(&self) -> Result<GenerateOptions, InvalidArgument> {
        let target = match self.target {
            None => None,
            Some(t) if t <= 0 => return Err(InvalidArgument::NonPositiveTarget),
            Some(t) => Some(usize::try_from(t).unwrap_or(usize::MAX)),
        };

        Ok(GenerateOptions {
            target,
            min_length: self
                .min_length
                .unwrap_or(GenerateOptions::STANDARD.min_length),
            max_length: self
                .max_length
                .unwrap_or(GenerateOptions::STANDARD.max_length),
        })
    }
}

#[derive(Serialize)]
struct GenerateResponse {
    ok: bool,
    count: usize,
    words: Wordlist,
}

async fn run_generation(request: GenerateRequest) -> Result<Wordlist, ApiError> {
    let options = request.options()?;
    let seeds = request.seeds.into_seeds();
    let seed_count = seeds.len();

    let words = tokio::task::spawn_blocking(move || generate_wordlist(&seeds, &options))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    info!(seeds = seed_count, words = words.len(), "wordlist generated");
    Ok(words)
}

async fn generate(Json(request): Json<GenerateRequest>) -> Result<Json<GenerateResponse>, ApiError> {
    let words = run_generation(request).await?;
    Ok(Json(GenerateResponse {
        ok: true,
        count: words.len(),
        words,
    }))
}

async fn download(Json(request): Json<GenerateRequest>) -> Result<Response, ApiError> {
    let words = run_generation(request).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"wordlist.txt\"",
            ),
        ],
        words.to_text(),
    )
        .into_response())
}
