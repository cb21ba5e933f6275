//! Axum gateway for the Shikibu writing workspace.
//!
//! `POST /api/ai` proxies generate/learn requests to the hosted providers
//! through the core composer; `GET /api/v1/health` reports identity. When
//! `frontend_enabled` the static split-pane web UI is served from `assets/`.
//! Provider keys are loaded from `.env` and never reach the frontend.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use shikibu_core::{Composer, ComposerError, CoreConfig, ProviderCredentials};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const INVALID_ACTION: &str = "無効なアクション";
const SERVER_ERROR: &str = "サーバーエラー";

#[derive(Clone)]
struct AppState {
    config: Arc<CoreConfig>,
    composer: Arc<Composer>,
}

#[derive(Deserialize)]
struct AiProxyRequest {
    #[serde(default)]
    action: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Serialize)]
struct GenerateResponse {
    content: String,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'static str>,
}

#[derive(Serialize)]
struct LearnResponse {
    analysis: String,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'static str>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

#[tokio::main]
async fn main() {
    // Load .env first. Provider keys stay in the backend process only.
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[shikibu-gateway] .env not loaded: {} (using system environment)", e);
    }

    let credentials = ProviderCredentials::from_env();
    if !credentials.has_any() {
        eprintln!(
            "[shikibu-gateway] Hint: set OPENAI_API_KEY and/or ANTHROPIC_API_KEY in .env for live completions; without them every action serves sample text."
        );
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(CoreConfig::load().expect("load CoreConfig"));
    let state = AppState {
        config: Arc::clone(&config),
        composer: Arc::new(Composer::new(&credentials)),
    };

    let mut app = router(state);
    if config.frontend_enabled {
        let assets = assets_dir();
        tracing::info!("Serving web UI from {}", assets.display());
        app = app.fallback_service(ServeDir::new(assets).append_index_html_on_directories(true));
    }
    let app = app.layer(CorsLayer::permissive());

    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("{} gateway listening on http://{}", config.app_name, addr);
    let listener = tokio::net::TcpListener::bind(addr).await.expect("bind gateway port");
    axum::serve(listener, app).await.expect("serve gateway");
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/ai", post(ai_proxy))
        .route("/api/v1/health", get(health))
        .with_state(state)
}

/// `assets/` next to the manifest, or cwd-relative when the compile-time
/// path does not exist (e.g. a moved binary run from the workspace root).
fn assets_dir() -> PathBuf {
    let compiled = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
    if compiled.exists() {
        return compiled;
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    cwd.join("add-ons").join("shikibu-gateway").join("assets")
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "app": state.config.app_name,
        "status": "ok",
    }))
}

/// Completion proxy. The body is decoded by hand so a malformed payload
/// answers the generic server error and an unrecognized action answers 400
/// with the fixed error body.
async fn ai_proxy(State(state): State<AppState>, body: axum::body::Bytes) -> Response {
    let req: AiProxyRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::error!(target: "shikibu::gateway", error = %e, "unreadable proxy payload");
            return server_error_response();
        }
    };

    match req.action.as_str() {
        "generate" => {
            let prompt = req.data.get("prompt").and_then(|v| v.as_str()).unwrap_or_default();
            tracing::info!(target: "shikibu::gateway", chars = prompt.chars().count(), "generate request");
            match state.composer.generate(prompt).await {
                Ok(reply) => Json(GenerateResponse {
                    content: reply.text,
                    success: true,
                    note: reply.note,
                })
                .into_response(),
                Err(e) => server_error(e),
            }
        }
        "learn" => {
            let texts: Vec<String> = req
                .data
                .get("texts")
                .and_then(|v| v.as_array())
                .map(|items| items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
                .unwrap_or_default();
            tracing::info!(target: "shikibu::gateway", texts = texts.len(), "learn request");
            match state.composer.learn(&texts).await {
                Ok(reply) => Json(LearnResponse {
                    analysis: reply.text,
                    success: true,
                    note: reply.note,
                })
                .into_response(),
                Err(e) => server_error(e),
            }
        }
        other => {
            tracing::warn!(target: "shikibu::gateway", action = %other, "unrecognized action");
            (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: INVALID_ACTION })).into_response()
        }
    }
}

fn server_error(e: ComposerError) -> Response {
    tracing::error!(target: "shikibu::gateway", error = %e, "proxy call failed");
    server_error_response()
}

fn server_error_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: SERVER_ERROR }))
        .into_response()
}
