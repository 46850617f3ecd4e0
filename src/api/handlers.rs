//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::types::{ChatRequest, ChatResponse, ErrorResponse};
use super::AppState;
use crate::bot::BotError;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the chat widget
        .route("/", get(serve_page))
        // Widget assets (embedded or filesystem fallback)
        .route("/assets/*path", get(serve_static))
        // Chat endpoint
        .route("/api/chat", post(chat))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat Widget
// ============================================================

/// Serve the chat widget page
async fn serve_page() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - chat widget not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Chat Endpoint
// ============================================================

/// Accepts `{"messages": [{role, content}, ...]}` and returns `{"reply": text}`.
/// The server is stateless; the client sends the full history each time.
async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    // Malformed bodies (missing `messages`, non-array, bad roles) stay
    // inside the JSON error contract instead of axum's plain-text rejection.
    let Json(req) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    if req.messages.is_empty() {
        return Err(AppError::BadRequest(
            "messages must not be empty".to_string(),
        ));
    }

    let reply = state.bot.reply(&req.messages).await.map_err(|e| match e {
        BotError::Validation(message) => AppError::BadRequest(message),
        BotError::Upstream(upstream) => AppError::Upstream(upstream.to_string()),
    })?;

    Ok(Json(ChatResponse { reply }))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("helpline ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

/// The endpoint's error-isolation boundary: every failure becomes a JSON
/// body with an `error` field, never a raw fault.
enum AppError {
    BadRequest(String),
    Upstream(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
