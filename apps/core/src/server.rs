//! HTTP boundary for the chat companion.
//!
//! - `GET /health`
//! - `POST /api/ai-chat` send a message, get a reply tagged `api` or `fallback`
//! - `GET /api/ai-chat?limit=N` chat history, oldest first
//! - `DELETE /api/ai-chat` clear chat history
//!
//! Every `/api` route requires `Authorization: Bearer <jwt>`.

use crate::actors::companion::CompanionHandle;
use crate::auth::{AuthUser, TokenVerifier};
use crate::error::AppError;
use crate::models::{ChatMessage, ChatReply, ChatRequest};
use crate::rate_limiter::RateLimiter;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRef, Query, State};
use axum::http::Request;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn};
use uuid::Uuid;
use validator::Validate;

const DEFAULT_HISTORY_LIMIT: i64 = 50;
const MAX_HISTORY_LIMIT: i64 = 200;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub companion: CompanionHandle,
    pub verifier: TokenVerifier,
    pub limiter: Arc<RateLimiter>,
}

impl FromRef<AppState> for TokenVerifier {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/ai-chat",
            get(chat_history).post(send_chat).delete(clear_chat),
        )
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
            info_span!(
                "http_request",
                request_id = %Uuid::new_v4(),
                method = %request.method(),
                path = %request.uri().path(),
            )
        }))
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// `AuthUser` runs before the body is read; body rejections become 400s.
async fn send_chat(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    if !state.limiter.check(&user_id) {
        warn!(%user_id, "Chat rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    info!(%user_id, message_len = payload.message.len(), "Chat message received");
    let reply = state
        .companion
        .process_message(user_id, payload.message)
        .await?;
    Ok(Json(reply))
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    limit: Option<i64>,
}

#[derive(Serialize)]
struct HistoryResponse {
    messages: Vec<ChatMessage>,
}

async fn chat_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse>, AppError> {
    let Query(query) = query?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let messages = state.companion.history(&user_id, limit).await?;
    Ok(Json(HistoryResponse { messages }))
}

#[derive(Serialize)]
struct ClearResponse {
    deleted: u64,
}

async fn clear_chat(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ClearResponse>, AppError> {
    let deleted = state.companion.clear_history(&user_id).await?;
    Ok(Json(ClearResponse { deleted }))
}
