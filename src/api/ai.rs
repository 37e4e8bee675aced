use axum::{
    extract::State,
    routing::{get, post},
    Extension, Router,
};

use super::extract::Json;
use crate::auth::UserSession;
use crate::error::AppResult;
use crate::models::{AiMemory, ChatRequest, ChatResponse, PosterRequest, PosterResponse};
use crate::state::AppState;

/// Assistant chat and poster generation. Mounted inside the admin router.
pub fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/ai/chat", post(chat))
        .route("/ai/history", get(history))
        .route("/creative/generate", post(generate_poster))
}

#[tracing::instrument(skip(state, session, request), fields(admin_id = %session.user_id))]
async fn chat(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let message = request.message.unwrap_or_default();
    let response = state
        .assistant
        .chat(session.user_id, &message, request.history)
        .await?;

    Ok(Json(ChatResponse { response }))
}

async fn history(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> AppResult<Json<Vec<AiMemory>>> {
    let memories = state.assistant.memories(session.user_id).await?;
    Ok(Json(memories))
}

#[tracing::instrument(skip(state, request))]
async fn generate_poster(
    State(state): State<AppState>,
    Json(request): Json<PosterRequest>,
) -> AppResult<Json<PosterResponse>> {
    let poster = state.posters.generate_poster(request).await?;
    Ok(Json(poster))
}
