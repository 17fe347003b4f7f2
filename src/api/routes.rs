//! HTTP route handlers for the API

use super::auth::Owner;
use super::error::ApiError;
use super::extract::{ValidJson, ValidPath};
use super::AppState;
use crate::models::{
    CreateMemoryRequest, Memory, MemoryDetail, MemoryId, MemorySummary, UpdateMemoryRequest,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

// ============================================================================
// Health Check
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// ============================================================================
// Memories
// ============================================================================

pub async fn list_memories(
    State(state): State<AppState>,
) -> Result<Json<Vec<MemorySummary>>, ApiError> {
    Ok(Json(state.memories.list().await?))
}

pub async fn get_memory(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<MemoryId>,
) -> Result<Json<Memory>, ApiError> {
    Ok(Json(state.memories.get(id).await?))
}

pub async fn create_memory(
    State(state): State<AppState>,
    Owner(owner_id): Owner,
    ValidJson(req): ValidJson<CreateMemoryRequest>,
) -> Result<Json<MemoryDetail>, ApiError> {
    Ok(Json(state.memories.create(req, owner_id).await?))
}

pub async fn update_memory(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<MemoryId>,
    ValidJson(req): ValidJson<UpdateMemoryRequest>,
) -> Result<Json<MemoryDetail>, ApiError> {
    Ok(Json(state.memories.update(id, req).await?))
}

pub async fn delete_memory(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<MemoryId>,
) -> Result<StatusCode, ApiError> {
    state.memories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
