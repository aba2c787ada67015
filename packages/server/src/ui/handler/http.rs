//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    domain::RoomId, infrastructure::dto::http::RoomPresenceDto, ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Live presence view of one room.
///
/// The surrounding CRUD layer reads `count` from this endpoint to annotate
/// each persisted room with its online-user count. An unknown room is not an
/// error: it simply has nobody online.
pub async fn get_room_presence(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<i64>,
) -> Json<RoomPresenceDto> {
    let snapshot = state
        .get_room_presence_usecase
        .execute(RoomId::new(room_id))
        .await;
    Json(snapshot.into())
}
