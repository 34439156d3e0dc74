use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use ember_shared::errors::AppResult;
use ember_shared::types::api::ApiResponse;
use ember_shared::types::pagination::{Paginated, PaginationParams};

use crate::chat;
use crate::models::Message;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListMessagesParams {
    pub match_id: Uuid,
    pub user_id: Uuid,
}

/// GET /messages?match_id=&user_id= - message log for a match participant
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListMessagesParams>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<Paginated<Message>>>> {
    let page =
        chat::list_messages(&state.store, params.match_id, params.user_id, &pagination).await?;
    Ok(Json(ApiResponse::ok(page)))
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub match_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub message_id: Uuid,
}

/// POST /messages - send a message within a match
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<SendMessageResponse>>)> {
    let message =
        chat::send_message(&state.store, req.match_id, req.sender_id, &req.content).await?;

    tracing::debug!(
        sender = %req.sender_id,
        match_id = %req.match_id,
        message_id = %message.id,
        "message sent"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(SendMessageResponse {
            message_id: message.id,
        })),
    ))
}
